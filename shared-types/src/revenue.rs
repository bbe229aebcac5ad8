use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One bar of the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenuePoint {
    /// Period label, e.g. "Jan"
    pub period: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueResponse {
    pub revenue: Vec<RevenuePoint>,
}
