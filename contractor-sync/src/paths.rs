use std::path::PathBuf;

/// Config file shared by `contractor-api` and the `dashboard` CLI
pub fn config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("contractor-dashboard").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
