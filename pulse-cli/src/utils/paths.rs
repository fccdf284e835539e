use std::path::PathBuf;

pub fn default_log_path() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("pulse").join("dashboard.log");
    }
    PathBuf::from(".pulse_dashboard.log")
}
