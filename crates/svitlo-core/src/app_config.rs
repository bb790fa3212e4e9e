use std::path::PathBuf;

/// Process-level settings, read once from the environment at startup and
/// passed explicitly into the fetch pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub addresses_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub fetch_max_retries: u32,
    pub fetch_retry_delay_secs: u64,
    pub user_agent: String,
}
