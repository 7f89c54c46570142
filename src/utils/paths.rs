use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".coupon_calendar";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "coupon_calendar.log";

pub const HOME_ENV: &str = "COUPON_CALENDAR_HOME";

/// Returns the application data directory, defaulting to `~/.coupon_calendar`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn log_file() -> PathBuf {
    app_data_dir().join(LOG_FILE)
}
