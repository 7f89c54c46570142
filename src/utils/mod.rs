pub mod paths;
pub mod persistence;

use std::{fs::OpenOptions, sync::Mutex, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Stdout belongs to the dashboard, so events go to the log file in the app
/// directory, or to stderr when that file cannot be opened.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env()
            .add_directive("coupon_calendar=info".parse().expect("static directive"));

        let log_path = paths::log_file();
        let file = persistence::ensure_dir(&paths::app_data_dir())
            .ok()
            .and_then(|_| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&log_path)
                    .ok()
            });

        let builder = fmt().with_env_filter(filter).with_ansi(false);
        // A subscriber installed by an embedding application wins.
        let _ = match file {
            Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
            None => builder.with_writer(std::io::stderr).try_init(),
        };
    });
}
