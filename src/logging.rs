use log::{debug, error, info, log_enabled, warn, Level, LevelFilter};

/// Initializes the logger with the `env_logger` crate.
///
/// The level is taken from `RUST_LOG` and defaults to `info`.
pub fn init_logger() {
    init_logger_with_debug(false);
}

/// Initializes the logger, forcing the `debug` level when `debug` is set.
///
/// Safe to call more than once; later calls are ignored by `env_logger`.
///
/// # Examples
/// ```rust,no_run
/// use tic_rs::logging::init_logger_with_debug;
///
/// init_logger_with_debug(true);
/// log::debug!("Debug mode enabled !");
/// ```
pub fn init_logger_with_debug(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
