//! Logging Infrastructure
//!
//! Console output is pretty in development and JSON when `LOG_JSON=true`.
//! With a log directory, application logs also go to a daily rolling file.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default filter when neither `RUST_LOG` nor `LOG_LEVEL` narrows it
fn default_directives(level: &str) -> String {
    format!("bookings_server={level},tower_http={level},sqlx=warn,{level}")
}

/// Initialize the logging system
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// bookings_server::logger::init_logger("debug", false, None).unwrap();
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let app_log_dir = Path::new(dir).join("app");
            fs::create_dir_all(&app_log_dir)?;
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "bookings");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_keep_sqlx_quiet() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("bookings_server=debug"));
        assert!(directives.contains("sqlx=warn"));
    }
}
