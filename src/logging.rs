use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directives when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool, log_queries: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = format!("userql={}", level);
    if log_queries {
        // sqlx reports executed statements at debug level
        directives.push_str(",sqlx::query=debug");
    }
    directives
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to log file. If None, logs only to stderr
/// * `log_queries` - Show SQL statements issued by the database layer
pub fn init(verbose: bool, log_file: Option<PathBuf>, log_queries: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, log_queries)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = log_file {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file_appender = tracing_appender::rolling::daily(
            log_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("userql.log")),
        );

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false, false), "userql=info");
        assert_eq!(default_directives(true, false), "userql=debug");
    }

    #[test]
    fn test_query_logging_directive() {
        let directives = default_directives(false, true);
        assert!(directives.contains("sqlx::query=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
