//! Tracing initialisation for the SimplySetup binaries.
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` wins when set;
//! otherwise the supplied level applies to our crates and the database
//! engine is held at `warn` so query chatter does not drown batch output.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(level: Level) -> String {
    format!("{},surrealdb=warn,surrealdb_core=warn", level.as_str().to_lowercase())
}

/// Initialise the global tracing subscriber.
///
/// * `json`: emit newline-delimited JSON log lines for log shipping.
/// * `level`: default verbosity when `RUST_LOG` is not set.
///
/// Subsequent calls are ignored.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        registry.with(fmt::layer().with_target(false)).try_init().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_quiets_database() {
        assert_eq!(
            default_directive(Level::DEBUG),
            "debug,surrealdb=warn,surrealdb_core=warn"
        );
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false, Level::INFO);
        init_tracing(true, Level::DEBUG);
    }
}
