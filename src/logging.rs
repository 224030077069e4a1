//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured level. Output goes to
//! stderr so rendered views on stdout stay clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directive for the configured level
pub fn default_directive(config: &LoggingConfig) -> String {
    format!("finadmin={}", config.level.trim().to_lowercase())
}

/// Install the global tracing subscriber
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))
        .unwrap_or_else(|_| EnvFilter::new("finadmin=warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let config = LoggingConfig {
            level: " DEBUG ".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(default_directive(&config), "finadmin=debug");
        assert!(EnvFilter::try_new(default_directive(&LoggingConfig::default())).is_ok());
    }
}
