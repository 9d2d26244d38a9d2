// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup.

use tether_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset: `level` for tether crates, `warn` elsewhere.
pub fn default_directive(config: &LoggingConfig) -> String {
    format!("tether={level},warn", level = config.level.trim().to_ascii_lowercase())
}

/// Install the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case the
/// existing one is left in place.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(false)
            .try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_uses_configured_level() {
        let config = LoggingConfig {
            level: " DEBUG ".to_string(),
            json: false,
        };
        assert_eq!(default_directive(&config), "tether=debug,warn");
    }

    #[test]
    fn second_init_keeps_existing_subscriber() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
