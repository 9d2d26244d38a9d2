// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tether bridge.
//!
//! TOML configuration with strict key checking, a file hierarchy, `TETHER_*`
//! environment overrides, and miette diagnostics with typo suggestions.
//!
//! ```no_run
//! use tether_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("duplicate policy: {}", config.factory.duplicate_policy);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{FactoryConfig, LoggingConfig, TetherConfig};

/// Load configuration from the file hierarchy and environment, then validate it.
pub fn load_and_validate() -> Result<TetherConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                duplicate_policy = %config.factory.duplicate_policy,
                log_level = %config.logging.level,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TetherConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read every config file in the hierarchy, for diagnostic source spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG)];
    candidates.extend(loader::user_config_path());
    if let Ok(dir) = std::env::current_dir() {
        candidates.push(dir.join(loader::LOCAL_CONFIG));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
