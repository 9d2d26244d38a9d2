// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup: `./tether.toml` > `~/.config/tether/tether.toml` > `/etc/tether/tether.toml`,
//! with `TETHER_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TetherConfig;

pub(crate) const LOCAL_CONFIG: &str = "tether.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/tether/tether.toml";

/// Location of the per-user config file, if a config directory exists.
pub(crate) fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("tether/tether.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tether/tether.toml`
/// 3. `~/.config/tether/tether.toml`
/// 4. `./tether.toml`
/// 5. `TETHER_*` environment variables
pub fn load_config() -> Result<TetherConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. Environment is ignored.
pub fn load_config_from_str(toml_content: &str) -> Result<TetherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TetherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Map `TETHER_SECTION_KEY` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `TETHER_FACTORY_DUPLICATE_POLICY` maps to `factory.duplicate_policy`.
fn env_provider() -> Env {
    Env::prefixed("TETHER_").map(|key| {
        // Keys arrive in their original case.
        let lowered = key.as_str().to_ascii_lowercase();
        let mapped = lowered
            .replacen("factory_", "factory.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
