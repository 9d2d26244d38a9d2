// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit registration interface implemented by every endpoint plugin.
//!
//! A plugin is a compiled unit that knows how to build endpoints for some set
//! of message and service types. Nothing is registered until the host loads
//! the plugin, which calls [`FactoryPlugin::register`] exactly once.

use tether_core::TetherError;

use crate::factory::EndpointFactory;

pub trait FactoryPlugin: Send + Sync {
    /// Unique plugin name, e.g. `"geometry_msgs"`.
    fn name(&self) -> &str;

    fn version(&self) -> semver::Version;

    /// Register every constructor this plugin provides.
    ///
    /// Errors (typically a duplicate registration) abort loading of this
    /// plugin and are surfaced to the host.
    fn register(&self, factory: &EndpointFactory) -> Result<(), TetherError>;
}
