// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application context for a running bridge.
//!
//! `BridgeContext` owns the one endpoint factory of the process and is the
//! only place plugins get loaded. Endpoint creation goes through
//! [`BridgeContext::factory`].

use std::sync::Arc;

use tether_config::TetherConfig;
use tether_core::TetherError;
use tether_factory::{EndpointFactory, FactoryPlugin};
use tracing::{info, warn};

pub struct BridgeContext {
    config: TetherConfig,
    factory: Arc<EndpointFactory>,
    loaded: Vec<String>,
}

impl BridgeContext {
    /// Create a context with an empty factory configured from `config`.
    pub fn new(config: TetherConfig) -> Self {
        let factory = Arc::new(EndpointFactory::new(config.factory.duplicate_policy));
        info!(
            duplicate_policy = %factory.policy(),
            "endpoint factory created"
        );
        Self {
            config,
            factory,
            loaded: Vec::new(),
        }
    }

    pub fn config(&self) -> &TetherConfig {
        &self.config
    }

    /// The factory shared by every plugin and the bridge host.
    pub fn factory(&self) -> &Arc<EndpointFactory> {
        &self.factory
    }

    /// Names of loaded plugins, in load order.
    pub fn loaded_plugins(&self) -> &[String] {
        &self.loaded
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|loaded| loaded == name)
    }

    /// Run `plugin`'s registration against this context's factory.
    ///
    /// A plugin name can be loaded once. If registration fails the plugin is
    /// not marked loaded, but constructors it registered before the failure
    /// remain in the factory.
    ///
    /// The load is logged with `registered` (constructors the plugin
    /// installed, replacements included) and `net_new` (growth of the
    /// factory). Both are measured on the shared factory, so registrations
    /// made concurrently through another handle are counted too.
    pub fn load_plugin(&mut self, plugin: &dyn FactoryPlugin) -> Result<(), TetherError> {
        let name = plugin.name();
        if self.is_loaded(name) {
            return Err(TetherError::PluginAlreadyLoaded {
                name: name.to_string(),
            });
        }

        let registered_before = self.factory.registrations();
        let total_before = self.factory.summary().total();
        if let Err(e) = plugin.register(&self.factory) {
            warn!(plugin = name, error = %e, "plugin registration failed");
            return Err(e);
        }
        let registered = self.factory.registrations() - registered_before;
        let net_new = self.factory.summary().total().saturating_sub(total_before);

        info!(
            plugin = name,
            version = %plugin.version(),
            registered,
            net_new,
            "loaded factory plugin"
        );
        self.loaded.push(name.to_string());
        Ok(())
    }

    /// Load plugins in order, stopping at the first failure.
    pub fn load_plugins<'a, I>(&mut self, plugins: I) -> Result<(), TetherError>
    where
        I: IntoIterator<Item = &'a dyn FactoryPlugin>,
    {
        for plugin in plugins {
            self.load_plugin(plugin)?;
        }
        Ok(())
    }
}

impl Default for BridgeContext {
    fn default() -> Self {
        Self::new(TetherConfig::default())
    }
}
