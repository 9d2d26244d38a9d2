// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tether bridge.

use thiserror::Error;

use crate::types::{EndpointKind, TypeName};

/// The primary error type used across factory registration, endpoint
/// construction, and the endpoint role traits.
///
/// An unknown type name at creation time is *not* an error; `create_*`
/// entry points report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TetherError {
    /// Configuration errors (invalid TOML, unknown keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Two registrations claimed the same type name within one endpoint kind.
    #[error("a {kind} factory is already registered for type `{type_name}`")]
    DuplicateFactory {
        kind: EndpointKind,
        type_name: TypeName,
    },

    /// A registered constructor could not build its endpoint.
    #[error("failed to construct {kind} for type `{type_name}`: {message}")]
    Construction {
        kind: EndpointKind,
        type_name: TypeName,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Runtime arguments rejected by a constructor or endpoint.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A plugin with the same name was already loaded into this bridge.
    #[error("plugin `{name}` is already loaded")]
    PluginAlreadyLoaded { name: String },

    /// A publisher could not hand a message to the middleware.
    #[error("publish failed on topic `{topic}`: {message}")]
    Publish { topic: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TetherError {
    /// Shorthand for a [`TetherError::Construction`] without an underlying cause.
    pub fn construction(
        kind: EndpointKind,
        type_name: impl Into<TypeName>,
        message: impl Into<String>,
    ) -> Self {
        TetherError::Construction {
            kind,
            type_name: type_name.into(),
            message: message.into(),
            source: None,
        }
    }
}
