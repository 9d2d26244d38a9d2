// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by plugins, the endpoint factory, and the bridge host.

use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Fully-qualified name of a message or service type, e.g. `geometry_msgs/Twist`.
///
/// Used as the lookup key in every factory table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(pub String);

impl TypeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        TypeName(value.to_string())
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        TypeName(value)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The four endpoint categories a plugin can provide constructors for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// Topic subscription feeding messages into the bridge.
    Subscription,
    /// Topic publisher fed by the bridge.
    Publisher,
    /// Service client proxy: accepts middleware requests and hands them to the bridge.
    ClientProxy,
    /// Service server proxy: forwards bridge requests to a middleware service.
    ServerProxy,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 4] = [
        EndpointKind::Subscription,
        EndpointKind::Publisher,
        EndpointKind::ClientProxy,
        EndpointKind::ServerProxy,
    ];
}

/// What to do when a second constructor is registered for an existing
/// (kind, type name) pair.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first constructor and fail the second registration.
    #[default]
    Reject,
    /// Overwrite with the newest constructor and log a warning.
    Replace,
}

/// A message crossing the bridge, carried as a dynamically typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Type of the message, matching the factory key that produced the endpoint.
    pub type_name: TypeName,
    /// Field values keyed by field name.
    pub payload: serde_json::Value,
}

impl Message {
    pub fn new(type_name: impl Into<TypeName>, payload: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            payload,
        }
    }
}

/// Transport preferences forwarded untouched to subscription constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportHints {
    /// Disable Nagle's algorithm on TCP transports.
    pub tcp_nodelay: bool,
    /// Prefer an unreliable (datagram) transport when the publisher offers one.
    pub unreliable: bool,
    /// Upper bound on datagram size for unreliable transports.
    pub max_datagram_size: Option<u32>,
}

impl TransportHints {
    pub fn tcp_nodelay(mut self) -> Self {
        self.tcp_nodelay = true;
        self
    }

    pub fn unreliable(mut self) -> Self {
        self.unreliable = true;
        self
    }

    pub fn max_datagram_size(mut self, size: u32) -> Self {
        self.max_datagram_size = Some(size);
        self
    }
}

/// Opaque token correlating a service request with its eventual response.
pub type CallHandle = Arc<dyn Any + Send + Sync>;
