// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tether middleware bridge.
//!
//! This crate provides the error type, the endpoint role traits, and the
//! common types shared by plugins (which construct endpoints for concrete
//! message and service types) and the bridge host (which only ever sees the
//! role traits).

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TetherError;
pub use types::{CallHandle, DuplicatePolicy, EndpointKind, Message, TransportHints, TypeName};

pub use traits::{
    Connection, ConnectionHandle, RequestCallback, ServiceClient, ServiceProvider,
    SubscriptionCallback, TopicPublisher, TopicSubscription,
};
