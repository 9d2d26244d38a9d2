// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seam between plugins and the bridge host.

pub mod connection;
pub mod endpoint;

pub use connection::{Connection, ConnectionHandle};
pub use endpoint::{
    RequestCallback, ServiceClient, ServiceProvider, SubscriptionCallback, TopicPublisher,
    TopicSubscription,
};
