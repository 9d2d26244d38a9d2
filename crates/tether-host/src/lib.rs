// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridge host for Tether.
//!
//! Owns the process-wide [`EndpointFactory`](tether_factory::EndpointFactory)
//! through a [`BridgeContext`], loads [`FactoryPlugin`](tether_factory::FactoryPlugin)s
//! into it, and installs the tracing subscriber.

pub mod context;
pub mod logging;

pub use context::BridgeContext;
pub use logging::{default_directive, init_tracing};
