// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tether integration tests.
//!
//! - [`MockConnection`] - named stand-in for a middleware node
//! - [`mock_endpoints`] - capturing implementations of the four endpoint roles
//! - [`RecordingPlugin`] - plugin whose constructors record their arguments

pub mod mock_connection;
pub mod mock_endpoints;
pub mod recording;

pub use mock_connection::MockConnection;
pub use mock_endpoints::{MockPublisher, MockServiceClient, MockServiceProvider, MockSubscription};
pub use recording::{ConstructionLog, ConstructionRecord, RecordingPlugin};
