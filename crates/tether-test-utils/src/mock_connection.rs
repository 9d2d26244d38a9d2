// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A stand-in middleware node.

use std::any::Any;
use std::sync::Arc;

use tether_core::{Connection, ConnectionHandle};

/// Connection that only carries a node name.
#[derive(Debug, Clone)]
pub struct MockConnection {
    name: String,
}

impl MockConnection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Wrap into the shared handle constructors receive.
    pub fn handle(name: impl Into<String>) -> ConnectionHandle {
        Arc::new(Self::new(name))
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::new("mock_node")
    }
}

impl Connection for MockConnection {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
