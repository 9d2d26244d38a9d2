// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque handle to the middleware node that endpoints are created on.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A live connection to the middleware (a node handle).
///
/// The factory never looks inside a connection; it only forwards it to the
/// registered constructor, which downcasts to the concrete node type it was
/// compiled against.
pub trait Connection: Send + Sync + 'static {
    /// Name of the node, used in diagnostics.
    fn name(&self) -> &str;

    /// Access to the concrete connection type for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Connection {
    /// Downcast to the concrete connection type, if it matches.
    pub fn downcast_ref<T: Connection>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name())
            .finish()
    }
}

/// Shared ownership of a connection, as passed to constructors.
pub type ConnectionHandle = Arc<dyn Connection>;
