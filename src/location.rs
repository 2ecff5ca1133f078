// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::{Resource, ResourceRef};

/// Recorded position of a resource in the tree.
///
/// The parent is only referenced weakly. The name is the path segment
/// that addressed the resource from its parent and empty for the root.
#[derive(Debug, Clone, Default)]
pub struct Position {
    pub parent: Option<Weak<dyn Resource>>,
    pub name: String,
}

impl Position {
    /// Check if no parent has been recorded.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Position cell embedded by position-aware resources.
///
/// Containers overwrite the position on every retrieval, i.e. it always
/// reflects the most recent traversal that reached the resource. The lock
/// only guards the cell itself, concurrent traversals are ordered by
/// whoever writes last.
#[derive(Debug, Default)]
pub struct Location {
    position: RwLock<Position>,
}

impl Location {
    /// An unplaced location: no parent and an empty name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the parent and the name used to reach the resource.
    pub fn set(&self, parent: Option<&ResourceRef>, name: &str) {
        let mut position = self.position.write();
        position.parent = parent.map(Arc::downgrade);
        if position.name != name {
            position.name = name.to_owned();
        }
    }

    /// Forget the recorded position.
    pub fn clear(&self) {
        self.set(None, "");
    }

    /// Snapshot of the recorded position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position.read().clone()
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.position.read().name.clone()
    }

    /// The recorded parent, if it is still alive.
    #[must_use]
    pub fn parent(&self) -> Option<ResourceRef> {
        self.position.read().parent.as_ref().and_then(Weak::upgrade)
    }
}
