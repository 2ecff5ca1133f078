// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::{collections::HashSet, sync::Arc};

use thiserror::Error;

use crate::ResourceRef;

/// Strategy for reconstructing a path, see [`assemble()`].
pub type AssembleFn = fn(&ResourceRef) -> Result<Vec<String>, AssembleError>;

/// The lineage of a resource could not be turned into a path.
///
/// Indicates a tree that has not been built entirely from
/// position-aware resources.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The resource at the given distance from the start is not
    /// position-aware.
    #[error("resource at depth {depth} is not position-aware")]
    NotLocationAware { depth: usize },

    /// A recorded parent has already been dropped.
    #[error("parent of resource \"{name}\" has been dropped")]
    DetachedParent { name: String },

    /// The chain of recorded parents loops back on itself.
    #[error("cyclic lineage at resource \"{name}\"")]
    Cycle { name: String },
}

/// Reconstruct the path segments that lead to `resource`.
///
/// Follows the recorded parents up to the root. Empty names are omitted.
///
/// # Errors
///
/// Fails if any resource in the lineage is not position-aware or if the
/// lineage is broken.
pub fn assemble(resource: &ResourceRef) -> Result<Vec<String>, AssembleError> {
    let mut names = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(Arc::clone(resource));
    while let Some(current) = next.take() {
        let depth = visited.len();
        let Some(location) = current.location() else {
            return Err(AssembleError::NotLocationAware { depth });
        };
        let position = location.position();
        if !visited.insert(Arc::as_ptr(&current).cast::<()>()) {
            return Err(AssembleError::Cycle {
                name: position.name,
            });
        }
        if let Some(parent) = &position.parent {
            let Some(parent) = parent.upgrade() else {
                return Err(AssembleError::DetachedParent {
                    name: position.name,
                });
            };
            next = Some(parent);
        }
        if !position.name.is_empty() {
            names.push(position.name);
        }
    }
    names.reverse();
    log::debug!("Assembled path {names:?}");
    Ok(names)
}
