// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::Arc;

use crate::{child, ResourceRef};

/// Strategy for walking the tree, see [`traverse()`].
pub type TraverseFn = fn(&ResourceRef, &[&str]) -> Traversal;

/// The last step taken before traversal stopped.
///
/// Both the parent and the name are empty if no step has been taken.
#[derive(Debug, Clone, Default)]
pub struct LastStep {
    pub parent: Option<ResourceRef>,
    pub name: String,
}

/// Outcome of a single traversal.
#[derive(Debug, Clone)]
pub struct Traversal {
    /// The resource reached when traversal stopped.
    pub context: ResourceRef,

    /// The first segment that could not be consumed.
    ///
    /// Empty if all segments have been consumed.
    pub name: String,

    /// Segments consumed while walking the tree.
    pub traversed: Vec<String>,

    /// Segments left over, starting with [`Self::name`].
    pub after: Vec<String>,

    /// Parent of [`Self::context`] and the name that addressed it.
    pub last: LastStep,

    /// Strong references to all resources passed on the way to
    /// [`Self::context`], starting with the root.
    ///
    /// Keeps ancestors alive that are only referenced weakly by the
    /// recorded positions, e.g. children built anew on every lookup.
    pub lineage: Vec<ResourceRef>,
}

impl Traversal {
    /// Check if all segments have been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.name.is_empty() && self.after.is_empty()
    }
}

fn to_owned_segments(segments: &[&str]) -> Vec<String> {
    segments.iter().copied().map(ToOwned::to_owned).collect()
}

/// Walk the tree from `root` along `segments`.
///
/// Traversal stops before the first segment that the current resource
/// doesn't provide a child for, either because it is not a container or
/// because the child is missing. Stopping is not an error.
#[must_use]
pub fn traverse(root: &ResourceRef, segments: &[&str]) -> Traversal {
    let mut current = Arc::clone(root);
    let mut last = LastStep::default();
    let mut lineage = Vec::with_capacity(segments.len());
    for (index, &segment) in segments.iter().enumerate() {
        let next = current
            .container()
            .filter(|container| container.contains(segment))
            .and_then(|_| {
                let next = child(&current, segment);
                if next.is_none() {
                    log::warn!("Container reported child {segment:?} but failed to provide it");
                }
                next
            });
        let Some(next) = next else {
            log::debug!(
                "Stopped traversal at segment {segment:?} after {index} of {count} segment(s)",
                count = segments.len()
            );
            return Traversal {
                context: current,
                name: segment.to_owned(),
                traversed: to_owned_segments(&segments[..index]),
                after: to_owned_segments(&segments[index..]),
                last,
                lineage,
            };
        };
        lineage.push(Arc::clone(&current));
        last = LastStep {
            parent: Some(current),
            name: segment.to_owned(),
        };
        current = next;
    }
    log::debug!("Traversed all {count} segment(s)", count = segments.len());
    Traversal {
        context: current,
        name: String::new(),
        traversed: to_owned_segments(segments),
        after: Vec::new(),
        last,
        lineage,
    }
}
