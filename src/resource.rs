// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::{any::Any, fmt, sync::Arc};

use crate::Location;

/// Shared, type-erased resource.
pub type ResourceRef = Arc<dyn Resource>;

/// Access to the concrete type behind a trait object.
///
/// Implemented for all `'static` types, no need to implement it manually.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A node in the traversable tree.
///
/// Any value may act as a context. Both capabilities are optional:
///
/// - [`Resource::container()`] for being indexed by path segments
/// - [`Resource::location()`] for being position-aware, required by
///   [`assemble()`](crate::assemble)
pub trait Resource: AsAny + fmt::Debug + Send + Sync + 'static {
    /// The child lookup capability.
    fn container(&self) -> Option<&dyn Container> {
        None
    }

    /// The recorded position in the tree.
    fn location(&self) -> Option<&Location> {
        None
    }
}

impl dyn Resource {
    /// Check the concrete type of the resource.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }
}

/// String-keyed container of child resources.
pub trait Container {
    /// Existence test.
    ///
    /// May materialize and cache the child as a side effect.
    fn contains(&self, name: &str) -> bool;

    /// Plain lookup without recording the position of the child.
    ///
    /// Use [`child()`] for position-stamping retrieval.
    fn lookup(&self, name: &str) -> Option<ResourceRef>;
}

/// Retrieve a child and stamp it with its position.
///
/// Returns `None` if `parent` is not a container or doesn't provide
/// a child for `name`. Children that are not position-aware are returned
/// unmodified.
#[must_use]
pub fn child(parent: &ResourceRef, name: &str) -> Option<ResourceRef> {
    let child = parent.container()?.lookup(name)?;
    if let Some(location) = child.location() {
        location.set(Some(parent), name);
    }
    Some(child)
}

/// Position-aware leaf wrapping an arbitrary domain value.
#[derive(Debug, Default, derive_more::Deref)]
pub struct Located<T> {
    #[deref]
    value: T,
    location: Location,
}

impl<T> Located<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            location: Location::new(),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Resource for Located<T>
where
    T: fmt::Debug + Send + Sync + 'static,
{
    fn location(&self) -> Option<&Location> {
        Some(&self.location)
    }
}
