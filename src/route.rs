// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    any::{type_name, Any, TypeId},
    fmt,
    sync::Arc,
};

use crate::{AsAny, Resource};

/// Strategy for selecting a route, see [`match_route()`].
pub type MatchFn<H> = for<'r> fn(&'r [Route<H>], &dyn Resource, &str) -> Option<&'r Route<H>>;

/// Application-defined test of a context.
pub type ContextPredicate = Arc<dyn Fn(&dyn Resource) -> bool + Send + Sync>;

/// Restriction on the context of a route.
#[derive(Clone, derive_more::Display)]
pub enum ContextFilter {
    /// Any context.
    #[display(fmt = "*")]
    Any,

    /// Contexts of exactly this type.
    #[display(fmt = "{}", type_name)]
    Type {
        type_id: TypeId,
        type_name: &'static str,
    },

    /// Contexts accepted by the predicate, e.g. for checking capabilities
    /// shared by multiple types.
    #[display(fmt = "<predicate>")]
    Predicate(ContextPredicate),
}

impl ContextFilter {
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self::Type {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    #[must_use]
    pub fn matching(predicate: impl Fn(&dyn Resource) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    #[must_use]
    pub fn accepts(&self, context: &dyn Resource) -> bool {
        match self {
            Self::Any => true,
            Self::Type { type_id, .. } => Any::type_id(AsAny::as_any(context)) == *type_id,
            Self::Predicate(predicate) => predicate(context),
        }
    }
}

impl fmt::Debug for ContextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextFilter({self})")
    }
}

/// Registered route.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub handler: H,
    pub context: ContextFilter,

    /// The leftover segment, empty for matching the context itself.
    pub name: String,
}

impl<H> Route<H> {
    #[must_use]
    pub fn accepts(&self, context: &dyn Resource, name: &str) -> bool {
        self.name == name && self.context.accepts(context)
    }
}

/// Find the first route that accepts the context and the leftover name.
///
/// Routes are tested in registration order. Overlapping routes are
/// resolved by order, not by specificity.
#[must_use]
pub fn match_route<'r, H>(
    routes: &'r [Route<H>],
    context: &dyn Resource,
    name: &str,
) -> Option<&'r Route<H>> {
    let route = routes.iter().find(|route| route.accepts(context, name));
    if let Some(route) = route {
        log::debug!(
            "Matched route ({context_filter}, {name:?})",
            context_filter = route.context
        );
    } else {
        log::debug!("No route for name {name:?} and context {context:?}");
    }
    route
}
