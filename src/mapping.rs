// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use thiserror::Error;

use crate::{Container, HashMap, Location, Resource, ResourceRef};

/// Constructor of a child with a static name.
///
/// Receives the requested name.
pub type Factory = Arc<dyn Fn(&str) -> ResourceRef + Send + Sync>;

/// Probe whether a dynamic rule applies to a name.
pub type RuleMatcher = Arc<dyn Fn(&str) -> Option<ResourceRef> + Send + Sync>;

/// Post-process the resource produced by a [`RuleMatcher`].
///
/// Returns a replacement or `None` for keeping the matched resource.
pub type RuleFactory = Arc<dyn Fn(&ResourceRef) -> Option<ResourceRef> + Send + Sync>;

#[derive(Debug, Error)]
#[error("child \"{name}\" is not position-aware")]
pub struct InvalidResourceError {
    pub name: String,
    pub resource: ResourceRef,
}

struct Rule {
    matcher: RuleMatcher,
    factory: RuleFactory,
}

/// Directory resource with eager, static, and dynamic children.
///
/// Children are resolved in the following order:
///
/// 1. Eagerly inserted children
/// 2. Static factories, by exact name
/// 3. Dynamic rules, in registration order
///
/// Children produced by factories or rules are materialized at most once
/// per name and cached for the lifetime of the mapping.
///
/// Factories and rules are invoked without holding any lock, i.e. they may
/// resolve children of this or any other mapping. If concurrent lookups
/// materialize the same name, the child cached first is returned to
/// all of them.
#[derive(Default)]
pub struct ResourceMapping {
    location: Location,
    children: HashMap<String, ResourceRef>,
    factories: HashMap<String, Factory>,
    rules: Vec<Rule>,
    resolved: Mutex<HashMap<String, ResourceRef>>,
}

impl fmt::Debug for ResourceMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut factory_names = self.factories.keys().collect::<Vec<_>>();
        factory_names.sort_unstable();
        f.debug_struct("ResourceMapping")
            .field("location", &self.location)
            .field("children", &self.children)
            .field("factories", &factory_names)
            .field("rules", &self.rules.len())
            .field("resolved", &*self.resolved.lock())
            .finish()
    }
}

impl ResourceMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an eager child.
    ///
    /// Only position-aware resources are accepted. Replaces an existing
    /// child with the same name.
    ///
    /// # Errors
    ///
    /// Fails if the resource is not position-aware. The rejected resource
    /// is returned back to the caller.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        resource: ResourceRef,
    ) -> Result<(), InvalidResourceError> {
        let name = name.into();
        if resource.location().is_none() {
            return Err(InvalidResourceError { name, resource });
        }
        log::debug!("Inserting child {name:?}");
        self.children.insert(name, resource);
        Ok(())
    }

    /// Builder variant of [`Self::insert()`].
    pub fn with_child(
        mut self,
        name: impl Into<String>,
        resource: ResourceRef,
    ) -> Result<Self, InvalidResourceError> {
        self.insert(name, resource)?;
        Ok(self)
    }

    /// Register a constructor for a child with a static name.
    ///
    /// The constructor is invoked on first access with the requested name.
    pub fn add_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&str) -> ResourceRef + Send + Sync + 'static,
    ) {
        let name = name.into();
        // A stale child must not shadow the new factory.
        self.resolved.get_mut().remove(&name);
        self.factories.insert(name, Arc::new(factory));
    }

    /// Register a dynamic rule.
    ///
    /// The `matcher` rejects inapplicable names by returning `None`. The
    /// `factory` may replace the matched resource before it is cached.
    pub fn add_rule(
        &mut self,
        matcher: impl Fn(&str) -> Option<ResourceRef> + Send + Sync + 'static,
        factory: impl Fn(&ResourceRef) -> Option<ResourceRef> + Send + Sync + 'static,
    ) {
        self.rules.push(Rule {
            matcher: Arc::new(matcher),
            factory: Arc::new(factory),
        });
    }

    /// Register a dynamic rule that caches the matched resource as is.
    pub fn add_matcher(
        &mut self,
        matcher: impl Fn(&str) -> Option<ResourceRef> + Send + Sync + 'static,
    ) {
        self.add_rule(matcher, |_| None);
    }

    /// Number of children materialized by factories and rules so far.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.lock().len()
    }

    fn resolve(&self, name: &str) -> Option<ResourceRef> {
        if let Some(child) = self.children.get(name) {
            return Some(Arc::clone(child));
        }
        let cached = self.resolved.lock().get(name).map(Arc::clone);
        if let Some(child) = cached {
            log::debug!("Found cached child {name:?}");
            return Some(child);
        }
        let child = self.materialize(name)?;
        let mut resolved = self.resolved.lock();
        if let Some(cached) = resolved.get(name) {
            log::debug!("Discarding child {name:?} materialized concurrently");
            return Some(Arc::clone(cached));
        }
        resolved.insert(name.to_owned(), Arc::clone(&child));
        Some(child)
    }

    fn materialize(&self, name: &str) -> Option<ResourceRef> {
        if let Some(factory) = self.factories.get(name) {
            log::debug!("Constructing static child {name:?}");
            return Some(factory(name));
        }
        let (index, child) = self.rules.iter().enumerate().find_map(|(index, rule)| {
            let matched = (rule.matcher)(name)?;
            let child = (rule.factory)(&matched).unwrap_or(matched);
            Some((index, child))
        })?;
        log::debug!("Resolved dynamic child {name:?} with rule #{index}");
        Some(child)
    }
}

impl Container for ResourceMapping {
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    fn lookup(&self, name: &str) -> Option<ResourceRef> {
        self.resolve(name)
    }
}

impl Resource for ResourceMapping {
    fn container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn location(&self) -> Option<&Location> {
        Some(&self.location)
    }
}
