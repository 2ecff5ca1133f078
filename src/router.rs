// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::fmt;

use thiserror::Error;

use crate::{
    assemble, match_route, request::path_segments, traverse, AssembleError, AssembleFn,
    ContextFilter, MatchFn, ResourceRef, Route, TraverseFn, Traversal, UriSource,
};

#[derive(Debug, Error)]
pub enum MatchError {
    /// No route accepts the traversed context and the leftover name.
    #[error("route not found")]
    RouteNotFound {
        /// The leftover name.
        name: String,
        traversed: Vec<String>,
    },

    /// The request could not provide a URI.
    #[error("could not find URI in the request")]
    InvalidRequest,
}

/// A successfully matched route.
#[derive(Debug, Clone)]
pub struct Matched<'r, H> {
    pub route: &'r H,
    pub context: ResourceRef,

    /// The leftover name that selected the route.
    pub name: String,
    pub traversed: Vec<String>,
    pub after: Vec<String>,

    /// Ancestors of the context, starting with the root.
    ///
    /// Holding the match keeps the lineage of the context alive for
    /// [`Router::assemble()`].
    pub lineage: Vec<ResourceRef>,
}

/// Resolves paths into a context and a route, and vice versa.
///
/// Routes are tested in registration order, the first matching
/// route wins.
pub struct Router<H> {
    root: ResourceRef,
    routes: Vec<Route<H>>,
    traverser: TraverseFn,
    matcher: MatchFn<H>,
    assembler: AssembleFn,
}

impl<H: fmt::Debug> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("root", &self.root)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl<H> Router<H> {
    /// Create a router with the default strategies.
    #[must_use]
    pub fn new(root: ResourceRef) -> Self {
        Self {
            root,
            routes: Vec::new(),
            traverser: traverse,
            matcher: match_route::<H>,
            assembler: assemble,
        }
    }

    #[must_use]
    pub fn with_traverser(mut self, traverser: TraverseFn) -> Self {
        self.traverser = traverser;
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: MatchFn<H>) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn with_assembler(mut self, assembler: AssembleFn) -> Self {
        self.assembler = assembler;
        self
    }

    #[must_use]
    pub const fn root(&self) -> &ResourceRef {
        &self.root
    }

    #[must_use]
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    /// Append a route.
    ///
    /// Duplicate or overlapping routes are permitted.
    pub fn add_route(&mut self, handler: H, context: ContextFilter, name: impl Into<String>) {
        self.routes.push(Route {
            handler,
            context,
            name: name.into(),
        });
    }

    /// Traverse the tree along `segments` and select a route for the result.
    ///
    /// The position of the matched context is overwritten with the last
    /// step of the traversal. Assembling the context afterwards yields
    /// the consumed segments.
    ///
    /// # Errors
    ///
    /// Fails with [`MatchError::RouteNotFound`] if no route matches.
    pub fn match_segments<S: AsRef<str>>(
        &self,
        segments: &[S],
    ) -> Result<Matched<'_, H>, MatchError> {
        let segments = segments.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>();
        let Traversal {
            context,
            name,
            traversed,
            after,
            last,
            lineage,
        } = (self.traverser)(&self.root, &segments);
        let Some(route) = (self.matcher)(&self.routes, &*context, &name) else {
            return Err(MatchError::RouteNotFound { name, traversed });
        };
        if let Some(location) = context.location() {
            log::debug!("Placing context below {name:?}", name = last.name);
            location.set(last.parent.as_ref(), &last.name);
        }
        Ok(Matched {
            route: &route.handler,
            context,
            name,
            traversed,
            after,
            lineage,
        })
    }

    /// Extract the path from a request and match it.
    ///
    /// A non-empty `prefix` is stripped from the start of the URI.
    ///
    /// # Errors
    ///
    /// Fails with [`MatchError::InvalidRequest`] if the request provides
    /// no URI, otherwise like [`Self::match_segments()`].
    pub fn match_request<R>(&self, request: &R, prefix: &str) -> Result<Matched<'_, H>, MatchError>
    where
        R: UriSource + ?Sized,
    {
        let uri = request.uri().ok_or(MatchError::InvalidRequest)?;
        let segments = path_segments(&uri, prefix).collect::<Vec<_>>();
        self.match_segments(&segments)
    }

    /// Reconstruct the path segments of a resource.
    ///
    /// # Errors
    ///
    /// Fails if the lineage of the resource is not entirely position-aware.
    pub fn assemble(&self, resource: &ResourceRef) -> Result<Vec<String>, AssembleError> {
        (self.assembler)(resource)
    }

    /// Reconstruct the path segments of a resource and append `extra`.
    ///
    /// # Errors
    ///
    /// See [`Self::assemble()`].
    pub fn assemble_with<I>(
        &self,
        resource: &ResourceRef,
        extra: I,
    ) -> Result<Vec<String>, AssembleError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut segments = self.assemble(resource)?;
        segments.extend(extra.into_iter().map(Into::into));
        Ok(segments)
    }
}
