// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

//! Traversal-based routing over a tree of position-aware resources.
//!
//! A path is resolved by walking its segments through the tree until a
//! segment cannot be consumed. The resource reached at that point and the
//! leftover segment then select a registered route. Resources that record
//! their position can be turned back into a path.

mod assemble;
pub use self::assemble::{assemble, AssembleError, AssembleFn};

mod location;
pub use self::location::{Location, Position};

mod mapping;
pub use self::mapping::{Factory, InvalidResourceError, ResourceMapping, RuleFactory, RuleMatcher};

mod request;
pub use self::request::UriSource;

mod resource;
pub use self::resource::{child, AsAny, Container, Located, Resource, ResourceRef};

mod route;
pub use self::route::{match_route, ContextFilter, ContextPredicate, MatchFn, Route};

mod router;
pub use self::router::{MatchError, Matched, Router};

mod traverse;
pub use self::traverse::{traverse, LastStep, TraverseFn, Traversal};

#[cfg(feature = "im")]
type HashMap<K, V> = im::HashMap<K, V>;

#[cfg(not(feature = "im"))]
type HashMap<K, V> = std::collections::HashMap<K, V>;
