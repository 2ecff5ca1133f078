// SPDX-FileCopyrightText: The resource-router authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

/// Request-like value that may provide a URI.
pub trait UriSource {
    /// The URI of the request, if any.
    fn uri(&self) -> Option<Cow<'_, str>>;
}

impl UriSource for str {
    fn uri(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl UriSource for String {
    fn uri(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: UriSource> UriSource for Option<T> {
    fn uri(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(UriSource::uri)
    }
}

const PATH_SEPARATOR: char = '/';

/// Split a URI into path segments.
///
/// A literal `prefix` is stripped if the URI starts with it. Empty segments
/// from leading, trailing, or repeated separators are skipped.
pub(crate) fn path_segments<'a>(uri: &'a str, prefix: &str) -> impl Iterator<Item = &'a str> {
    let path = if prefix.is_empty() {
        uri
    } else {
        uri.strip_prefix(prefix).unwrap_or(uri)
    };
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty())
}
