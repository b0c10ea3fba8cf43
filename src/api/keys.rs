//! Cache key derivation.
//!
//! A [`QueryKey`] is the ordered token sequence identifying a cached read.
//! Keys are derived from the request URL so that the read and every
//! invalidation touching it agree on identity without a separate registry.

use std::fmt;

/// Segment dropped from every path; all endpoints live under it.
const API_ROOT_SEGMENT: &str = "api";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Derive a key from a request path with an optional query string.
    ///
    /// Path segments come first (most general to most specific), followed by
    /// the raw `key=value` tokens in their original order. Tokens are not
    /// sorted here; build query strings with
    /// [`QueryParams`](super::QueryParams) to get order-independent keys.
    pub fn from_url(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        let mut segments: Vec<String> = path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != API_ROOT_SEGMENT)
            .map(str::to_owned)
            .collect();

        if let Some(query) = query {
            segments.extend(
                query
                    .split('&')
                    .filter(|token| !token.is_empty())
                    .map(str::to_owned),
            );
        }

        Self(segments)
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Prefix match used by invalidation: `[admin, services]` covers
    /// `[admin, services, list, page=2]`. An empty prefix covers every key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
