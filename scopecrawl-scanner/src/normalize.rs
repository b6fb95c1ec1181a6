//! URL identity for the frontier and the merge pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Canonical identity key for a URL: scheme, host, path and query with the fragment dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a URL for identity comparison.
///
/// Scheme and host are lower-cased by the parser; path and query are kept as they parse,
/// with no percent-decoding and no trailing-slash collapsing. Input that does not parse
/// as an absolute URL is cut at its first `#` and otherwise left alone.
pub fn normalize_url(raw: &str) -> NormalizedUrl {
    match Url::parse(raw.trim()) {
        Ok(mut url) => {
            url.set_fragment(None);
            NormalizedUrl(url.to_string())
        }
        Err(_) => {
            let without_fragment = raw.split('#').next().unwrap_or(raw);
            NormalizedUrl(without_fragment.to_string())
        }
    }
}

/// Non-empty path segments of a URL, in order. Unparsable input has no segments.
pub fn path_segments(raw: &str) -> Vec<String> {
    Url::parse(raw)
        .map(|url| {
            url.path()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
