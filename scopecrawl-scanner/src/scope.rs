//! Path-prefix scope derived from the seed URL.

use crate::normalize::path_segments;

/// Path-prefix constraint limiting which discovered links are fetched.
///
/// `depth` is the configured filter depth; `prefix` is up to `depth` leading path segments of
/// the seed joined by `/`. A missing prefix admits everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRule {
    depth: usize,
    prefix: Option<String>,
}

impl ScopeRule {
    /// A rule that admits every URL.
    pub fn unrestricted() -> Self {
        Self {
            depth: 0,
            prefix: None,
        }
    }

    pub fn from_seed(seed: &str, depth: usize) -> Self {
        if depth == 0 {
            return Self::unrestricted();
        }

        let segments = path_segments(seed);
        if segments.is_empty() {
            return Self::unrestricted();
        }

        let take = depth.min(segments.len());
        Self {
            depth,
            prefix: Some(segments[..take].join("/")),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.prefix.is_none()
    }

    /// Whether `url` falls inside this scope.
    ///
    /// With depth >= 2 a URL shorter than the rule is admitted when its whole path is a
    /// leading portion of the rule, so listing pages above the target level stay reachable.
    pub fn matches(&self, url: &str) -> bool {
        let Some(prefix) = self.prefix.as_deref() else {
            return true;
        };

        let segments = path_segments(url);

        if self.depth == 1 {
            return segments.first().is_some_and(|first| first == prefix);
        }

        if segments.len() >= self.depth {
            segments[..self.depth].join("/") == prefix
        } else {
            let url_path = segments.join("/");
            url_path == prefix || prefix.starts_with(&format!("{}/", url_path))
        }
    }
}

impl Default for ScopeRule {
    fn default() -> Self {
        Self::unrestricted()
    }
}
