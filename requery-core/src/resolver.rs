//! Base-origin URL resolution.

// ============================================================================
// Url Resolver
// ============================================================================

/// Resolves request paths against a configured base origin.
///
/// Inputs that already carry an `http://` or `https://` scheme pass through
/// unchanged; everything else is joined to the base with exactly one slash.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: String,
}

impl UrlResolver {
    /// Creates a resolver for the given base origin.
    ///
    /// A trailing slash on the base is stripped so the join point always
    /// carries exactly one slash.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base origin.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolves a path or full URL to a full URL.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_passes_through() {
        let resolver = UrlResolver::new("http://h");
        assert_eq!(resolver.resolve("https://x/y"), "https://x/y");
        assert_eq!(resolver.resolve("http://other:9090/z"), "http://other:9090/z");
    }

    #[test]
    fn test_relative_path_joins_base() {
        let resolver = UrlResolver::new("http://h");
        assert_eq!(resolver.resolve("users"), "http://h/users");
        assert_eq!(resolver.resolve("/users"), "http://h/users");
    }

    #[test]
    fn test_slash_normalization() {
        let resolver = UrlResolver::new("http://h/");
        assert_eq!(resolver.resolve("users"), "http://h/users");
        assert_eq!(resolver.resolve("/users"), "http://h/users");
    }
}
