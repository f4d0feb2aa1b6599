//! Exact-match lookup over an in-memory mapping.
//!
//! # Responsibilities
//! - Hold one immutable `Mapping` and a fallback resolver
//! - Answer hits with `Action::Redirect`
//! - Delegate misses to the fallback unchanged

use std::sync::Arc;

use crate::routing::{Action, Mapping, Resolver};

/// Resolver backed by a fixed `path → url` table.
#[derive(Debug)]
pub struct MapResolver {
    /// Layer label for logging ("store", "yaml", ...).
    layer: String,
    routes: Mapping,
    fallback: Arc<dyn Resolver>,
}

impl MapResolver {
    /// Create a resolver over `routes` that defers misses to `fallback`.
    pub fn new(layer: impl Into<String>, routes: Mapping, fallback: Arc<dyn Resolver>) -> Self {
        Self {
            layer: layer.into(),
            routes,
            fallback,
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Number of paths this layer answers itself.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, path: &str) -> Action {
        match self.routes.get(path) {
            Some(url) => {
                tracing::trace!(layer = %self.layer, path = %path, target = %url, "Path matched");
                Action::Redirect(url.clone())
            }
            None => self.fallback.resolve(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::DefaultResponder;

    fn responder() -> Arc<dyn Resolver> {
        Arc::new(DefaultResponder::new("fallback"))
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(p, u)| (p.to_string(), u.to_string()))
            .collect()
    }

    #[test]
    fn test_hit_redirects() {
        let resolver = MapResolver::new(
            "store",
            mapping(&[("/docs", "https://docs.example")]),
            responder(),
        );

        assert_eq!(
            resolver.resolve("/docs"),
            Action::Redirect("https://docs.example".into())
        );
    }

    #[test]
    fn test_miss_delegates_to_fallback() {
        let resolver = MapResolver::new(
            "store",
            mapping(&[("/docs", "https://docs.example")]),
            responder(),
        );

        assert_eq!(resolver.resolve("/other"), Action::Respond("fallback".into()));
        // Exact match only
        assert_eq!(resolver.resolve("/docs/"), Action::Respond("fallback".into()));
        assert_eq!(resolver.resolve("/DOCS"), Action::Respond("fallback".into()));
    }

    #[test]
    fn test_empty_mapping_always_defers() {
        let resolver = MapResolver::new("empty", Mapping::new(), responder());

        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve("/"), Action::Respond("fallback".into()));
    }

    #[test]
    fn test_fallback_result_is_returned_unchanged() {
        let inner: Arc<dyn Resolver> = Arc::new(MapResolver::new(
            "inner",
            mapping(&[("/b", "https://inner.example")]),
            responder(),
        ));
        let outer = MapResolver::new("outer", mapping(&[("/a", "https://outer.example")]), inner);

        assert_eq!(outer.resolve("/b"), Action::Redirect("https://inner.example".into()));
    }
}
