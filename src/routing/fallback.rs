//! Terminal node of the resolution chain.

use crate::routing::{Action, Resolver};

/// Default body served for paths no layer knows about.
pub const DEFAULT_BODY: &str = "Hello, world!\n";

/// Answers every path with the same fixed body. Never delegates.
#[derive(Debug, Clone)]
pub struct DefaultResponder {
    body: String,
}

impl DefaultResponder {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Default for DefaultResponder {
    fn default() -> Self {
        Self::new(DEFAULT_BODY)
    }
}

impl Resolver for DefaultResponder {
    fn resolve(&self, path: &str) -> Action {
        tracing::trace!(path = %path, "No layer matched, responding with default body");
        Action::Respond(self.body.clone())
    }
}
