//! Redirect resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → JSON overlay (overlay.rs)      hit → Redirect(url)
//!     → YAML overlay (overlay.rs)      hit → Redirect(url)
//!     → store mapping (map.rs)         hit → Redirect(url)
//!     → default responder (fallback.rs)    → Respond(body)
//!
//! Chain Assembly (at startup, chain.rs):
//!     Mapping from store + overlay documents
//!     → innermost first, each layer wraps the previous one
//!     → Freeze as immutable Chain
//! ```
//!
//! # Design Decisions
//! - Construction is fallible and happens once; resolution is total
//! - Exact path matching only, no prefixes or patterns
//! - A layer only delegates inward, it never sees deeper layers' data
//! - Immutable after construction (shared across requests without locks)

pub mod chain;
pub mod fallback;
pub mod map;
pub mod overlay;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use chain::{AssembleError, Chain, ChainAssembler, OverlaySource};
pub use fallback::DefaultResponder;
pub use map::MapResolver;
pub use overlay::{DuplicatePolicy, OverlayFormat, ParseError};

/// Path → target table held by a single layer.
pub type Mapping = HashMap<String, String>;

/// A single short path and the target it redirects to.
///
/// The target is opaque: it is never validated or normalized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Redirect {
    pub path: String,
    pub url: String,
}

/// Outcome of resolving a path through the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the client to `target` with a redirection status.
    Redirect(String),
    /// Answer with a fixed success body.
    Respond(String),
}

/// A node of the resolution chain.
pub trait Resolver: Send + Sync + std::fmt::Debug {
    /// Resolve `path` to an action. Never fails.
    fn resolve(&self, path: &str) -> Action;
}
