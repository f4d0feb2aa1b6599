//! Boot-time composition of the resolution chain.
//!
//! # Responsibilities
//! - Wrap the default responder with the store mapping
//! - Stack each overlay on top, innermost first
//! - Hand back one immutable entry point
//!
//! No I/O happens here: the store mapping and overlay bytes arrive already
//! loaded (see `lifecycle::startup`).

use std::sync::Arc;

use thiserror::Error;

use crate::routing::overlay::{self, DuplicatePolicy, OverlayFormat, ParseError};
use crate::routing::{Action, DefaultResponder, MapResolver, Mapping, Resolver};

/// An overlay document that failed to build.
#[derive(Debug, Error)]
#[error("overlay `{origin}` could not be built: {source}")]
pub struct AssembleError {
    /// Where the document came from (usually its file path).
    pub origin: String,
    #[source]
    pub source: ParseError,
}

/// One overlay document ready to be stacked onto the chain.
#[derive(Debug, Clone, Copy)]
pub struct OverlaySource<'a> {
    pub origin: &'a str,
    pub format: OverlayFormat,
    pub document: &'a [u8],
}

/// The assembled chain. Cheap to clone, safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Chain {
    entry: Arc<dyn Resolver>,
    depth: usize,
}

impl Chain {
    /// Number of nodes, the default responder included.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Resolver for Chain {
    fn resolve(&self, path: &str) -> Action {
        self.entry.resolve(path)
    }
}

/// Builds a [`Chain`] from a store mapping and a list of overlays.
#[derive(Debug, Clone)]
pub struct ChainAssembler {
    responder: DefaultResponder,
    duplicates: DuplicatePolicy,
}

impl ChainAssembler {
    pub fn new(responder: DefaultResponder) -> Self {
        Self {
            responder,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Assemble the chain. Overlays are applied in order, so the last one is
    /// consulted first. Nothing is returned unless every overlay builds.
    pub fn assemble(&self, routes: Mapping, overlays: &[OverlaySource<'_>]) -> Result<Chain, AssembleError> {
        let mut entry: Arc<dyn Resolver> = Arc::new(self.responder.clone());
        let mut depth = 1;

        let store = MapResolver::new("store", routes, entry);
        tracing::info!(layer = "store", entries = store.len(), "Chain layer built");
        entry = Arc::new(store);
        depth += 1;

        for source in overlays {
            let layer = overlay::build_with_policy(source.document, source.format, self.duplicates, entry)
                .map_err(|source_err| AssembleError {
                    origin: source.origin.to_string(),
                    source: source_err,
                })?;

            tracing::info!(
                layer = %layer.layer(),
                origin = %source.origin,
                entries = layer.len(),
                "Chain layer built"
            );
            entry = Arc::new(layer);
            depth += 1;
        }

        tracing::info!(depth, "Resolution chain assembled");
        Ok(Chain { entry, depth })
    }
}

impl Default for ChainAssembler {
    fn default() -> Self {
        Self::new(DefaultResponder::default())
    }
}
