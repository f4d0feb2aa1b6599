//! Configuration overlays.
//!
//! # Responsibilities
//! - Decode a YAML or JSON document into `{path, url}` records
//! - Fold the records into a `Mapping` under a duplicate policy
//! - Wrap a fallback resolver with the resulting map
//!
//! # Design Decisions
//! - Format only affects decoding; both formats share the `Redirect` schema
//! - A document either builds completely or not at all
//! - Blank, comment-only and null documents are empty overlays, not errors
//!
//! Both formats expect a top-level sequence:
//! ```text
//! - path: /some-path                 [{"path": "/some-path",
//!   url: https://example.com/demo      "url": "https://example.com/demo"}]
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::{MapResolver, Mapping, Redirect, Resolver};

/// Supported overlay document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayFormat {
    Yaml,
    Json,
}

impl fmt::Display for OverlayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayFormat::Yaml => write!(f, "yaml"),
            OverlayFormat::Json => write!(f, "json"),
        }
    }
}

/// How repeated paths inside one document are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later records overwrite earlier ones.
    #[default]
    LastWins,
    /// Any repeated path fails the whole document.
    Reject,
}

/// Errors produced while decoding an overlay document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML overlay: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON overlay: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate path `{path}` in {format} overlay")]
    DuplicatePath { format: OverlayFormat, path: String },
}

/// Decode `document` into its records, in document order.
pub fn parse_redirects(document: &[u8], format: OverlayFormat) -> Result<Vec<Redirect>, ParseError> {
    if document.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let records: Option<Vec<Redirect>> = match format {
        OverlayFormat::Yaml => serde_yaml::from_slice(document)?,
        OverlayFormat::Json => serde_json::from_slice(document)?,
    };
    Ok(records.unwrap_or_default())
}

/// Fold records into a mapping, applying `policy` to repeated paths.
pub fn build_mapping(
    records: Vec<Redirect>,
    format: OverlayFormat,
    policy: DuplicatePolicy,
) -> Result<Mapping, ParseError> {
    let mut routes = Mapping::with_capacity(records.len());

    for Redirect { path, url } in records {
        if routes.contains_key(&path) {
            match policy {
                DuplicatePolicy::LastWins => {
                    tracing::warn!(format = %format, path = %path, "Duplicate path in overlay, later record wins");
                }
                DuplicatePolicy::Reject => {
                    return Err(ParseError::DuplicatePath { format, path });
                }
            }
        }
        routes.insert(path, url);
    }

    Ok(routes)
}

/// Build an overlay resolver with the default (last wins) duplicate policy.
pub fn build(
    document: &[u8],
    format: OverlayFormat,
    fallback: Arc<dyn Resolver>,
) -> Result<MapResolver, ParseError> {
    build_with_policy(document, format, DuplicatePolicy::default(), fallback)
}

/// Build an overlay resolver over `document` that defers misses to `fallback`.
pub fn build_with_policy(
    document: &[u8],
    format: OverlayFormat,
    policy: DuplicatePolicy,
    fallback: Arc<dyn Resolver>,
) -> Result<MapResolver, ParseError> {
    let records = parse_redirects(document, format)?;
    let routes = build_mapping(records, format, policy)?;

    tracing::debug!(format = %format, entries = routes.len(), "Overlay decoded");
    Ok(MapResolver::new(format.to_string(), routes, fallback))
}
