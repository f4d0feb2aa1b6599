//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the route store, seed it on first run, load its mapping
//! - Read both overlay documents from disk
//! - Assemble the resolution chain
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order, not concurrently
//! - The store is closed before the chain is handed out

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{AppConfig, StoreConfig};
use crate::routing::{AssembleError, Chain, ChainAssembler, DefaultResponder, Mapping, OverlayFormat, OverlaySource};
use crate::store::{RouteStore, StoreError};

/// Errors that abort the boot sequence.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot read overlay {}: {source}", .path.display())]
    ReadOverlay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Overlay(#[from] AssembleError),
}

/// Open, seed and scan the store. The store handle is dropped on return,
/// whichever way this function exits.
pub fn load_store_routes(config: &StoreConfig) -> Result<Mapping, StartupError> {
    let store = RouteStore::open(&config.path)?;
    store.ensure_seeded()?;
    let routes = store.load_all()?;

    tracing::info!(path = %config.path, entries = routes.len(), "Store routes loaded");
    Ok(routes)
}

fn read_overlay(path: &Path) -> Result<Vec<u8>, StartupError> {
    fs::read(path).map_err(|source| StartupError::ReadOverlay {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the full boot sequence and return the chain's entry point.
pub fn build_chain(config: &AppConfig) -> Result<Chain, StartupError> {
    let routes = load_store_routes(&config.store)?;

    let overlays = &config.overlays;
    let yaml = read_overlay(Path::new(&overlays.yaml_path))?;
    let json = read_overlay(Path::new(&overlays.json_path))?;

    let sources = [
        OverlaySource {
            origin: &overlays.yaml_path,
            format: OverlayFormat::Yaml,
            document: &yaml,
        },
        OverlaySource {
            origin: &overlays.json_path,
            format: OverlayFormat::Json,
            document: &json,
        },
    ];

    let chain = ChainAssembler::new(DefaultResponder::new(config.responder.body.clone()))
        .with_duplicate_policy(overlays.duplicates)
        .assemble(routes, &sources)?;
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Action, Resolver};
    use crate::store::DEFAULT_SEED;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, yaml: &str, json: &str) -> AppConfig {
        let yaml_path = dir.path().join("urls.yaml");
        let json_path = dir.path().join("urls.json");
        fs::write(&yaml_path, yaml).unwrap();
        fs::write(&json_path, json).unwrap();

        let mut config = AppConfig::default();
        config.store.path = dir.path().join("urls.db").display().to_string();
        config.overlays.yaml_path = yaml_path.display().to_string();
        config.overlays.json_path = json_path.display().to_string();
        config
    }

    #[test]
    fn test_boot_seeds_store_and_serves_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "", "[]");

        let chain = build_chain(&config).unwrap();
        let (path, url) = DEFAULT_SEED[0];
        assert_eq!(chain.resolve(path), Action::Redirect(url.into()));
        assert_eq!(chain.resolve("/unknown"), Action::Respond("Hello, world!\n".into()));
    }

    #[test]
    fn test_store_released_after_boot() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "", "[]");

        build_chain(&config).unwrap();
        // A second boot can take the file lock again
        build_chain(&config).unwrap();
        assert!(RouteStore::open(&config.store.path).is_ok());
    }

    #[test]
    fn test_missing_overlay_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, "", "[]");
        config.overlays.json_path = dir.path().join("absent.json").display().to_string();

        assert!(matches!(
            build_chain(&config),
            Err(StartupError::ReadOverlay { .. })
        ));
    }

    #[test]
    fn test_malformed_overlay_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "- path: /a\n  url: https://a.example\n- url: no-path\n", "[]");

        match build_chain(&config) {
            Err(StartupError::Overlay(err)) => assert_eq!(err.origin, config.overlays.yaml_path),
            other => panic!("expected overlay error, got {other:?}"),
        }
    }

    #[test]
    fn test_store_error_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, "", "[]");
        config.store.path = dir.path().join("no-such-dir").join("urls.db").display().to_string();

        assert!(matches!(build_chain(&config), Err(StartupError::Store(_))));
    }
}
