//! Persistent route storage.
//!
//! # Data Flow
//! ```text
//! Boot:
//!     open(path)          → creates the file on first run, takes the file lock
//!     ensure_seeded()     → writes the default redirects once, atomically
//!     load_all()          → full scan into a Mapping
//!     drop(store)         → releases the lock before serving
//! ```
//!
//! # Design Decisions
//! - Seed detection is "table absent", not "table empty"
//! - No update or delete path exists; the store is seed-only from here
//! - Touched only during the single-threaded boot sequence

pub mod route_store;

pub use route_store::{RouteStore, StoreError, DEFAULT_SEED, ROUTES_TABLE};
