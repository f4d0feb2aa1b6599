//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (store, chain assembly, requests)
//!     → logging.rs subscriber (env filter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Request ID flows through request logs and responses

pub mod logging;

pub use logging::init_tracing;
