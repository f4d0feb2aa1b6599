//! Short-path redirect service library.
//!
//! Requests are resolved through a chain of lookup layers: a JSON overlay,
//! a YAML overlay, the persistent route store and finally a default responder.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Action, Chain, Resolver};
pub use store::RouteStore;
