//! Kashite Edge Gateway Library
//!
//! Serves the front-end bundle and forwards a fixed set of read-only
//! query endpoints to the kashite upstream API.

pub mod assets;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
