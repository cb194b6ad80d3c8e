//! Upstream proxying subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/test/{endpoint}?query
//!     → endpoint.rs (resolve suffix, apply query policy)
//!     → upstream.rs (bounded GET against {base}/{suffix})
//!     → JSON body relayed verbatim, or error.rs mapping
//! ```
//!
//! # Design Decisions
//! - The endpoint set is a closed enum; unknown suffixes never reach
//!   the upstream
//! - Responses are opaque bytes, never deserialized into typed structs
//! - No retries and no caching; every failure surfaces to the caller

pub mod endpoint;
pub mod error;
pub mod upstream;

pub use endpoint::Endpoint;
pub use error::ProxyError;
pub use upstream::UpstreamClient;
