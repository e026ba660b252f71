//! Core types and service wiring for the kerbside bin-collection resolver.

/// Domain models and identifiers shared by all providers.
pub mod model;
/// Registry and helpers for plugging council-specific providers into the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// Canonicalization of UK postcodes.
pub mod postcode;
/// Heuristic scoring used to disambiguate address candidates.
pub mod score;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use postcode::*;
pub use score::*;
pub use service::*;
