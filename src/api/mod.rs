//! Club backend integration.
//!
//! Endpoint templates, wire types, the backend trait the rest of the crate
//! depends on, and the reqwest-based client that implements it.

/// Backend trait used by fetchers and the auth flow
pub mod backend;
/// HTTP client for the club backend
pub mod client;
/// Fixed endpoint templates
pub mod endpoint;
/// Data types representing backend resources
pub mod types;

// Re-export key components
pub use backend::ClubBackend;
pub use client::ApiClient;
pub use endpoint::Endpoint;
