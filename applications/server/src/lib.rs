//! Vidshare Server Library
//!
//! Video-sharing REST backend: comments, playlists, and the channel
//! dashboard behind JWT authentication.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{PaginationSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use routes::{build_router, RouteTableError};
pub use services::AuthService;
pub use state::AppState;
