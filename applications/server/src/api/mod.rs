/// API route modules
pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod health;
pub mod playlists;
