//! Vidshare Core
//!
//! Platform-agnostic domain types, storage trait, and error handling for the
//! Vidshare backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Comment`, `Playlist`, `Video`, `User`, etc.
//! - **Typed Identifiers**: UUID-backed ids validated at the boundary
//! - **Storage Trait**: `StorageContext`, implemented by `vidshare-storage`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use vidshare_core::types::{CommentText, VideoId};
//!
//! // Identifiers coming from a request path are validated before use
//! assert!(VideoId::parse("not-an-id").is_err());
//!
//! // Comment text must contain something other than whitespace
//! assert!(CommentText::parse("   ").is_err());
//! let text = CommentText::parse("  great video ").unwrap();
//! assert_eq!(text.as_str(), "great video");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use storage::StorageContext;

pub use types::{
    // Identifiers
    CommentId, PlaylistId, UserId, VideoId,
    // Users
    CreateUser, User, UserProfile,
    // Videos
    CreateVideo, Video, VideoSummary,
    // Comments
    Comment, CommentPage, CommentText, CommentWithAuthor, CreateComment,
    // Playlists
    CreatePlaylist, Playlist, PlaylistVideo, PlaylistWithVideos, UpdatePlaylist,
    // Dashboard
    ChannelStats, ChannelVideo,
    // Pagination
    PageRequest,
};
