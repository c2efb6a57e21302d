//! Storage trait consumed by the HTTP layer

use crate::error::Result;
use crate::types::{
    ChannelStats, ChannelVideo, Comment, CommentId, CommentPage, CommentText, CommentWithAuthor,
    CreateComment, CreatePlaylist, CreateUser, CreateVideo, PageRequest, Playlist, PlaylistId,
    PlaylistWithVideos, UpdatePlaylist, User, UserId, Video, VideoId,
};
use async_trait::async_trait;

/// Storage context providing access to database operations
///
/// This trait abstracts storage so handlers can be exercised against the
/// local `SQLite` implementation or any other backend.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user together with its password hash
    async fn create_user(&self, user: CreateUser, password_hash: &str) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get user by login name
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get the stored password hash for a user
    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Videos
    // ========================================================================

    /// Register a video
    async fn create_video(&self, video: CreateVideo) -> Result<Video>;

    /// Get video by ID
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>>;

    // ========================================================================
    // Comments
    // ========================================================================

    /// Newest-first page of a video's comments with authors populated
    async fn get_video_comments(&self, video_id: &VideoId, page: PageRequest)
        -> Result<CommentPage>;

    /// Get comment by ID
    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>>;

    /// Create a comment and return it with its author populated
    async fn create_comment(&self, comment: CreateComment) -> Result<CommentWithAuthor>;

    /// Replace a comment's text
    async fn update_comment_text(
        &self,
        id: &CommentId,
        text: CommentText,
    ) -> Result<CommentWithAuthor>;

    /// Delete a comment
    async fn delete_comment(&self, id: &CommentId) -> Result<()>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a new playlist
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Get playlists owned by a user
    async fn get_user_playlists(&self, owner_id: &UserId) -> Result<Vec<Playlist>>;

    /// Get playlist by ID
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Get playlist with its ordered videos
    async fn get_playlist_with_videos(&self, id: &PlaylistId)
        -> Result<Option<PlaylistWithVideos>>;

    /// Update playlist name and/or description
    async fn update_playlist(&self, id: &PlaylistId, update: UpdatePlaylist) -> Result<Playlist>;

    /// Delete a playlist
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Append a video; returns `false` if it was already present
    async fn add_video_to_playlist(&self, id: &PlaylistId, video_id: &VideoId) -> Result<bool>;

    /// Remove a video; returns `false` if it was not in the playlist
    async fn remove_video_from_playlist(
        &self,
        id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<bool>;

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Aggregate stats for the channel owned by `owner_id`
    async fn get_channel_stats(&self, owner_id: &UserId) -> Result<ChannelStats>;

    /// All videos of the channel, newest first
    async fn get_channel_videos(&self, owner_id: &UserId) -> Result<Vec<ChannelVideo>>;
}
