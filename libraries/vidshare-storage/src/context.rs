use crate::{comments, dashboard, playlists, users, videos};
use async_trait::async_trait;
use sqlx::SqlitePool;
use vidshare_core::{error::Result, storage::StorageContext, types::*};

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Users
    async fn create_user(&self, user: CreateUser, password_hash: &str) -> Result<User> {
        users::create(&self.pool, user, password_hash).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        users::get_by_username(&self.pool, username).await
    }

    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    // Videos
    async fn create_video(&self, video: CreateVideo) -> Result<Video> {
        videos::create(&self.pool, video).await
    }

    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>> {
        videos::get_by_id(&self.pool, id).await
    }

    // Comments
    async fn get_video_comments(
        &self,
        video_id: &VideoId,
        page: PageRequest,
    ) -> Result<CommentPage> {
        comments::get_by_video(&self.pool, video_id, page).await
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>> {
        comments::get_by_id(&self.pool, id).await
    }

    async fn create_comment(&self, comment: CreateComment) -> Result<CommentWithAuthor> {
        comments::create(&self.pool, comment).await
    }

    async fn update_comment_text(
        &self,
        id: &CommentId,
        text: CommentText,
    ) -> Result<CommentWithAuthor> {
        comments::update_text(&self.pool, id, text).await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<()> {
        comments::delete(&self.pool, id).await
    }

    // Playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn get_user_playlists(&self, owner_id: &UserId) -> Result<Vec<Playlist>> {
        playlists::get_by_owner(&self.pool, owner_id).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlist_with_videos(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistWithVideos>> {
        playlists::get_with_videos(&self.pool, id).await
    }

    async fn update_playlist(&self, id: &PlaylistId, update: UpdatePlaylist) -> Result<Playlist> {
        playlists::update(&self.pool, id, update).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    async fn add_video_to_playlist(&self, id: &PlaylistId, video_id: &VideoId) -> Result<bool> {
        playlists::add_video(&self.pool, id, video_id).await
    }

    async fn remove_video_from_playlist(
        &self,
        id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<bool> {
        playlists::remove_video(&self.pool, id, video_id).await
    }

    // Dashboard
    async fn get_channel_stats(&self, owner_id: &UserId) -> Result<ChannelStats> {
        dashboard::channel_stats(&self.pool, owner_id).await
    }

    async fn get_channel_videos(&self, owner_id: &UserId) -> Result<Vec<ChannelVideo>> {
        dashboard::channel_videos(&self.pool, owner_id).await
    }
}
