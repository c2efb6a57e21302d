/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    extract::{ValidJson, ValidPath},
    middleware::AuthenticatedUser,
    response::{ApiResponse, Empty},
    state::AppState,
};
use axum::extract::State;
use serde::Deserialize;
use vidshare_core::{
    CreatePlaylist, Playlist, PlaylistId, PlaylistWithVideos, UpdatePlaylist, UserId, VideoId,
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// POST /api/playlists
/// Create a new playlist owned by the caller
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(req): ValidJson<CreatePlaylistRequest>,
) -> Result<ApiResponse<Playlist>> {
    let create = CreatePlaylist::new(
        auth.user_id().clone(),
        &req.name,
        req.description.as_deref(),
    )?;
    let playlist = app_state.db.create_playlist(create).await?;
    tracing::info!("Playlist {} created by {}", playlist.id, playlist.owner_id);

    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// GET /api/users/:userId/playlists
pub async fn list_user_playlists(
    ValidPath(user_id): ValidPath<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<ApiResponse<Vec<Playlist>>> {
    let user_id = UserId::parse(&user_id)?;
    let playlists = app_state.db.get_user_playlists(&user_id).await?;

    Ok(ApiResponse::ok(playlists, "User playlists fetched successfully"))
}

/// GET /api/playlists/:playlistId
/// Playlist details with its ordered videos
pub async fn get_playlist(
    ValidPath(playlist_id): ValidPath<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<ApiResponse<PlaylistWithVideos>> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;
    let playlist = app_state
        .db
        .get_playlist_with_videos(&playlist_id)
        .await?
        .ok_or_else(playlist_not_found)?;

    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully"))
}

/// PATCH /api/playlists/:playlistId
pub async fn update_playlist(
    ValidPath(playlist_id): ValidPath<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(req): ValidJson<UpdatePlaylistRequest>,
) -> Result<ApiResponse<Playlist>> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;
    let update = UpdatePlaylist::new(req.name.as_deref(), req.description.as_deref())?;

    owned_playlist(&app_state, &playlist_id, auth.user_id()).await?;
    let playlist = app_state.db.update_playlist(&playlist_id, update).await?;

    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// DELETE /api/playlists/:playlistId
pub async fn delete_playlist(
    ValidPath(playlist_id): ValidPath<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<Empty>> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;

    owned_playlist(&app_state, &playlist_id, auth.user_id()).await?;
    app_state.db.delete_playlist(&playlist_id).await?;
    tracing::info!("Playlist {} deleted", playlist_id);

    Ok(ApiResponse::ok(Empty {}, "Playlist deleted successfully"))
}

/// PATCH /api/playlists/:playlistId/videos/:videoId
/// Append a video; adding one that is already present changes nothing
pub async fn add_video_to_playlist(
    ValidPath((playlist_id, video_id)): ValidPath<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<PlaylistWithVideos>> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;
    let video_id = VideoId::parse(&video_id)?;

    owned_playlist(&app_state, &playlist_id, auth.user_id()).await?;

    if app_state.db.get_video(&video_id).await?.is_none() {
        return Err(ServerError::NotFound("Video not found".to_string()));
    }

    let added = app_state
        .db
        .add_video_to_playlist(&playlist_id, &video_id)
        .await?;
    if !added {
        tracing::debug!("Video {} already in playlist {}", video_id, playlist_id);
    }

    let playlist = app_state
        .db
        .get_playlist_with_videos(&playlist_id)
        .await?
        .ok_or_else(playlist_not_found)?;

    Ok(ApiResponse::ok(playlist, "Video added to playlist successfully"))
}

/// DELETE /api/playlists/:playlistId/videos/:videoId
pub async fn remove_video_from_playlist(
    ValidPath((playlist_id, video_id)): ValidPath<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<PlaylistWithVideos>> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;
    let video_id = VideoId::parse(&video_id)?;

    owned_playlist(&app_state, &playlist_id, auth.user_id()).await?;

    let removed = app_state
        .db
        .remove_video_from_playlist(&playlist_id, &video_id)
        .await?;
    if !removed {
        return Err(ServerError::NotFound(
            "Video not found in playlist".to_string(),
        ));
    }

    let playlist = app_state
        .db
        .get_playlist_with_videos(&playlist_id)
        .await?
        .ok_or_else(playlist_not_found)?;

    Ok(ApiResponse::ok(
        playlist,
        "Video removed from playlist successfully",
    ))
}

fn playlist_not_found() -> ServerError {
    ServerError::NotFound("Playlist not found".to_string())
}

async fn owned_playlist(
    app_state: &AppState,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<Playlist> {
    let playlist = app_state
        .db
        .get_playlist(playlist_id)
        .await?
        .ok_or_else(playlist_not_found)?;

    if !playlist.is_owned_by(user_id) {
        return Err(ServerError::Forbidden(
            "You are not authorized to modify this playlist".to_string(),
        ));
    }

    Ok(playlist)
}
