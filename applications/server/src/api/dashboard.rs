/// Channel dashboard API routes
use crate::{error::Result, middleware::AuthenticatedUser, response::ApiResponse, state::AppState};
use axum::extract::State;
use vidshare_core::{ChannelStats, ChannelVideo};

/// GET /api/dashboard/stats
pub async fn channel_stats(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<ChannelStats>> {
    let stats = app_state.db.get_channel_stats(auth.user_id()).await?;
    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

/// GET /api/dashboard/videos
/// Every video of the caller's channel, published or not
pub async fn channel_videos(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<Vec<ChannelVideo>>> {
    let videos = app_state.db.get_channel_videos(auth.user_id()).await?;
    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
