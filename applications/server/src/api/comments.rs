/// Video comment API routes
use crate::{
    error::{Result, ServerError},
    extract::{ValidJson, ValidPath, ValidQuery},
    middleware::AuthenticatedUser,
    response::{ApiResponse, Empty},
    state::AppState,
};
use axum::extract::State;
use serde::Deserialize;
use vidshare_core::{
    Comment, CommentId, CommentPage, CommentText, CommentWithAuthor, CreateComment, UserId,
    VideoId,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListCommentsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    #[serde(default)]
    pub text: String,
}

/// GET /api/videos/:videoId/comments
/// Newest-first page of a video's comments with author profiles
pub async fn list_video_comments(
    ValidPath(video_id): ValidPath<String>,
    State(app_state): State<AppState>,
    ValidQuery(query): ValidQuery<ListCommentsQuery>,
) -> Result<ApiResponse<CommentPage>> {
    let video_id = VideoId::parse(&video_id)?;
    let page = app_state.pagination.page_request(query.page, query.limit)?;

    let comments = app_state.db.get_video_comments(&video_id, page).await?;

    Ok(ApiResponse::ok(comments, "Comments fetched successfully"))
}

/// POST /api/videos/:videoId/comments
pub async fn add_comment(
    ValidPath(video_id): ValidPath<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(body): ValidJson<CommentBody>,
) -> Result<ApiResponse<CommentWithAuthor>> {
    let video_id = VideoId::parse(&video_id)?;
    let text = CommentText::parse(&body.text)?;

    if app_state.db.get_video(&video_id).await?.is_none() {
        return Err(ServerError::NotFound("Video not found".to_string()));
    }

    let comment = app_state
        .db
        .create_comment(CreateComment {
            video_id,
            owner_id: auth.user_id().clone(),
            text,
        })
        .await?;

    tracing::info!("Comment {} added to video {}", comment.id, comment.video_id);

    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// PATCH /api/comments/:commentId
/// Only the comment's owner may change its text
pub async fn update_comment(
    ValidPath(comment_id): ValidPath<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(body): ValidJson<CommentBody>,
) -> Result<ApiResponse<CommentWithAuthor>> {
    let comment_id = CommentId::parse(&comment_id)?;
    let text = CommentText::parse(&body.text)?;

    owned_comment(
        &app_state,
        &comment_id,
        auth.user_id(),
        "You are not authorized to update this comment",
    )
    .await?;

    let comment = app_state.db.update_comment_text(&comment_id, text).await?;

    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

/// DELETE /api/comments/:commentId
pub async fn delete_comment(
    ValidPath(comment_id): ValidPath<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiResponse<Empty>> {
    let comment_id = CommentId::parse(&comment_id)?;

    owned_comment(
        &app_state,
        &comment_id,
        auth.user_id(),
        "You are not authorized to delete this comment",
    )
    .await?;

    app_state.db.delete_comment(&comment_id).await?;
    tracing::info!("Comment {} deleted", comment_id);

    Ok(ApiResponse::ok(Empty {}, "Comment deleted successfully"))
}

/// Load a comment and check that `user_id` owns it
async fn owned_comment(
    app_state: &AppState,
    comment_id: &CommentId,
    user_id: &UserId,
    denied: &str,
) -> Result<Comment> {
    let comment = app_state
        .db
        .get_comment(comment_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Comment not found".to_string()))?;

    if !comment.is_owned_by(user_id) {
        return Err(ServerError::Forbidden(denied.to_string()));
    }

    Ok(comment)
}
