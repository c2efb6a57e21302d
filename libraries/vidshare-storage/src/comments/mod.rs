//! Comment queries
//!
//! The listing and the total count share the same `video_id` filter so that
//! `totalComments` and `pages` always describe the rows being paged through.

use crate::{from_millis, now_millis, users::profile_from_row};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use vidshare_core::{
    error::Result,
    types::{
        Comment, CommentId, CommentPage, CommentText, CommentWithAuthor, CreateComment,
        PageRequest, VideoId,
    },
    CoreError,
};

const WITH_AUTHOR_SELECT: &str = r#"
    SELECT
        c.id, c.video_id, c.text, c.created_at, c.updated_at,
        u.id AS owner_id, u.username AS owner_username,
        u.full_name AS owner_full_name, u.avatar AS owner_avatar
    FROM comments c
    INNER JOIN users u ON c.owner_id = u.id
"#;

/// Get one page of a video's comments, newest first, with authors populated
pub async fn get_by_video(
    pool: &SqlitePool,
    video_id: &VideoId,
    page: PageRequest,
) -> Result<CommentPage> {
    let rows = sqlx::query(&format!(
        "{WITH_AUTHOR_SELECT}
        WHERE c.video_id = ?
        ORDER BY c.created_at DESC, c.rowid DESC
        LIMIT ? OFFSET ?"
    ))
    .bind(video_id)
    .bind(i64::from(page.limit()))
    .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
    .fetch_all(pool)
    .await?;

    let comments = rows
        .iter()
        .map(comment_with_author_from_row)
        .collect::<Result<Vec<_>>>()?;

    let total_comments = count_by_video(pool, video_id).await?;

    Ok(CommentPage {
        comments,
        total_comments,
        page: page.page(),
        pages: page.pages_for(total_comments),
    })
}

/// Count all comments on a video
pub async fn count_by_video(pool: &SqlitePool, video_id: &VideoId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments c WHERE c.video_id = ?")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("count")?.max(0) as u64)
}

/// Get comment by ID
pub async fn get_by_id(pool: &SqlitePool, id: &CommentId) -> Result<Option<Comment>> {
    let row = sqlx::query(
        r#"
        SELECT id, video_id, owner_id, text, created_at, updated_at
        FROM comments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(comment_from_row).transpose()
}

/// Get comment by ID with its author populated
pub async fn get_with_author(
    pool: &SqlitePool,
    id: &CommentId,
) -> Result<Option<CommentWithAuthor>> {
    let row = sqlx::query(&format!("{WITH_AUTHOR_SELECT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(comment_with_author_from_row).transpose()
}

/// Create new comment
pub async fn create(pool: &SqlitePool, comment: CreateComment) -> Result<CommentWithAuthor> {
    let id = CommentId::generate();
    let now = now_millis();

    sqlx::query(
        r#"
        INSERT INTO comments (id, video_id, owner_id, text, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&comment.video_id)
    .bind(&comment.owner_id)
    .bind(comment.text.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_with_author(pool, &id)
        .await?
        .ok_or_else(|| CoreError::storage("Failed to retrieve created comment"))
}

/// Replace the text of a comment
pub async fn update_text(
    pool: &SqlitePool,
    id: &CommentId,
    text: CommentText,
) -> Result<CommentWithAuthor> {
    let result = sqlx::query("UPDATE comments SET text = ?, updated_at = ? WHERE id = ?")
        .bind(text.as_str())
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Comment", id.as_str()));
    }

    get_with_author(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Comment", id.as_str()))
}

/// Delete comment
pub async fn delete(pool: &SqlitePool, id: &CommentId) -> Result<()> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Comment", id.as_str()));
    }

    Ok(())
}

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        video_id: row.try_get("video_id")?,
        owner_id: row.try_get("owner_id")?,
        text: row.try_get("text")?,
        created_at: from_millis(row.try_get("created_at")?)?,
        updated_at: from_millis(row.try_get("updated_at")?)?,
    })
}

fn comment_with_author_from_row(row: &SqliteRow) -> Result<CommentWithAuthor> {
    Ok(CommentWithAuthor {
        id: row.try_get("id")?,
        video_id: row.try_get("video_id")?,
        owner: profile_from_row(row)?,
        text: row.try_get("text")?,
        created_at: from_millis(row.try_get("created_at")?)?,
        updated_at: from_millis(row.try_get("updated_at")?)?,
    })
}
