//! Video lookups needed by comments, playlists and the dashboard

use crate::{from_millis, now_millis};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use vidshare_core::{
    error::Result,
    types::{CreateVideo, Video, VideoId},
};

/// Register a new video
pub async fn create(pool: &SqlitePool, video: CreateVideo) -> Result<Video> {
    let id = VideoId::generate();
    let created_at = now_millis();

    sqlx::query(
        r#"
        INSERT INTO videos (id, owner_id, title, description, views, is_published, created_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&video.owner_id)
    .bind(&video.title)
    .bind(&video.description)
    .bind(video.is_published)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(Video {
        id,
        owner_id: video.owner_id,
        title: video.title,
        description: video.description,
        views: 0,
        is_published: video.is_published,
        created_at: from_millis(created_at)?,
    })
}

/// Get video by ID
pub async fn get_by_id(pool: &SqlitePool, id: &VideoId) -> Result<Option<Video>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, title, description, views, is_published, created_at
        FROM videos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(video_from_row).transpose()
}

/// Check that a video exists without loading it
pub async fn exists(pool: &SqlitePool, id: &VideoId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM videos WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}

/// Add `count` views to a video
pub async fn record_views(pool: &SqlitePool, id: &VideoId, count: i64) -> Result<()> {
    sqlx::query("UPDATE videos SET views = views + ? WHERE id = ?")
        .bind(count)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

fn video_from_row(row: &SqliteRow) -> Result<Video> {
    Ok(Video {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        views: row.try_get("views")?,
        is_published: row.try_get::<i64, _>("is_published")? != 0,
        created_at: from_millis(row.try_get("created_at")?)?,
    })
}
