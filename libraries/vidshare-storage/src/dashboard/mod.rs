//! Channel dashboard aggregates

use crate::from_millis;
use sqlx::{Row, SqlitePool};
use vidshare_core::{
    error::Result,
    types::{ChannelStats, ChannelVideo, UserId},
};

/// Aggregate stats for the channel owned by `owner_id`
pub async fn channel_stats(pool: &SqlitePool, owner_id: &UserId) -> Result<ChannelStats> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM videos WHERE owner_id = ?) AS total_videos,
            (SELECT COALESCE(SUM(views), 0) FROM videos WHERE owner_id = ?) AS total_views,
            (SELECT COUNT(*)
               FROM comments c
               INNER JOIN videos v ON c.video_id = v.id
              WHERE v.owner_id = ?) AS total_comments,
            (SELECT COUNT(*) FROM playlists WHERE owner_id = ?) AS total_playlists
        "#,
    )
    .bind(owner_id)
    .bind(owner_id)
    .bind(owner_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    let count = |column: &str| -> Result<u64> { Ok(row.try_get::<i64, _>(column)?.max(0) as u64) };

    Ok(ChannelStats {
        total_videos: count("total_videos")?,
        total_views: count("total_views")?,
        total_comments: count("total_comments")?,
        total_playlists: count("total_playlists")?,
    })
}

/// All videos of a channel, newest first, with comment counts
pub async fn channel_videos(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<ChannelVideo>> {
    let rows = sqlx::query(
        r#"
        SELECT
            v.id, v.title, v.description, v.views, v.is_published, v.created_at,
            (SELECT COUNT(*) FROM comments c WHERE c.video_id = v.id) AS comment_count
        FROM videos v
        WHERE v.owner_id = ?
        ORDER BY v.created_at DESC, v.rowid DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ChannelVideo> {
            Ok(ChannelVideo {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                views: row.try_get("views")?,
                is_published: row.try_get::<i64, _>("is_published")? != 0,
                comment_count: row.try_get::<i64, _>("comment_count")?.max(0) as u64,
                created_at: from_millis(row.try_get("created_at")?)?,
            })
        })
        .collect()
}
