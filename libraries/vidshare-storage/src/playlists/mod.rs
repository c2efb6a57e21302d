use crate::{from_millis, now_millis, users::profile_from_row};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use vidshare_core::{error::Result, types::*, CoreError};

const PLAYLIST_SELECT: &str = r#"
    SELECT
        p.id, p.name, p.description, p.owner_id, p.created_at, p.updated_at,
        (SELECT COUNT(*) FROM playlist_videos pv WHERE pv.playlist_id = p.id) AS video_count
    FROM playlists p
"#;

/// Get playlists owned by a user, most recently updated first
pub async fn get_by_owner(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!(
        "{PLAYLIST_SELECT} WHERE p.owner_id = ? ORDER BY p.updated_at DESC, p.rowid DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(playlist_from_row).collect()
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!("{PLAYLIST_SELECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(playlist_from_row).transpose()
}

/// Get playlist with all videos in playlist order
pub async fn get_with_videos(
    pool: &SqlitePool,
    id: &PlaylistId,
) -> Result<Option<PlaylistWithVideos>> {
    // First get the playlist
    let Some(playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    // Then get videos
    let video_rows = sqlx::query(
        r#"
        SELECT
            pv.video_id, pv.position, pv.added_at,
            v.title, v.views,
            u.id AS owner_id, u.username AS owner_username,
            u.full_name AS owner_full_name, u.avatar AS owner_avatar
        FROM playlist_videos pv
        INNER JOIN videos v ON pv.video_id = v.id
        INNER JOIN users u ON v.owner_id = u.id
        WHERE pv.playlist_id = ?
        ORDER BY pv.position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let videos = video_rows
        .iter()
        .map(|row| -> Result<PlaylistVideo> {
            Ok(PlaylistVideo {
                video_id: row.try_get("video_id")?,
                position: row.try_get::<i64, _>("position")?.max(0) as u32,
                added_at: from_millis(row.try_get("added_at")?)?,
                title: row.try_get("title")?,
                views: row.try_get("views")?,
                owner: profile_from_row(row)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(PlaylistWithVideos { playlist, videos }))
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = PlaylistId::generate();
    let now = now_millis();

    sqlx::query(
        r#"
        INSERT INTO playlists (id, name, description, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(&playlist.owner_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| CoreError::storage("Failed to retrieve created playlist"))
}

/// Update playlist name and/or description
pub async fn update(pool: &SqlitePool, id: &PlaylistId, update: UpdatePlaylist) -> Result<Playlist> {
    let result = sqlx::query(
        r#"
        UPDATE playlists
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.name)
    .bind(&update.description)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Playlist", id.as_str()));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Playlist", id.as_str()))
}

/// Delete playlist (its video entries cascade)
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Playlist", id.as_str()));
    }

    Ok(())
}

/// Append video to playlist
///
/// Returns `false` when the video was already in the playlist.
pub async fn add_video(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    video_id: &VideoId,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    // Get next position
    let next_position_row = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next_pos FROM playlist_videos WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;

    let next_position: i64 = next_position_row.try_get("next_pos")?;
    let now = now_millis();

    let inserted = sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, position, added_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(playlist_id, video_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .bind(next_position)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .rows_affected()
        > 0;

    if inserted {
        sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(playlist_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(inserted)
}

/// Remove video from playlist and close the gap in positions
///
/// Returns `false` when the video was not in the playlist.
pub async fn remove_video(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    video_id: &VideoId,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ? AND video_id = ?")
        .bind(playlist_id)
        .bind(video_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    if !removed {
        return Ok(false);
    }

    // Reorder positions to fill gap
    sqlx::query(
        r#"
        UPDATE playlist_videos
        SET position = (
            SELECT COUNT(*)
            FROM playlist_videos pv2
            WHERE pv2.playlist_id = playlist_videos.playlist_id
              AND pv2.position < playlist_videos.position
        )
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(true)
}

fn playlist_from_row(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        owner_id: row.try_get("owner_id")?,
        video_count: row.try_get::<i64, _>("video_count")?.max(0) as u32,
        created_at: from_millis(row.try_get("created_at")?)?,
        updated_at: from_millis(row.try_get("updated_at")?)?,
    })
}
