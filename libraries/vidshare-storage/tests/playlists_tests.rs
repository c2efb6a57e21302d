//! Integration tests for playlists vertical slice
//!
//! Tests playlist operations including:
//! - CRUD with user ownership
//! - Video ordering and gap compaction on removal
//! - Idempotent adds


use test_helpers::*;
use vidshare_core::{types::*, CoreError};

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "testuser").await;

    let playlist = vidshare_storage::playlists::create(
        pool,
        CreatePlaylist::new(user.id.clone(), "Watch later", Some("Queued videos")).unwrap(),
    )
    .await
    .expect("Failed to create playlist");

    assert_eq!(playlist.name, "Watch later");
    assert_eq!(playlist.description, "Queued videos");
    assert_eq!(playlist.owner_id, user.id);
    assert_eq!(playlist.video_count, 0);

    let retrieved = vidshare_storage::playlists::get_by_id(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(retrieved, playlist);
}

#[tokio::test]
async fn test_get_user_playlists_only_returns_owned() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user1 = create_test_user(pool, "user1").await;
    let user2 = create_test_user(pool, "user2").await;

    create_test_playlist(pool, "User 1 Playlist A", &user1.id).await;
    create_test_playlist(pool, "User 1 Playlist B", &user1.id).await;
    create_test_playlist(pool, "User 2 Playlist", &user2.id).await;

    let playlists = vidshare_storage::playlists::get_by_owner(pool, &user1.id)
        .await
        .unwrap();

    assert_eq!(playlists.len(), 2);
    assert!(playlists.iter().all(|p| p.owner_id == user1.id));
    // Most recently updated first
    assert_eq!(playlists[0].name, "User 1 Playlist B");
}

#[tokio::test]
async fn test_add_videos_keeps_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "curator").await;
    let playlist = create_test_playlist(pool, "Mix", &user.id).await;
    let first = create_test_video(pool, &user.id, "First").await;
    let second = create_test_video(pool, &user.id, "Second").await;
    let third = create_test_video(pool, &user.id, "Third").await;

    for video in [&second, &first, &third] {
        assert!(
            vidshare_storage::playlists::add_video(pool, &playlist.id, &video.id)
                .await
                .unwrap()
        );
    }

    let with_videos = vidshare_storage::playlists::get_with_videos(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();

    let titles: Vec<_> = with_videos.videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First", "Third"]);
    let positions: Vec<_> = with_videos.videos.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(with_videos.playlist.video_count, 3);
    assert_eq!(with_videos.videos[0].owner.username, "curator");
}

#[tokio::test]
async fn test_adding_same_video_twice_is_noop() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "repeat").await;
    let playlist = create_test_playlist(pool, "Once", &user.id).await;
    let video = create_test_video(pool, &user.id, "Clip").await;

    assert!(
        vidshare_storage::playlists::add_video(pool, &playlist.id, &video.id)
            .await
            .unwrap()
    );
    assert!(
        !vidshare_storage::playlists::add_video(pool, &playlist.id, &video.id)
            .await
            .unwrap()
    );

    let playlist = vidshare_storage::playlists::get_by_id(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(playlist.video_count, 1);
}

#[tokio::test]
async fn test_remove_video_compacts_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "trimmer").await;
    let playlist = create_test_playlist(pool, "Trim", &user.id).await;
    let a = create_test_video(pool, &user.id, "A").await;
    let b = create_test_video(pool, &user.id, "B").await;
    let c = create_test_video(pool, &user.id, "C").await;

    for video in [&a, &b, &c] {
        vidshare_storage::playlists::add_video(pool, &playlist.id, &video.id)
            .await
            .unwrap();
    }

    assert!(
        vidshare_storage::playlists::remove_video(pool, &playlist.id, &b.id)
            .await
            .unwrap()
    );
    assert!(
        !vidshare_storage::playlists::remove_video(pool, &playlist.id, &b.id)
            .await
            .unwrap()
    );

    let with_videos = vidshare_storage::playlists::get_with_videos(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();

    let entries: Vec<_> = with_videos
        .videos
        .iter()
        .map(|v| (v.title.as_str(), v.position))
        .collect();
    assert_eq!(entries, vec![("A", 0), ("C", 1)]);

    // Next append goes after the compacted tail
    let d = create_test_video(pool, &user.id, "D").await;
    vidshare_storage::playlists::add_video(pool, &playlist.id, &d.id)
        .await
        .unwrap();
    let with_videos = vidshare_storage::playlists::get_with_videos(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_videos.videos.last().unwrap().position, 2);
}

#[tokio::test]
async fn test_update_playlist_keeps_unspecified_fields() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "editor").await;
    let playlist = vidshare_storage::playlists::create(
        pool,
        CreatePlaylist::new(user.id.clone(), "Old name", Some("Keep me")).unwrap(),
    )
    .await
    .unwrap();

    let updated = vidshare_storage::playlists::update(
        pool,
        &playlist.id,
        UpdatePlaylist::new(Some("New name"), None).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "New name");
    assert_eq!(updated.description, "Keep me");
}

#[tokio::test]
async fn test_delete_playlist_and_missing_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "deleter").await;
    let playlist = create_test_playlist(pool, "Temp", &user.id).await;
    let video = create_test_video(pool, &user.id, "Clip").await;
    vidshare_storage::playlists::add_video(pool, &playlist.id, &video.id)
        .await
        .unwrap();

    vidshare_storage::playlists::delete(pool, &playlist.id)
        .await
        .unwrap();

    assert!(vidshare_storage::playlists::get_by_id(pool, &playlist.id)
        .await
        .unwrap()
        .is_none());

    let err = vidshare_storage::playlists::delete(pool, &playlist.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}
