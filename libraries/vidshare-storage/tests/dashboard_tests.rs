//! Integration tests for dashboard aggregates


use test_helpers::*;
use vidshare_core::types::*;

#[tokio::test]
async fn test_channel_stats_counts_only_own_channel() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let creator = create_test_user(pool, "creator").await;
    let viewer = create_test_user(pool, "viewer").await;

    let v1 = create_test_video(pool, &creator.id, "One").await;
    let v2 = create_test_video(pool, &creator.id, "Two").await;
    let other = create_test_video(pool, &viewer.id, "Viewer upload").await;

    vidshare_storage::videos::record_views(pool, &v1.id, 10)
        .await
        .unwrap();
    vidshare_storage::videos::record_views(pool, &v2.id, 5)
        .await
        .unwrap();
    vidshare_storage::videos::record_views(pool, &other.id, 100)
        .await
        .unwrap();

    create_test_comment(pool, &v1.id, &viewer.id, "nice").await;
    create_test_comment(pool, &v2.id, &viewer.id, "also nice").await;
    create_test_comment(pool, &other.id, &creator.id, "thanks").await;

    create_test_playlist(pool, "Creator picks", &creator.id).await;

    let stats = vidshare_storage::dashboard::channel_stats(pool, &creator.id)
        .await
        .unwrap();

    assert_eq!(
        stats,
        ChannelStats {
            total_videos: 2,
            total_views: 15,
            total_comments: 2,
            total_playlists: 1,
        }
    );
}

#[tokio::test]
async fn test_channel_stats_for_empty_channel_are_zero() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "quiet").await;

    let stats = vidshare_storage::dashboard::channel_stats(pool, &user.id)
        .await
        .unwrap();

    assert_eq!(stats, ChannelStats::default());
}

#[tokio::test]
async fn test_channel_videos_newest_first_with_comment_counts() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let creator = create_test_user(pool, "uploader").await;
    let older = create_test_video(pool, &creator.id, "Older").await;
    let newer = vidshare_storage::videos::create(
        pool,
        CreateVideo {
            owner_id: creator.id.clone(),
            title: "Newer".to_string(),
            description: "draft".to_string(),
            is_published: false,
        },
    )
    .await
    .unwrap();

    create_test_comment(pool, &older.id, &creator.id, "pinned").await;

    let videos = vidshare_storage::dashboard::channel_videos(pool, &creator.id)
        .await
        .unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id, newer.id);
    assert!(!videos[0].is_published);
    assert_eq!(videos[0].comment_count, 0);
    assert_eq!(videos[1].id, older.id);
    assert_eq!(videos[1].comment_count, 1);
}
