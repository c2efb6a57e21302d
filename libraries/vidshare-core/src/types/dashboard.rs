/// Creator dashboard types
use super::ids::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate numbers for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_videos: u64,
    pub total_views: u64,
    pub total_comments: u64,
    pub total_playlists: u64,
}

/// A channel's own video as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideo {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub views: i64,
    pub is_published: bool,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
}
