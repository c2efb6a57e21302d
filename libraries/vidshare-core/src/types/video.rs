/// Video domain types
///
/// Videos are owned by another part of the platform; only the fields that
/// comments, playlists and the dashboard read are modelled here.
use super::{ids::UserId, ids::VideoId, user::UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for registering a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideo {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub is_published: bool,
}

/// Video with its owner populated, as listed inside a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: VideoId,
    pub title: String,
    pub views: i64,
    pub owner: UserProfile,
}
