/// Playlist domain types
use super::{
    ids::{PlaylistId, UserId, VideoId},
    user::UserProfile,
};
use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
    pub video_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

/// Playlist together with its ordered videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistWithVideos {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub videos: Vec<PlaylistVideo>,
}

/// Video entry in a playlist with denormalized data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideo {
    pub video_id: VideoId,
    /// Position in the playlist (0-indexed)
    pub position: u32,
    pub added_at: DateTime<Utc>,
    pub title: String,
    pub views: i64,
    pub owner: UserProfile,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
}

impl CreatePlaylist {
    pub fn new(owner_id: UserId, name: &str, description: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            description: description.map(str::trim).unwrap_or_default().to_string(),
            owner_id,
        })
    }
}

/// Partial update of a playlist's metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdatePlaylist {
    /// Requires at least one field; a provided name must not be blank
    pub fn new(name: Option<&str>, description: Option<&str>) -> Result<Self> {
        if name.is_none() && description.is_none() {
            return Err(CoreError::invalid_input(
                "Provide a name or description to update",
            ));
        }
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            description: description.map(|d| d.trim().to_string()),
        })
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("Playlist name is required"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name() {
        let owner = UserId::generate();
        assert!(CreatePlaylist::new(owner.clone(), "  ", None).is_err());

        let create = CreatePlaylist::new(owner.clone(), " Watch later ", None).unwrap();
        assert_eq!(create.name, "Watch later");
        assert_eq!(create.description, "");
        assert_eq!(create.owner_id, owner);
    }

    #[test]
    fn update_needs_at_least_one_field() {
        assert!(UpdatePlaylist::new(None, None).is_err());
        assert!(UpdatePlaylist::new(Some(""), None).is_err());

        let update = UpdatePlaylist::new(None, Some("  new notes ")).unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.description.as_deref(), Some("new notes"));
    }

    #[test]
    fn playlist_with_videos_flattens_playlist_fields() {
        let playlist = Playlist {
            id: PlaylistId::generate(),
            name: "Mix".to_string(),
            description: String::new(),
            owner_id: UserId::generate(),
            video_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(PlaylistWithVideos {
            playlist,
            videos: vec![],
        })
        .unwrap();

        assert_eq!(value["name"], "Mix");
        assert_eq!(value["videoCount"], 0);
        assert!(value["videos"].as_array().unwrap().is_empty());
    }
}
