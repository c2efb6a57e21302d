mod comment;
mod dashboard;
mod ids;
mod page;
mod playlist;
mod user;
mod video;

pub use comment::{Comment, CommentPage, CommentText, CommentWithAuthor, CreateComment};
pub use dashboard::{ChannelStats, ChannelVideo};
pub use ids::{CommentId, PlaylistId, UserId, VideoId};
pub use page::{page_count, PageRequest};
pub use playlist::{
    CreatePlaylist, Playlist, PlaylistVideo, PlaylistWithVideos, UpdatePlaylist,
};
pub use user::{CreateUser, User, UserProfile};
pub use video::{CreateVideo, Video, VideoSummary};
