/// ID types for Vidshare entities
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[cfg(feature = "sqlx-support")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Defines a UUID-backed identifier stored as canonical lowercase text.
///
/// `parse` is the only way to build an id from untrusted input; it rejects
/// anything that is not a UUID and normalizes the accepted forms.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random ID
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Validate and normalize an ID received from a client
            pub fn parse(raw: &str) -> Result<Self> {
                Uuid::parse_str(raw)
                    .map(|uuid| Self(uuid.hyphenated().to_string()))
                    .map_err(|_| CoreError::invalid_input(concat!("Invalid ", $label, " ID")))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl Type<Sqlite> for $name {
            fn type_info() -> SqliteTypeInfo {
                <String as Type<Sqlite>>::type_info()
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> Encode<'q, Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<SqliteArgumentValue<'q>>,
            ) -> std::result::Result<IsNull, BoxDynError> {
                <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> Decode<'r, Sqlite> for $name {
            fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
                let s = <String as Decode<Sqlite>>::decode(value)?;
                Ok($name(s))
            }
        }
    };
}

define_id!(
    /// User identifier
    UserId,
    "user"
);

define_id!(
    /// Video identifier
    VideoId,
    "video"
);

define_id!(
    /// Comment identifier
    CommentId,
    "comment"
);

define_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_parse_back() {
        let id1 = VideoId::generate();
        let id2 = VideoId::generate();
        assert_ne!(id1, id2);
        assert_eq!(VideoId::parse(id1.as_str()).unwrap(), id1);
    }

    #[test]
    fn malformed_ids_are_rejected_with_entity_label() {
        let err = VideoId::parse("not-an-id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid video ID");

        let err = CommentId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid comment ID");
    }

    #[test]
    fn parse_normalizes_to_lowercase_hyphenated() {
        let id = PlaylistId::parse("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");

        let simple = UserId::parse("67e5504410b1426f9247bb680e5fe0c8").unwrap();
        assert_eq!(simple.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn from_str_matches_parse() {
        let id: CommentId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!("nope".parse::<CommentId>().is_err());
    }
}
