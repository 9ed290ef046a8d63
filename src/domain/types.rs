//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and the category enumeration are enforced at the
//! boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// An identifier could not be read as an integer.
    #[error("{0} must be an integer")]
    MalformedId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Category is not one of the supported values.
    #[error("category must be one of {choices}; got '{0}'", choices = HootCategory::ALL_NAMES.join(", "))]
    UnknownCategory(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user account.", "user_id");
id_newtype!(HootId, "Unique identifier for a hoot.", "hoot_id");
id_newtype!(CommentId, "Unique identifier for a comment.", "comment_id");

non_empty_string_newtype!(HootTitle, "Hoot title enforcing non-empty values.", "title");
non_empty_string_newtype!(HootText, "Hoot body enforcing non-empty values.", "text");
non_empty_string_newtype!(
    CommentText,
    "Comment body enforcing non-empty values.",
    "comment text"
);
non_empty_string_newtype!(Username, "Account display name.", "username");

impl UserId {
    /// Parses the textual form of a user id into its canonical value.
    ///
    /// Identity providers hand out ids either as JSON numbers or as strings
    /// (`"42"`, `" 42 "`); both collapse to the same `UserId` so ownership
    /// checks never compare two different representations.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = value.trim();
        let raw = trimmed
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::MalformedId("user_id"))?;
        Self::new(raw)
    }
}

/// Serde helper accepting a user id as either a JSON number or a string.
pub fn deserialize_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUserId {
        Number(i64),
        Text(String),
    }

    let id = match RawUserId::deserialize(deserializer)? {
        RawUserId::Number(value) => i32::try_from(value)
            .map_err(|_| TypeConstraintError::MalformedId("user_id"))
            .and_then(UserId::new),
        RawUserId::Text(value) => UserId::parse(&value),
    };
    id.map_err(serde::de::Error::custom)
}

/// Topic a hoot is filed under.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HootCategory {
    News,
    Sports,
    Games,
    Movies,
    Music,
    Television,
}

impl HootCategory {
    /// Every accepted category name, in display order.
    pub const ALL_NAMES: [&'static str; 6] =
        ["News", "Sports", "Games", "Movies", "Music", "Television"];

    /// String representation used in persistence and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Sports => "Sports",
            Self::Games => "Games",
            Self::Movies => "Movies",
            Self::Music => "Music",
            Self::Television => "Television",
        }
    }
}

impl Display for HootCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for HootCategory {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "News" => Ok(Self::News),
            "Sports" => Ok(Self::Sports),
            "Games" => Ok(Self::Games),
            "Movies" => Ok(Self::Movies),
            "Music" => Ok(Self::Music),
            "Television" => Ok(Self::Television),
            other => Err(TypeConstraintError::UnknownCategory(other.to_string())),
        }
    }
}

impl TryFrom<String> for HootCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<HootCategory> for String {
    fn from(value: HootCategory) -> Self {
        value.as_str().to_string()
    }
}
