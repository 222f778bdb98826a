//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string started or ended with whitespace where that is not allowed.
    #[error("{0} cannot start or end with a whitespace")]
    SurroundingWhitespace(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{0} must be at most {1} characters long")]
    TooLong(&'static str, usize),
    /// A slug contained characters outside `[a-z0-9_-]`.
    #[error("{0} may only contain lowercase letters, digits, hyphens and underscores")]
    InvalidSlug(&'static str),
    /// Rating outside of the enumerated scale.
    #[error("rating must be between {min} and {max}", min = Rating::MIN, max = Rating::MAX)]
    RatingOutOfRange,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
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

fn require_max_chars(
    value: String,
    field: &'static str,
    max: Option<usize>,
) -> Result<String, TypeConstraintError> {
    match max {
        Some(max) if value.chars().count() > max => Err(TypeConstraintError::TooLong(field, max)),
        _ => Ok(value),
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

/// Shared accessor and conversion impls for string newtypes.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
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

/// Trimmed, non-empty text with an optional maximum length.
macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                require_max_chars(trimmed, $field, $max).map(Self)
            }
        }

        string_newtype_impls!($name);
    };
}

/// Non-empty text that is rejected, not trimmed, when it carries surrounding
/// whitespace.
macro_rules! strict_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a value that must already be free of surrounding whitespace.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(TypeConstraintError::EmptyString($field));
                }
                if value.trim() != value {
                    return Err(TypeConstraintError::SurroundingWhitespace($field));
                }
                require_max_chars(value, $field, $max).map(Self)
            }
        }

        string_newtype_impls!($name);
    };
}

id_newtype!(IdeaId, "Unique identifier for an idea.", "idea_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    UserId,
    "Identifier of a user supplied by the identity provider.",
    "user_id"
);
id_newtype!(
    TranslationId,
    "Unique identifier for an idea translation row.",
    "translation_id"
);
id_newtype!(
    ArticleId,
    "Unique identifier for a news article.",
    "article_id"
);
id_newtype!(LikeId, "Unique identifier for a like.", "like_id");
id_newtype!(CommentId, "Unique identifier for a comment.", "comment_id");

strict_string_newtype!(
    IdeaTitle,
    "Canonical idea title without surrounding whitespace.",
    "title",
    Some(200)
);
non_empty_string_newtype!(
    IdeaContent,
    "Canonical idea content enforcing non-empty values.",
    "content",
    None
);
non_empty_string_newtype!(
    TranslationTitle,
    "Translated idea title enforcing non-empty values.",
    "title",
    Some(200)
);
non_empty_string_newtype!(
    TranslationContent,
    "Translated idea content enforcing non-empty values.",
    "content",
    None
);
non_empty_string_newtype!(
    CategoryTitle,
    "Category title in a single language.",
    "title",
    Some(100)
);
non_empty_string_newtype!(
    ArticleTitle,
    "News article title enforcing non-empty values.",
    "title",
    Some(255)
);
non_empty_string_newtype!(
    ArticleBody,
    "News article body enforcing non-empty values.",
    "body",
    None
);
non_empty_string_newtype!(CommentText, "Comment text.", "text", Some(255));

/// URL-safe category identifier. Not unique across categories.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Trims the value and accepts only `[a-z0-9_-]`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let slug = trim_and_require_non_empty(value, "slug")?;
        let slug = require_max_chars(slug, "slug", Some(50))?;
        if slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            Ok(Self(slug))
        } else {
            Err(TypeConstraintError::InvalidSlug("slug"))
        }
    }
}

string_newtype_impls!(CategorySlug);

/// Star rating on the fixed 1..=5 scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    const LABELS: [&'static str; 5] = ["★☆☆☆☆", "★★☆☆☆", "★★★☆☆", "★★★★☆", "★★★★★"];

    /// Constructs a rating inside the enumerated scale.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::RatingOutOfRange)
        }
    }

    /// Returns the raw value.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Display label of the rating.
    pub fn label(self) -> &'static str {
        Self::LABELS[(self.0 - Self::MIN) as usize]
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Rating {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(value: Rating) -> Self {
        value.0
    }
}
