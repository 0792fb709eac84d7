//! Entry records and the input fields used to create them.
//!
//! Every record carries an `id` that is supplied by the caller at insertion
//! time; the `New*` input types hold the remaining category-specific fields.

use serde::{Deserialize, Serialize};

use crate::category::CategoryKind;

/// A user entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    /// Build a stored user from its identifier and input fields.
    pub fn from_fields(id: impl Into<String>, fields: NewUser) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
        }
    }
}

/// A post entry.
///
/// `author_id` is expected to name a user of the same seed set, but nothing
/// here enforces it. See `SeedSnapshot::validate_references`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author_id: String,
}

impl Post {
    /// Build a stored post from its identifier and input fields.
    pub fn from_fields(id: impl Into<String>, fields: NewPost) -> Self {
        Self {
            id: id.into(),
            title: fields.title,
            author_id: fields.author_id,
        }
    }
}

/// Input fields for a user (everything except `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Input fields for a post (everything except `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author_id: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author_id: author_id.into(),
        }
    }
}

/// Input fields for an entry whose category is only known at runtime
/// (seed files, CLI).
///
/// Untagged: the variant is picked from the fields present, so a seed-file
/// entry declaring `category = "users"` but carrying post fields is detected
/// as a mismatch rather than silently misread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryFields {
    Post(NewPost),
    User(NewUser),
}

impl EntryFields {
    /// The category these fields belong to.
    pub fn kind(&self) -> CategoryKind {
        match self {
            EntryFields::User(_) => CategoryKind::Users,
            EntryFields::Post(_) => CategoryKind::Posts,
        }
    }

    /// Names of the fields these inputs are read from.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            EntryFields::User(_) => &["name"],
            EntryFields::Post(_) => &["title", "author_id"],
        }
    }
}

impl From<NewUser> for EntryFields {
    fn from(fields: NewUser) -> Self {
        EntryFields::User(fields)
    }
}

impl From<NewPost> for EntryFields {
    fn from(fields: NewPost) -> Self {
        EntryFields::Post(fields)
    }
}
