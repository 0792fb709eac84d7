//! The committed seed snapshot.
//!
//! A `SeedSnapshot` is the immutable result of committing a seed builder:
//! every user and post that was accumulated, keyed exactly by the identifier
//! supplied at insertion. Collections are `BTreeMap`s so two snapshots built
//! from the same distinct entries in different orders compare equal and
//! serialize identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryKind;
use crate::error::SeedError;
use crate::record::{Post, User};

/// Immutable snapshot of all accumulated categories.
///
/// Serializes as `{"users": {...}, "posts": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSnapshot {
    users: BTreeMap<String, User>,
    posts: BTreeMap<String, Post>,
}

/// Per-category entry counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCounts {
    pub users: usize,
    pub posts: usize,
}

impl SeedCounts {
    pub fn total(&self) -> usize {
        self.users + self.posts
    }
}

/// A post whose `author_id` names no user in the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingAuthor {
    pub post_id: String,
    pub author_id: String,
}

impl SeedSnapshot {
    pub fn new(users: BTreeMap<String, User>, posts: BTreeMap<String, Post>) -> Self {
        Self { users, posts }
    }

    pub fn users(&self) -> &BTreeMap<String, User> {
        &self.users
    }

    pub fn posts(&self) -> &BTreeMap<String, Post> {
        &self.posts
    }

    /// Look up a user. `None` means the identifier was never inserted.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Look up a post. `None` means the identifier was never inserted.
    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }

    /// Look up a user, treating absence as an error.
    pub fn require_user(&self, id: &str) -> Result<&User, SeedError> {
        self.user(id).ok_or_else(|| SeedError::NotFound {
            category: CategoryKind::Users,
            id: id.to_string(),
        })
    }

    /// Look up a post, treating absence as an error.
    pub fn require_post(&self, id: &str) -> Result<&Post, SeedError> {
        self.post(id).ok_or_else(|| SeedError::NotFound {
            category: CategoryKind::Posts,
            id: id.to_string(),
        })
    }

    /// Whether `id` is present in `category`.
    pub fn contains(&self, category: CategoryKind, id: &str) -> bool {
        match category {
            CategoryKind::Users => self.users.contains_key(id),
            CategoryKind::Posts => self.posts.contains_key(id),
        }
    }

    pub fn counts(&self) -> SeedCounts {
        SeedCounts {
            users: self.users.len(),
            posts: self.posts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }

    /// Posts whose author is not a user of this snapshot, in post-id order.
    pub fn dangling_authors(&self) -> Vec<DanglingAuthor> {
        self.posts
            .values()
            .filter(|post| !self.users.contains_key(&post.author_id))
            .map(|post| DanglingAuthor {
                post_id: post.id.clone(),
                author_id: post.author_id.clone(),
            })
            .collect()
    }

    /// Fail on the first post (by id) whose author is not a user here.
    pub fn validate_references(&self) -> Result<(), SeedError> {
        match self.dangling_authors().into_iter().next() {
            Some(DanglingAuthor { post_id, author_id }) => {
                Err(SeedError::DanglingAuthor { post_id, author_id })
            }
            None => Ok(()),
        }
    }
}
