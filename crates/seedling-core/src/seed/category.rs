//! Compile-time category selectors.
//!
//! `Users` and `Posts` are zero-sized selectors for [`SeedBuilder::add`].
//! Each one ties a category to its input fields, its stored record, and the
//! collection inside the builder it writes to. The trait is sealed: the set
//! of categories is fixed.

use std::collections::BTreeMap;

use seedling_types::category::CategoryKind;
use seedling_types::record::{NewPost, NewUser, Post, User};

use super::SeedBuilder;

mod sealed {
    pub trait Sealed {}
}

/// A category a seed builder can accumulate entries into.
pub trait Category: sealed::Sealed {
    /// Runtime name of this category.
    const KIND: CategoryKind;

    /// Caller-supplied fields, excluding `id`.
    type Fields;

    /// The stored record, including `id`.
    type Record: Clone;

    fn into_record(id: String, fields: Self::Fields) -> Self::Record;

    fn entries_mut(builder: &mut SeedBuilder) -> &mut BTreeMap<String, Self::Record>;
}

/// Selector for the `users` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Users;

/// Selector for the `posts` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posts;

impl sealed::Sealed for Users {}
impl sealed::Sealed for Posts {}

impl Category for Users {
    const KIND: CategoryKind = CategoryKind::Users;
    type Fields = NewUser;
    type Record = User;

    fn into_record(id: String, fields: NewUser) -> User {
        User::from_fields(id, fields)
    }

    fn entries_mut(builder: &mut SeedBuilder) -> &mut BTreeMap<String, User> {
        &mut builder.users
    }
}

impl Category for Posts {
    const KIND: CategoryKind = CategoryKind::Posts;
    type Fields = NewPost;
    type Record = Post;

    fn into_record(id: String, fields: NewPost) -> Post {
        Post::from_fields(id, fields)
    }

    fn entries_mut(builder: &mut SeedBuilder) -> &mut BTreeMap<String, Post> {
        &mut builder.posts
    }
}
