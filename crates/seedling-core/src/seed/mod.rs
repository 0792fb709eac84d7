//! Runtime seed accumulator.
//!
//! `SeedBuilder` collects users and posts through chained `add` calls and
//! hands out immutable [`SeedSnapshot`]s on `commit`. Inserting an identifier
//! that is already present overwrites the earlier entry (last write wins).
//!
//! The builder stays usable after `commit`; every commit returns an
//! independent snapshot of the state at that moment.

pub mod category;

use std::collections::BTreeMap;

use seedling_types::category::CategoryKind;
use seedling_types::error::SeedError;
use seedling_types::record::{EntryFields, NewPost, NewUser, Post, User};
use seedling_types::seed::SeedSnapshot;
use seedling_types::seed_file::SeedFile;

pub use category::{Category, Posts, Users};

/// Mutable accumulator of seed entries, grouped by category.
#[derive(Debug, Clone, Default)]
pub struct SeedBuilder {
    pub(crate) users: BTreeMap<String, User>,
    pub(crate) posts: BTreeMap<String, Post>,
}

impl SeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry into category `C`, keyed by `id`.
    ///
    /// The identifier becomes the record's `id` field. An existing entry under
    /// the same identifier is replaced.
    pub fn add<C: Category>(&mut self, id: impl Into<String>, fields: C::Fields) -> &mut Self {
        let id = id.into();
        let record = C::into_record(id.clone(), fields);
        let overwrote = C::entries_mut(self).insert(id.clone(), record).is_some();
        tracing::debug!(category = %C::KIND, id = %id, overwrote, "seed entry added");
        self
    }

    pub fn add_user(&mut self, id: impl Into<String>, fields: NewUser) -> &mut Self {
        self.add::<Users>(id, fields)
    }

    pub fn add_post(&mut self, id: impl Into<String>, fields: NewPost) -> &mut Self {
        self.add::<Posts>(id, fields)
    }

    /// Insert an entry whose category is chosen at runtime.
    ///
    /// Fails if `fields` belong to a different category than `category`;
    /// nothing is inserted in that case.
    pub fn add_entry(
        &mut self,
        category: CategoryKind,
        id: impl Into<String>,
        fields: EntryFields,
    ) -> Result<&mut Self, SeedError> {
        let id = id.into();
        match (category, fields) {
            (CategoryKind::Users, EntryFields::User(fields)) => Ok(self.add::<Users>(id, fields)),
            (CategoryKind::Posts, EntryFields::Post(fields)) => Ok(self.add::<Posts>(id, fields)),
            (expected, fields) => Err(SeedError::CategoryMismatch {
                id,
                expected,
                actual: fields.kind(),
            }),
        }
    }

    /// Replay every entry of a seed file, in file order.
    ///
    /// Stops at the first mismatched entry; entries before it stay applied.
    pub fn apply_file(&mut self, file: &SeedFile) -> Result<&mut Self, SeedError> {
        for entry in &file.entries {
            self.add_entry(entry.category, entry.id.clone(), entry.fields.clone())?;
        }
        Ok(self)
    }

    /// Snapshot the accumulated state.
    pub fn commit(&self) -> SeedSnapshot {
        let snapshot = SeedSnapshot::new(self.users.clone(), self.posts.clone());
        tracing::info!(
            users = self.users.len(),
            posts = self.posts.len(),
            "seed builder committed"
        );
        snapshot
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.users.len() + self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedling_types::record::{NewPost, NewUser};

    #[test]
    fn test_scenario_users_and_posts() {
        let mut builder = SeedBuilder::new();
        builder
            .add_user("matt", NewUser::new("Matt"))
            .add_post("post1", NewPost::new("Post 2", "matt"))
            .add_post("post2", NewPost::new("Post", "matt"));

        let snapshot = builder.commit();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "users": {"matt": {"id": "matt", "name": "Matt"}},
                "posts": {
                    "post1": {"id": "post1", "title": "Post 2", "author_id": "matt"},
                    "post2": {"id": "post2", "title": "Post", "author_id": "matt"}
                }
            })
        );
    }

    #[test]
    fn test_empty_commit() {
        let snapshot = SeedBuilder::new().commit();
        assert!(snapshot.is_empty());
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            serde_json::json!({"users": {}, "posts": {}})
        );
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut builder = SeedBuilder::new();
        builder
            .add_user("a", NewUser::new("Ann"))
            .add_post("b", NewPost::new("Hello", "a"));

        let first = builder.commit();
        let second = builder.commit();
        assert_eq!(first, second);
        assert_eq!(first.user("a").unwrap(), &User::from_fields("a", NewUser::new("Ann")));
        assert_eq!(
            first.post("b").unwrap(),
            &Post::from_fields("b", NewPost::new("Hello", "a"))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut builder = SeedBuilder::new();
        builder
            .add_post("p", NewPost::new("First", "x"))
            .add_post("p", NewPost::new("Second", "y"));

        let snapshot = builder.commit();
        assert_eq!(snapshot.posts().len(), 1);
        let post = snapshot.post("p").unwrap();
        assert_eq!(post.title, "Second");
        assert_eq!(post.author_id, "y");
    }

    #[test]
    fn test_categories_are_independent() {
        let mut builder = SeedBuilder::new();
        builder.add_user("shared", NewUser::new("User"));
        builder.add_post("shared", NewPost::new("Post", "shared"));

        let snapshot = builder.commit();
        assert_eq!(snapshot.user("shared").unwrap().name, "User");
        assert_eq!(snapshot.post("shared").unwrap().title, "Post");
        assert_eq!(snapshot.counts().users, 1);
        assert_eq!(snapshot.counts().posts, 1);
    }

    #[test]
    fn test_order_of_distinct_entries_is_irrelevant() {
        let mut forward = SeedBuilder::new();
        forward
            .add_user("a", NewUser::new("A"))
            .add_user("b", NewUser::new("B"))
            .add_post("p", NewPost::new("P", "a"));

        let mut reverse = SeedBuilder::new();
        reverse
            .add_post("p", NewPost::new("P", "a"))
            .add_user("b", NewUser::new("B"))
            .add_user("a", NewUser::new("A"));

        assert_eq!(forward.commit(), reverse.commit());
    }

    #[test]
    fn test_order_of_repeated_entries_decides_winner() {
        let mut one = SeedBuilder::new();
        one.add_user("a", NewUser::new("First"))
            .add_user("a", NewUser::new("Second"));

        let mut two = SeedBuilder::new();
        two.add_user("a", NewUser::new("Second"))
            .add_user("a", NewUser::new("First"));

        assert_eq!(one.commit().user("a").unwrap().name, "Second");
        assert_eq!(two.commit().user("a").unwrap().name, "First");
    }

    #[test]
    fn test_builder_usable_after_commit() {
        let mut builder = SeedBuilder::new();
        builder.add_user("a", NewUser::new("A"));
        let before = builder.commit();

        builder.add_user("b", NewUser::new("B"));
        let after = builder.commit();

        assert_eq!(before.counts().users, 1);
        assert_eq!(after.counts().users, 2);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_add_entry_rejects_mismatched_fields() {
        let mut builder = SeedBuilder::new();
        let err = builder
            .add_entry(
                CategoryKind::Users,
                "post1",
                EntryFields::Post(NewPost::new("T", "matt")),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            SeedError::CategoryMismatch {
                expected: CategoryKind::Users,
                actual: CategoryKind::Posts,
                ..
            }
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_add_entry_dispatches_by_category() {
        let mut builder = SeedBuilder::new();
        builder
            .add_entry(CategoryKind::Users, "matt", NewUser::new("Matt").into())
            .unwrap()
            .add_entry(CategoryKind::Posts, "p", NewPost::new("T", "matt").into())
            .unwrap();

        let snapshot = builder.commit();
        assert!(snapshot.contains(CategoryKind::Users, "matt"));
        assert!(snapshot.contains(CategoryKind::Posts, "p"));
    }

    #[test]
    fn test_apply_file_replays_in_order() {
        let file = SeedFile::parse(
            r#"
[[entries]]
category = "users"
id = "matt"
name = "Matt"

[[entries]]
category = "users"
id = "matt"
name = "Matthew"
"#,
            seedling_types::seed_file::SeedFormat::Toml,
        )
        .unwrap();

        let mut builder = SeedBuilder::new();
        builder.apply_file(&file).unwrap();
        assert_eq!(builder.commit().user("matt").unwrap().name, "Matthew");
    }

    #[test]
    fn test_dangling_author_is_accepted_unchecked() {
        let mut builder = SeedBuilder::new();
        builder.add_post("p", NewPost::new("Orphan", "nobody"));

        let snapshot = builder.commit();
        assert!(snapshot.post("p").is_some());
        assert!(snapshot.validate_references().is_err());
    }
}
