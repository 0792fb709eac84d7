//! Typed seed builder.
//!
//! `TypedSeedBuilder<U, P>` wraps a [`SeedBuilder`] and grows its type with
//! every call: `U` and `P` are type-level lists of the [`SeedKey`]s added to
//! the users and posts categories. After `commit`, [`TypedSnapshot::user`]
//! and [`TypedSnapshot::post`] only compile for keys that were added, and
//! return the record directly with no `Option` to check.
//!
//! ```
//! use seedling_core::seed_keys;
//! use seedling_core::typed::TypedSeedBuilder;
//! use seedling_types::record::{NewPost, NewUser};
//!
//! seed_keys! {
//!     Matt = "matt";
//!     Post1 = "post1";
//! }
//!
//! let snapshot = TypedSeedBuilder::new()
//!     .add_user::<Matt>(NewUser::new("Matt"))
//!     .add_post::<Post1>(NewPost::new("Post 2", "matt"))
//!     .commit();
//!
//! assert_eq!(snapshot.user::<Matt, _>().name, "Matt");
//! assert_eq!(snapshot.post::<Post1, _>().author_id, "matt");
//! ```
//!
//! The phantom bookkeeping never influences runtime behaviour: every call
//! forwards to the runtime builder, and [`TypedSnapshot::untyped`] is the
//! same value `SeedBuilder::commit` would have produced.

pub mod keys;

use std::marker::PhantomData;

use seedling_types::record::{NewPost, NewUser, Post, User};
use seedling_types::seed::SeedSnapshot;

use crate::seed::{Posts, SeedBuilder, Users};

pub use keys::{Cons, Contains, Here, KeyList, Nil, SeedKey, There};

/// Builder whose type records which user (`U`) and post (`P`) keys were added.
#[derive(Debug)]
pub struct TypedSeedBuilder<U = Nil, P = Nil> {
    inner: SeedBuilder,
    _shape: PhantomData<fn() -> (U, P)>,
}

impl TypedSeedBuilder<Nil, Nil> {
    pub fn new() -> Self {
        Self {
            inner: SeedBuilder::new(),
            _shape: PhantomData,
        }
    }
}

impl Default for TypedSeedBuilder<Nil, Nil> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, P> Clone for TypedSeedBuilder<U, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _shape: PhantomData,
        }
    }
}

impl<U, P> TypedSeedBuilder<U, P> {
    fn reshape<U2, P2>(self) -> TypedSeedBuilder<U2, P2> {
        TypedSeedBuilder {
            inner: self.inner,
            _shape: PhantomData,
        }
    }

    /// Add user `K`.
    ///
    /// Adding the same key twice compiles and overwrites at runtime, but makes
    /// later typed lookups of that key ambiguous; use
    /// [`overwrite_user`](Self::overwrite_user) to replace an existing user.
    pub fn add_user<K: SeedKey>(mut self, fields: NewUser) -> TypedSeedBuilder<Cons<K, U>, P> {
        self.inner.add::<Users>(K::ID, fields);
        self.reshape()
    }

    /// Add post `K` with an unchecked author reference.
    pub fn add_post<K: SeedKey>(mut self, fields: NewPost) -> TypedSeedBuilder<U, Cons<K, P>> {
        self.inner.add::<Posts>(K::ID, fields);
        self.reshape()
    }

    /// Add post `K` authored by user `A`, which must already be in this builder.
    ///
    /// ```compile_fail
    /// use seedling_core::seed_keys;
    /// use seedling_core::typed::TypedSeedBuilder;
    ///
    /// seed_keys! { Ghost = "ghost"; Post1 = "post1"; }
    ///
    /// // No user `Ghost` was added.
    /// let _ = TypedSeedBuilder::new().add_post_by::<Post1, Ghost, _>("Hello");
    /// ```
    pub fn add_post_by<K: SeedKey, A: SeedKey, I>(
        mut self,
        title: impl Into<String>,
    ) -> TypedSeedBuilder<U, Cons<K, P>>
    where
        U: Contains<A, I>,
    {
        self.inner.add::<Posts>(K::ID, NewPost::new(title, A::ID));
        self.reshape()
    }

    /// Replace user `K`, which must already be present. The type is unchanged.
    pub fn overwrite_user<K: SeedKey, I>(mut self, fields: NewUser) -> Self
    where
        U: Contains<K, I>,
    {
        self.inner.add::<Users>(K::ID, fields);
        self
    }

    /// Replace post `K`, which must already be present. The type is unchanged.
    pub fn overwrite_post<K: SeedKey, I>(mut self, fields: NewPost) -> Self
    where
        P: Contains<K, I>,
    {
        self.inner.add::<Posts>(K::ID, fields);
        self
    }

    /// Snapshot the accumulated state, keeping the key lists in the type.
    pub fn commit(&self) -> TypedSnapshot<U, P> {
        TypedSnapshot {
            inner: self.inner.commit(),
            _shape: PhantomData,
        }
    }

    /// The runtime builder underneath.
    pub fn untyped(&self) -> &SeedBuilder {
        &self.inner
    }

    /// Drop the type-level bookkeeping.
    pub fn into_untyped(self) -> SeedBuilder {
        self.inner
    }
}

impl<U: KeyList, P: KeyList> TypedSeedBuilder<U, P> {
    /// User identifiers known to the type, oldest first.
    pub fn user_keys(&self) -> Vec<&'static str> {
        U::ids()
    }

    /// Post identifiers known to the type, oldest first.
    pub fn post_keys(&self) -> Vec<&'static str> {
        P::ids()
    }
}

/// Snapshot whose type proves which keys are present.
#[derive(Debug)]
pub struct TypedSnapshot<U, P> {
    inner: SeedSnapshot,
    _shape: PhantomData<fn() -> (U, P)>,
}

impl<U, P> Clone for TypedSnapshot<U, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _shape: PhantomData,
        }
    }
}

impl<U, P> TypedSnapshot<U, P> {
    /// The user stored under key `K`.
    ///
    /// ```compile_fail
    /// use seedling_core::seed_keys;
    /// use seedling_core::typed::TypedSeedBuilder;
    /// use seedling_types::record::NewUser;
    ///
    /// seed_keys! { Matt = "matt"; Kate = "kate"; }
    ///
    /// let snapshot = TypedSeedBuilder::new()
    ///     .add_user::<Matt>(NewUser::new("Matt"))
    ///     .commit();
    /// // `Kate` was never added.
    /// let _ = snapshot.user::<Kate, _>();
    /// ```
    pub fn user<K: SeedKey, I>(&self) -> &User
    where
        U: Contains<K, I>,
    {
        // Present by construction: `U` only lists keys the builder inserted.
        &self.inner.users()[K::ID]
    }

    /// The post stored under key `K`.
    pub fn post<K: SeedKey, I>(&self) -> &Post
    where
        P: Contains<K, I>,
    {
        &self.inner.posts()[K::ID]
    }

    pub fn untyped(&self) -> &SeedSnapshot {
        &self.inner
    }

    pub fn into_untyped(self) -> SeedSnapshot {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::seed_keys! {
        Matt = "matt";
        Kate = "kate";
        Post1 = "post1";
        Post2 = "post2";
    }

    #[test]
    fn test_typed_scenario_matches_runtime_builder() {
        let typed = TypedSeedBuilder::new()
            .add_user::<Matt>(NewUser::new("Matt"))
            .add_post::<Post1>(NewPost::new("Post 2", "matt"))
            .add_post::<Post2>(NewPost::new("Post", "matt"))
            .commit();

        let mut runtime = SeedBuilder::new();
        runtime
            .add_user("matt", NewUser::new("Matt"))
            .add_post("post1", NewPost::new("Post 2", "matt"))
            .add_post("post2", NewPost::new("Post", "matt"));

        assert_eq!(typed.untyped(), &runtime.commit());
        assert_eq!(typed.user::<Matt, _>().id, "matt");
        assert_eq!(typed.post::<Post1, _>().title, "Post 2");
        assert_eq!(typed.post::<Post2, _>().title, "Post");
    }

    #[test]
    fn test_add_post_by_uses_author_key() {
        let snapshot = TypedSeedBuilder::new()
            .add_user::<Kate>(NewUser::new("Kate"))
            .add_user::<Matt>(NewUser::new("Matt"))
            .add_post_by::<Post1, Kate, _>("Hello")
            .commit();

        let post = snapshot.post::<Post1, _>();
        assert_eq!(post.author_id, "kate");
        assert!(snapshot.untyped().validate_references().is_ok());
    }

    #[test]
    fn test_overwrite_keeps_type_and_replaces_value() {
        let snapshot = TypedSeedBuilder::new()
            .add_user::<Matt>(NewUser::new("Matt"))
            .overwrite_user::<Matt, _>(NewUser::new("Matthew"))
            .commit();

        assert_eq!(snapshot.user::<Matt, _>().name, "Matthew");
        assert_eq!(snapshot.untyped().counts().users, 1);
    }

    #[test]
    fn test_key_lists_track_insertions() {
        let builder = TypedSeedBuilder::new()
            .add_user::<Matt>(NewUser::new("Matt"))
            .add_user::<Kate>(NewUser::new("Kate"))
            .add_post::<Post1>(NewPost::new("T", "matt"));

        assert_eq!(builder.user_keys(), vec!["matt", "kate"]);
        assert_eq!(builder.post_keys(), vec!["post1"]);
        assert_eq!(builder.untyped().len(), 3);
    }

    #[test]
    fn test_commit_repeatable_and_builder_reusable() {
        let builder = TypedSeedBuilder::new().add_user::<Matt>(NewUser::new("Matt"));
        let first = builder.commit();
        let second = builder.commit();
        assert_eq!(first.untyped(), second.untyped());

        let extended = builder.add_user::<Kate>(NewUser::new("Kate")).commit();
        assert_eq!(extended.untyped().counts().users, 2);
        assert_eq!(first.untyped().counts().users, 1);
    }

    #[test]
    fn test_empty_typed_commit() {
        let snapshot = TypedSeedBuilder::new().commit();
        assert!(snapshot.into_untyped().is_empty());
    }
}
