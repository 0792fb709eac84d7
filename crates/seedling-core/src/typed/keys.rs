//! Identifier markers and type-level key lists.
//!
//! A [`SeedKey`] lifts an identifier literal into a zero-sized type so the
//! type checker can track it. The typed builder records every key it has
//! seen in a type-level list (`Cons<K, Cons<J, Nil>>`), and [`Contains`]
//! proves membership of a key in such a list.
//!
//! `Contains` carries an index parameter (`Here` / `There<I>`) so the two
//! impls never overlap; callers leave it as `_` and inference fills it in.

use std::marker::PhantomData;

/// A compile-time identifier for a seed entry.
///
/// Usually declared through [`seed_keys!`](crate::seed_keys).
pub trait SeedKey: 'static {
    /// The identifier this key stands for.
    const ID: &'static str;
}

/// Empty key list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nil;

/// Key list with head `K` and tail `T`.
pub struct Cons<K, T>(PhantomData<fn() -> (K, T)>);

/// Index: the key is the head of the list.
pub struct Here;

/// Index: the key is somewhere in the tail, at `I`.
pub struct There<I>(PhantomData<fn() -> I>);

mod sealed {
    pub trait SealedContains<K, I> {}
    pub trait SealedList {}
}

/// Proof that key `K` is a member of the implementing key list.
///
/// Sealed: the only proofs are the ones built from `Here` / `There`, so a
/// key that was never added cannot be claimed from outside this crate.
///
/// ```compile_fail
/// use seedling_core::typed::{Cons, Contains, Nil};
///
/// seedling_core::seed_keys! {
///     Matt = "matt";
///     Kate = "kate";
/// }
///
/// struct Forged;
/// impl Contains<Kate, Forged> for Cons<Matt, Nil> {}
/// ```
pub trait Contains<K, I>: sealed::SealedContains<K, I> {}

impl<K, T> sealed::SealedContains<K, Here> for Cons<K, T> {}
impl<K, T> Contains<K, Here> for Cons<K, T> {}

impl<K, H, T, I> sealed::SealedContains<K, There<I>> for Cons<H, T> where T: Contains<K, I> {}
impl<K, H, T, I> Contains<K, There<I>> for Cons<H, T> where T: Contains<K, I> {}

/// A type-level key list that can enumerate its identifiers.
///
/// Sealed: implemented only for `Nil` and `Cons`.
///
/// ```compile_fail
/// use seedling_core::typed::KeyList;
///
/// struct Fake;
/// impl KeyList for Fake {
///     fn ids() -> Vec<&'static str> {
///         vec!["matt"]
///     }
/// }
/// ```
pub trait KeyList: sealed::SealedList {
    /// Identifiers in insertion order (oldest first).
    fn ids() -> Vec<&'static str>;
}

impl sealed::SealedList for Nil {}
impl<K: SeedKey, T: KeyList> sealed::SealedList for Cons<K, T> {}

impl KeyList for Nil {
    fn ids() -> Vec<&'static str> {
        Vec::new()
    }
}

impl<K: SeedKey, T: KeyList> KeyList for Cons<K, T> {
    fn ids() -> Vec<&'static str> {
        let mut ids = T::ids();
        ids.push(K::ID);
        ids
    }
}

/// Declare zero-sized [`SeedKey`] markers.
///
/// ```
/// seedling_core::seed_keys! {
///     pub Matt = "matt";
///     Post1 = "post1";
/// }
///
/// use seedling_core::typed::SeedKey;
/// assert_eq!(Matt::ID, "matt");
/// assert_eq!(Post1::ID, "post1");
/// ```
#[macro_export]
macro_rules! seed_keys {
    ($($(#[$meta:meta])* $vis:vis $name:ident = $id:literal;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name;

            impl $crate::typed::SeedKey for $name {
                const ID: &'static str = $id;
            }
        )*
    };
}
