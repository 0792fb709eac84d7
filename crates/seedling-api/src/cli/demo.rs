//! `seedling demo`: the users/posts example built with the typed builder.

use anyhow::Result;
use console::style;

use seedling_core::seed_keys;
use seedling_core::typed::{Cons, Nil, TypedSeedBuilder, TypedSnapshot};
use seedling_types::record::{NewPost, NewUser};

seed_keys! {
    pub Matt = "matt";
    pub Post1 = "post1";
    pub Post2 = "post2";
}

type DemoSnapshot = TypedSnapshot<Cons<Matt, Nil>, Cons<Post2, Cons<Post1, Nil>>>;

/// Build the example seed set. No database is touched.
pub fn build_demo() -> DemoSnapshot {
    TypedSeedBuilder::new()
        .add_user::<Matt>(NewUser::new("Matt"))
        .add_post_by::<Post1, Matt, _>("Post 2")
        .add_post::<Post2>(NewPost::new("Post", "matt"))
        .commit()
}

pub fn run(json: bool) -> Result<()> {
    let snapshot = build_demo();

    if json {
        println!("{}", serde_json::to_string_pretty(snapshot.untyped())?);
        return Ok(());
    }

    // Typed lookups: no Option, the keys are proven present by the type.
    let author = snapshot.user::<Matt, _>();
    let first = snapshot.post::<Post1, _>();
    let second = snapshot.post::<Post2, _>();

    println!();
    println!(
        "  {} {} wrote '{}' and '{}'",
        style("ok").green(),
        style(&author.name).cyan(),
        first.title,
        second.title,
    );
    println!();
    println!("{}", serde_json::to_string_pretty(snapshot.untyped())?);
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_matches_expected_snapshot() {
        let snapshot = build_demo();
        assert_eq!(
            serde_json::to_value(snapshot.untyped()).unwrap(),
            serde_json::json!({
                "users": {"matt": {"id": "matt", "name": "Matt"}},
                "posts": {
                    "post1": {"id": "post1", "title": "Post 2", "author_id": "matt"},
                    "post2": {"id": "post2", "title": "Post", "author_id": "matt"}
                }
            })
        );
    }
}
