//! Read-only commands over persisted seed data: show, get, check, history.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use seedling_types::category::CategoryKind;
use seedling_types::error::SeedError;

use crate::state::AppState;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::White))
            .collect::<Vec<_>>(),
    );
    table
}

/// Print every persisted user and post.
pub async fn show(state: &AppState, json: bool) -> Result<()> {
    let snapshot = state.seed_service.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!();
        println!(
            "  {} No seed data yet in {}.",
            style("i").blue().bold(),
            style(state.data_dir.display()).dim(),
        );
        println!("     Commit some with: seedling apply <file>");
        println!();
        return Ok(());
    }

    let mut users = new_table(&["Id", "Name"]);
    for user in snapshot.users().values() {
        users.add_row(vec![
            Cell::new(&user.id).fg(Color::Cyan),
            Cell::new(&user.name),
        ]);
    }

    let mut posts = new_table(&["Id", "Title", "Author"]);
    for post in snapshot.posts().values() {
        let author = if snapshot.user(&post.author_id).is_some() {
            Cell::new(&post.author_id)
        } else {
            Cell::new(format!("{} (unknown)", post.author_id)).fg(Color::Yellow)
        };
        posts.add_row(vec![
            Cell::new(&post.id).fg(Color::Cyan),
            Cell::new(&post.title),
            author,
        ]);
    }

    let counts = snapshot.counts();
    println!();
    println!("  Users ({})", counts.users);
    println!("{users}");
    println!();
    println!("  Posts ({})", counts.posts);
    println!("{posts}");
    println!();

    Ok(())
}

/// Print one persisted entry, or report that it is absent.
///
/// Absence is an error (non-zero exit), never an empty record.
pub async fn get(state: &AppState, category: CategoryKind, id: &str, json: bool) -> Result<()> {
    let value = match category {
        CategoryKind::Users => state
            .seed_service
            .get_user(id)
            .await?
            .map(serde_json::to_value)
            .transpose()?,
        CategoryKind::Posts => state
            .seed_service
            .get_post(id)
            .await?
            .map(serde_json::to_value)
            .transpose()?,
    };

    let Some(value) = value else {
        return Err(SeedError::NotFound {
            category,
            id: id.to_string(),
        }
        .into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!();
        println!(
            "  {} {} = {}",
            style(category).dim(),
            style(id).cyan().bold(),
            serde_json::to_string_pretty(&value)?,
        );
        println!();
    }

    Ok(())
}

/// Report dangling author references in the persisted data.
pub async fn check(state: &AppState, json: bool) -> Result<()> {
    let snapshot = state.seed_service.load().await?;
    let dangling = snapshot.dangling_authors();

    if json {
        let result = serde_json::json!({
            "dangling_authors": dangling,
            "healthy": dangling.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if dangling.is_empty() {
        println!(
            "  {} All {} posts reference known users",
            style("✓").green(),
            snapshot.counts().posts,
        );
    } else {
        for entry in &dangling {
            println!(
                "  {} post '{}' references unknown author '{}'",
                style("✗").red(),
                style(&entry.post_id).cyan(),
                style(&entry.author_id).yellow(),
            );
        }
    }
    println!();

    Ok(())
}

/// List committed batches.
pub async fn history(state: &AppState, json: bool) -> Result<()> {
    let batches = state.seed_service.history().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batches)?);
        return Ok(());
    }

    if batches.is_empty() {
        println!();
        println!("  {} No batches committed yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = new_table(&["Batch", "Users", "Posts", "Committed"]);
    for batch in &batches {
        table.add_row(vec![
            Cell::new(batch.id).fg(Color::Cyan),
            Cell::new(batch.counts.users),
            Cell::new(batch.counts.posts),
            Cell::new(batch.committed_at.format("%Y-%m-%d %H:%M:%S UTC")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
