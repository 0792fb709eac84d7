//! `seedling apply`: replay a seed file into a builder and commit it.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use seedling_core::seed::SeedBuilder;
use seedling_infra::seed_file::load_seed_file;
use seedling_types::seed::SeedSnapshot;

use crate::state::AppState;

/// Apply a seed file.
///
/// With `dry_run`, the snapshot is built and (if the service is strict)
/// reference-checked, but nothing is written.
pub async fn apply_seed(state: &AppState, path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let file = load_seed_file(path)
        .await
        .with_context(|| format!("failed to load seed file {}", path.display()))?;

    let mut builder = SeedBuilder::new();
    builder.apply_file(&file)?;

    if dry_run {
        let snapshot = builder.commit();
        if state.seed_service.is_strict() {
            snapshot.validate_references()?;
        }
        return print_snapshot(&snapshot, None, json);
    }

    let receipt = state.seed_service.commit(&builder).await?;
    print_snapshot(&receipt.snapshot, Some(&receipt.batch.id.to_string()), json)
}

fn print_snapshot(snapshot: &SeedSnapshot, batch_id: Option<&str>, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "batch": batch_id,
            "dry_run": batch_id.is_none(),
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let counts = snapshot.counts();
    println!();
    match batch_id {
        Some(id) => println!(
            "  {} Committed {} users and {} posts (batch {})",
            style("ok").green(),
            style(counts.users).cyan(),
            style(counts.posts).cyan(),
            style(id).dim(),
        ),
        None => println!(
            "  {} Dry run: {} users and {} posts would be committed",
            style("i").blue().bold(),
            style(counts.users).cyan(),
            style(counts.posts).cyan(),
        ),
    }

    let dangling = snapshot.dangling_authors();
    if !dangling.is_empty() {
        println!(
            "  {} {} post(s) reference unknown authors (run `seedling check`)",
            style("!").yellow().bold(),
            dangling.len(),
        );
    }
    println!();

    Ok(())
}
