//! Seed file loading from disk.

use std::path::Path;

use seedling_types::error::SeedError;
use seedling_types::seed_file::{SeedFile, SeedFormat};

/// Read and parse a seed file, choosing TOML or JSON from its extension.
pub async fn load_seed_file(path: &Path) -> Result<SeedFile, SeedError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SeedError::InvalidSeedFile(format!("{}: {e}", path.display())))?;

    let file = SeedFile::parse(&content, SeedFormat::from_path(path))?;
    tracing::debug!(path = %path.display(), entries = file.len(), "seed file loaded");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedling_types::category::CategoryKind;

    #[tokio::test]
    async fn test_load_toml_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        tokio::fs::write(
            &path,
            "[[entries]]\ncategory = \"users\"\nid = \"matt\"\nname = \"Matt\"\n",
        )
        .await
        .unwrap();

        let file = load_seed_file(&path).await.unwrap();
        assert_eq!(file.entries[0].category, CategoryKind::Users);
    }

    #[tokio::test]
    async fn test_load_json_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        tokio::fs::write(
            &path,
            r#"{"entries": [{"category": "posts", "id": "p", "title": "T", "author_id": "a"}]}"#,
        )
        .await
        .unwrap();

        let file = load_seed_file(&path).await.unwrap();
        assert_eq!(file.entries[0].category, CategoryKind::Posts);
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_seed_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
