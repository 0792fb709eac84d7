//! Seed file documents.
//!
//! A seed file lists entries in the order they should be applied:
//!
//! ```toml
//! [[entries]]
//! category = "users"
//! id = "matt"
//! name = "Matt"
//!
//! [[entries]]
//! category = "posts"
//! id = "post1"
//! title = "Post 2"
//! author_id = "matt"
//! ```
//!
//! The same shape is accepted as JSON (`{"entries": [...]}`). Keys other
//! than `category`, `id` and the fields of the entry's category are rejected.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::category::CategoryKind;
use crate::error::SeedError;
use crate::record::EntryFields;

/// Encoding of a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Toml,
    Json,
}

impl SeedFormat {
    /// Pick the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SeedFormat::Json,
            _ => SeedFormat::Toml,
        }
    }
}

/// One operation in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub category: CategoryKind,
    pub id: String,
    #[serde(flatten)]
    pub fields: EntryFields,
}

/// A parsed seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

impl SeedEntry {
    /// Keys every entry carries besides its category fields.
    const COMMON_KEYS: [&'static str; 2] = ["category", "id"];

    fn check_keys<'a>(&self, mut keys: impl Iterator<Item = &'a String>) -> Result<(), SeedError> {
        let allowed = self.fields.field_names();
        match keys.find(|key| {
            !Self::COMMON_KEYS.contains(&key.as_str()) && !allowed.contains(&key.as_str())
        }) {
            Some(key) => Err(SeedError::InvalidSeedFile(format!(
                "{} entry '{}' has unknown field '{key}'",
                self.fields.kind(),
                self.id
            ))),
            None => Ok(()),
        }
    }
}

/// Key-only view of a seed file. `flatten` rules out `deny_unknown_fields`
/// on `SeedEntry`, so leftover keys are found here instead.
#[derive(Deserialize)]
struct RawSeedFile {
    #[serde(default)]
    entries: Vec<BTreeMap<String, IgnoredAny>>,
}

fn decode<T: DeserializeOwned>(content: &str, format: SeedFormat) -> Result<T, SeedError> {
    match format {
        SeedFormat::Toml => {
            toml::from_str(content).map_err(|e| SeedError::InvalidSeedFile(e.to_string()))
        }
        SeedFormat::Json => {
            serde_json::from_str(content).map_err(|e| SeedError::InvalidSeedFile(e.to_string()))
        }
    }
}

impl SeedFile {
    pub fn parse(content: &str, format: SeedFormat) -> Result<Self, SeedError> {
        let file: SeedFile = decode(content, format)?;
        let raw: RawSeedFile = decode(content, format)?;
        for (entry, keys) in file.entries.iter().zip(&raw.entries) {
            entry.check_keys(keys.keys())?;
        }
        Ok(file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
