use thiserror::Error;

use crate::category::CategoryKind;

/// Errors related to building, validating, and committing seed sets.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{category} entry '{id}' not found")]
    NotFound { category: CategoryKind, id: String },

    #[error("entry '{id}' was given {actual} fields but targets {expected}")]
    CategoryMismatch {
        id: String,
        expected: CategoryKind,
        actual: CategoryKind,
    },

    #[error("post '{post_id}' references unknown author '{author_id}'")]
    DanglingAuthor { post_id: String, author_id: String },

    #[error("invalid seed file: {0}")]
    InvalidSeedFile(String),

    #[error("persistence failed: {0}")]
    Persist(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in seedling-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("failed to write {category} entry '{id}': {message}")]
    Write {
        category: CategoryKind,
        id: String,
        message: String,
    },
}
