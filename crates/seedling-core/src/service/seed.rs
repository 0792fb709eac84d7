//! Seed commit service.
//!
//! Turns a builder into a snapshot and hands it to the persistence
//! collaborator. Store failures come back to the caller untouched (wrapped in
//! `SeedError::Persist`); there is no retry and no local recovery.

use seedling_types::batch::{SeedBatch, SeedReceipt};
use seedling_types::error::SeedError;
use seedling_types::record::{Post, User};
use seedling_types::seed::SeedSnapshot;

use crate::repository::seed::SeedStore;
use crate::seed::SeedBuilder;

/// Service committing seed builders to a [`SeedStore`].
pub struct SeedService<S: SeedStore> {
    store: S,
    strict_references: bool,
}

impl<S: SeedStore> SeedService<S> {
    /// Create a service. Author references are not checked.
    pub fn new(store: S) -> Self {
        Self {
            store,
            strict_references: false,
        }
    }

    /// Reject commits with posts whose author is not a user of the same commit.
    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict_references
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot `builder` and persist it.
    pub async fn commit(&self, builder: &SeedBuilder) -> Result<SeedReceipt, SeedError> {
        self.commit_snapshot(builder.commit()).await
    }

    /// Persist an already committed snapshot.
    pub async fn commit_snapshot(&self, snapshot: SeedSnapshot) -> Result<SeedReceipt, SeedError> {
        if self.strict_references {
            snapshot.validate_references()?;
        }

        let batch = self.store.persist(&snapshot).await.map_err(|e| {
            tracing::warn!(error = %e, "seed persistence failed");
            SeedError::Persist(e)
        })?;

        tracing::info!(
            batch = %batch.id,
            users = batch.counts.users,
            posts = batch.counts.posts,
            "seed batch persisted"
        );

        Ok(SeedReceipt { batch, snapshot })
    }

    /// Everything currently persisted.
    pub async fn load(&self) -> Result<SeedSnapshot, SeedError> {
        Ok(self.store.load().await?)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, SeedError> {
        Ok(self.store.get_user(id).await?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, SeedError> {
        Ok(self.store.get_post(id).await?)
    }

    /// Committed batches, most recent first.
    pub async fn history(&self) -> Result<Vec<SeedBatch>, SeedError> {
        Ok(self.store.list_batches().await?)
    }
}
