//! Seed store trait definition.

use seedling_types::batch::SeedBatch;
use seedling_types::error::RepositoryError;
use seedling_types::record::{Post, User};
use seedling_types::seed::SeedSnapshot;

/// Persistence collaborator for committed seed snapshots.
///
/// Implementations live in seedling-infra (e.g., SqliteSeedStore).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SeedStore: Send + Sync {
    /// Write every user, then every post, of `snapshot` as one unit.
    ///
    /// Existing rows with the same identifier are replaced. A failure names the
    /// category and identifier being written (`RepositoryError::Write`).
    fn persist(
        &self,
        snapshot: &SeedSnapshot,
    ) -> impl std::future::Future<Output = Result<SeedBatch, RepositoryError>> + Send;

    /// Load everything currently stored as one snapshot.
    fn load(&self) -> impl std::future::Future<Output = Result<SeedSnapshot, RepositoryError>> + Send;

    /// Get a stored user by identifier.
    fn get_user(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Get a stored post by identifier.
    fn get_post(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;

    /// Committed batches, most recent first.
    fn list_batches(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SeedBatch>, RepositoryError>> + Send;
}
