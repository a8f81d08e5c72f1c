use async_trait::async_trait;
use anyhow::Result;

mod sqlite;
pub use sqlite::SqliteFavoritesStore;

/// Durable store for the user's preferred club names.
///
/// The backing medium is an implementation detail; callers only see the
/// list semantics.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn migrate(&self) -> Result<()>;

    /// Current favorites. Never fails: any storage or parse problem
    /// degrades to an empty list.
    async fn load(&self) -> Vec<String>;

    /// Overwrite the stored favorites with the given list.
    async fn save(&self, clubs: &[String]) -> Result<()>;
}
