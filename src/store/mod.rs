//! Storage module: the persistence seam behind the gift list.
//!
//! Two interchangeable backends satisfy the [`GiftStore`] contract: a durable
//! SQLite store that pushes the full re-ordered collection after every change,
//! and a plain JSON file with synchronous snapshot semantics. The manager
//! depends only on the trait.

mod local;
mod sqlite;

pub use local::JsonFileStore;
pub use sqlite::{init_database, SqliteGiftStore};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::Gift;

/// Persistence contract for the gift collection.
///
/// `reserve` is the only partial update the system performs, and it is a
/// conditional write: it succeeds only if the gift is still unreserved, so a
/// lost race between two guests surfaces as a conflict instead of silently
/// overwriting the first reservation.
#[async_trait]
pub trait GiftStore: Send + Sync {
    /// Current collection, ordered by creation time descending.
    async fn list(&self) -> Result<Vec<Gift>, AppError>;

    /// Persist a new unreserved gift and return it.
    async fn create(&self, name: &str) -> Result<Gift, AppError>;

    /// Flip a gift to reserved for `guest_name`, only if still unreserved.
    async fn reserve(&self, id: &str, guest_name: &str) -> Result<Gift, AppError>;

    /// Remove a gift. Deleting a non-existent id is not an error.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Remove every gift.
    async fn clear_all(&self) -> Result<(), AppError>;

    /// Replace the whole collection in one shot (snapshot import).
    async fn replace_all(&self, gifts: &[Gift]) -> Result<(), AppError>;

    /// Live change feed, if this backend has one. Receivers get the full
    /// current collection after every mutation.
    fn subscribe(&self) -> Option<watch::Receiver<Vec<Gift>>>;
}
