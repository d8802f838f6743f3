//! The gift list manager: the core of the registry.
//!
//! Holds the in-memory mirror of the store's collection and the active
//! display filter, and enforces the business rules: name uniqueness on add,
//! availability re-check on reserve, the confirmation-gated clear. The mirror
//! is replaced wholesale on every change, never patched in place.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{Filter, Gift, Snapshot};
use crate::store::GiftStore;

/// A user-facing notification: transient toast text plus severity.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: "success".to_string(),
        }
    }
}

/// In-memory gift list over a pluggable store.
pub struct GiftListManager {
    store: Arc<dyn GiftStore>,
    gifts: RwLock<Vec<Gift>>,
    filter: RwLock<Filter>,
}

impl GiftListManager {
    pub fn new(store: Arc<dyn GiftStore>) -> Self {
        Self {
            store,
            gifts: RwLock::new(Vec::new()),
            filter: RwLock::new(Filter::default()),
        }
    }

    /// Replace the mirror from the store.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let gifts = self.store.list().await?;
        *self.gifts.write().await = gifts;
        Ok(())
    }

    /// If the store has a live change feed, keep the mirror in sync with it.
    /// Backends without one are covered by the per-mutation refresh, so
    /// manager logic is identical either way.
    pub fn spawn_watcher(self: &Arc<Self>) {
        let Some(mut rx) = self.store.subscribe() else {
            return;
        };
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let gifts = rx.borrow_and_update().clone();
                *manager.gifts.write().await = gifts;
            }
        });
    }

    /// Add a gift by name. Rejects empty names and case-insensitive
    /// duplicates of gifts currently in memory; the duplicate check is
    /// best-effort, not a store-level constraint.
    pub async fn add_gift(&self, name: &str) -> Result<(Gift, Notice), AppError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AppError::Validation(
                "Please enter the gift name".to_string(),
            ));
        }

        if self.gifts.read().await.iter().any(|g| g.name_matches(name)) {
            return Err(AppError::Validation(
                "This gift is already on the list".to_string(),
            ));
        }

        let gift = self.store.create(name).await?;
        self.refresh().await?;

        tracing::info!(gift_id = %gift.id, "Gift added: {}", gift.name);
        Ok((gift, Notice::success("Gift added successfully!")))
    }

    /// Set the active display filter.
    pub async fn set_filter(&self, filter: Filter) {
        tracing::debug!("Filter set to {}", filter.as_str());
        *self.filter.write().await = filter;
    }

    /// The currently displayed subset: the mirror projected through the
    /// active filter.
    pub async fn view(&self) -> Vec<Gift> {
        let filter = *self.filter.read().await;
        filtered(&self.gifts.read().await, filter)
    }

    /// Reserve a gift for a named guest.
    ///
    /// Availability is re-checked against the mirror even though the caller
    /// saw the gift as available; the mirror may be stale relative to another
    /// guest's reservation. The store's conditional write is what actually
    /// closes the race.
    pub async fn reserve(&self, gift_id: &str, guest_name: &str) -> Result<(Gift, Notice), AppError> {
        let guest_name = guest_name.trim();

        if guest_name.is_empty() {
            return Err(AppError::Validation("Please enter your name".to_string()));
        }

        {
            let gifts = self.gifts.read().await;
            let gift = gifts
                .iter()
                .find(|g| g.id == gift_id)
                .ok_or_else(|| AppError::NotFound("Gift not found".to_string()))?;

            if gift.reserved {
                return Err(AppError::Conflict(
                    "This gift has already been reserved!".to_string(),
                ));
            }
        }

        let gift = self.store.reserve(gift_id, guest_name).await?;
        self.refresh().await?;

        tracing::info!(gift_id = %gift.id, guest = guest_name, "Gift reserved: {}", gift.name);
        Ok((
            gift.clone(),
            Notice::success(format!(
                "Thank you, {}! The gift \"{}\" has been reserved!",
                guest_name, gift.name
            )),
        ))
    }

    /// Remove a gift. A missing id is reported but otherwise harmless.
    pub async fn remove(&self, gift_id: &str) -> Result<Notice, AppError> {
        let known = self.gifts.read().await.iter().any(|g| g.id == gift_id);
        if !known {
            return Err(AppError::NotFound("Gift not found".to_string()));
        }

        self.store.delete(gift_id).await?;
        self.refresh().await?;

        tracing::info!(gift_id, "Gift removed");
        Ok(Notice::success("Gift removed successfully!"))
    }

    /// Empty the entire collection. The confirmation guard sits at the API
    /// boundary; by the time this runs the caller has committed.
    pub async fn clear_all(&self) -> Result<Notice, AppError> {
        self.store.clear_all().await?;
        self.gifts.write().await.clear();

        tracing::info!("All gifts cleared");
        Ok(Notice::success("All data has been cleared!"))
    }

    /// Serialize the current list into a backup document.
    pub async fn export_snapshot(&self, couple_names: &str) -> Snapshot {
        Snapshot {
            gifts: self.gifts.read().await.clone(),
            export_date: Utc::now().to_rfc3339(),
            couple_names: couple_names.to_string(),
        }
    }

    /// Restore from a backup document. The `gifts` field must be a list;
    /// entries are bulk-loaded without re-checking per-gift uniqueness.
    pub async fn import_snapshot(&self, document: serde_json::Value) -> Result<Notice, AppError> {
        let gifts_value = document
            .get("gifts")
            .filter(|v| v.is_array())
            .cloned()
            .ok_or_else(|| {
                AppError::Validation("Invalid data format: gifts must be a list".to_string())
            })?;

        let gifts: Vec<Gift> = serde_json::from_value(gifts_value)?;

        self.store.replace_all(&gifts).await?;
        self.refresh().await?;

        tracing::info!(count = gifts.len(), "Snapshot imported");
        Ok(Notice::success("Data imported successfully!"))
    }
}

/// Pure projection of a gift list through a filter. Safe to call any number
/// of times; never mutates.
pub fn filtered(gifts: &[Gift], filter: Filter) -> Vec<Gift> {
    match filter {
        Filter::All => gifts.to_vec(),
        Filter::Available => gifts.iter().filter(|g| !g.reserved).cloned().collect(),
        Filter::Reserved => gifts.iter().filter(|g| g.reserved).cloned().collect(),
    }
}
