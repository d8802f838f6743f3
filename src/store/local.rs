//! JSON-file gift store.
//!
//! Snapshot-semantics backend: the whole collection lives in one JSON file
//! that is re-read on open and rewritten on every mutation. No live change
//! feed; callers re-read after mutating.

use async_trait::async_trait;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

use super::GiftStore;
use crate::errors::AppError;
use crate::models::Gift;

/// File-backed gift store with synchronous snapshot semantics.
pub struct JsonFileStore {
    path: PathBuf,
    gifts: Mutex<Vec<Gift>>,
    seq: AtomicU64,
}

impl JsonFileStore {
    /// Open the store, loading the existing file if there is one.
    pub fn open(path: PathBuf) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let gifts = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)
                .map_err(|e| AppError::Store(format!("Corrupt store file: {}", e)))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            gifts: Mutex::new(gifts),
            seq: AtomicU64::new(0),
        })
    }

    /// Timestamp-derived id. The sequence suffix keeps ids unique when two
    /// gifts land in the same millisecond.
    fn next_id(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", millis, seq)
    }

    fn persist(&self, gifts: &[Gift]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(gifts)
            .map_err(|e| AppError::Store(format!("Store error: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Gift>> {
        // A poisoned lock means a writer panicked mid-mutation; the data is
        // still the last persisted state.
        self.gifts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GiftStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Gift>, AppError> {
        let mut gifts = self.lock().clone();
        gifts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(gifts)
    }

    async fn create(&self, name: &str) -> Result<Gift, AppError> {
        let gift = Gift {
            id: self.next_id(),
            name: name.to_string(),
            reserved: false,
            reserved_by: None,
            reserved_at: None,
            created_at: Utc::now().to_rfc3339(),
        };

        let mut gifts = self.lock();
        gifts.push(gift.clone());
        self.persist(&gifts)?;
        Ok(gift)
    }

    async fn reserve(&self, id: &str, guest_name: &str) -> Result<Gift, AppError> {
        let mut gifts = self.lock();

        let gift = gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Gift {} not found", id)))?;

        if gift.reserved {
            return Err(AppError::Conflict(format!(
                "Gift {} is already reserved",
                id
            )));
        }

        gift.reserved = true;
        gift.reserved_by = Some(guest_name.to_string());
        gift.reserved_at = Some(Utc::now().to_rfc3339());
        let reserved = gift.clone();

        self.persist(&gifts)?;
        Ok(reserved)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut gifts = self.lock();
        gifts.retain(|g| g.id != id);
        self.persist(&gifts)?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        let mut gifts = self.lock();
        gifts.clear();
        self.persist(&gifts)?;
        Ok(())
    }

    async fn replace_all(&self, new_gifts: &[Gift]) -> Result<(), AppError> {
        let mut gifts = self.lock();
        *gifts = new_gifts.to_vec();
        self.persist(&gifts)?;
        Ok(())
    }

    fn subscribe(&self) -> Option<watch::Receiver<Vec<Gift>>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(dir.path().join("gifts.json")).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let gift = store.create("Toalhas").await.unwrap();
        assert!(!gift.reserved);
        assert!(gift.reserved_by.is_none());

        let gifts = store.list().await.unwrap();
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].name, "Toalhas");
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gifts.json");

        let store = JsonFileStore::open(path.clone()).unwrap();
        store.create("Jogo de Panelas").await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        let gifts = reopened.list().await.unwrap();
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].name, "Jogo de Panelas");
    }

    #[tokio::test]
    async fn test_reserve_is_one_way() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let gift = store.create("Cafeteira").await.unwrap();

        let reserved = store.reserve(&gift.id, "Maria").await.unwrap();
        assert!(reserved.reserved);
        assert_eq!(reserved.reserved_by.as_deref(), Some("Maria"));
        assert!(reserved.reserved_at.is_some());

        // Second reservation loses and leaves the first untouched.
        let err = store.reserve(&gift.id, "João").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let gifts = store.list().await.unwrap();
        assert_eq!(gifts[0].reserved_by.as_deref(), Some("Maria"));
    }

    #[tokio::test]
    async fn test_reserve_missing_gift() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let err = store.reserve("nope", "Maria").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let gift = store.create("Liquidificador").await.unwrap();

        store.delete(&gift.id).await.unwrap();
        store.delete(&gift.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.create("A").await.unwrap();
        store.create("B").await.unwrap();

        store.clear_all().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique_within_a_millisecond() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let a = store.create("A").await.unwrap();
        let b = store.create("B").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_no_change_feed() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.subscribe().is_none());
    }
}
