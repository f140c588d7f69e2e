#![cfg(feature = "std")]

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::common::MatchId;
use crate::game::MatchDocument;
use crate::store::{decode, encode, MatchStore, StoreError};

const SUBSCRIBER_CAPACITY: usize = 64;

struct Entry {
    bytes: Vec<u8>,
    revision: u64,
    updates: broadcast::Sender<MatchDocument>,
}

/// Process-local store keeping bincode-encoded documents. Clones share the
/// same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<MatchId, Entry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored matches.
    pub async fn match_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait::async_trait]
impl MatchStore for InMemoryStore {
    async fn create(&self, doc: &MatchDocument) -> Result<(), StoreError> {
        let bytes = encode(doc)?;
        let mut entries = self.entries.lock().await;
        if entries.contains_key(doc.match_id()) {
            return Err(StoreError::AlreadyExists(doc.match_id().clone()));
        }
        let (updates, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        entries.insert(
            doc.match_id().clone(),
            Entry {
                bytes,
                revision: doc.revision(),
                updates,
            },
        );
        Ok(())
    }

    async fn load(&self, id: &MatchId) -> Result<MatchDocument, StoreError> {
        let entries = self.entries.lock().await;
        let entry = entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        decode(&entry.bytes)
    }

    async fn update_if(&self, expected_revision: u64, doc: &MatchDocument) -> Result<(), StoreError> {
        let bytes = encode(doc)?;
        let mut entries = self.entries.lock().await;
        let entry = entries
            .get_mut(doc.match_id())
            .ok_or_else(|| StoreError::NotFound(doc.match_id().clone()))?;
        if entry.revision != expected_revision {
            log::debug!(
                "rejecting write to {}: expected revision {}, have {}",
                doc.match_id(),
                expected_revision,
                entry.revision
            );
            return Err(StoreError::StaleRevision {
                expected: expected_revision,
                actual: entry.revision,
            });
        }
        entry.bytes = bytes;
        entry.revision = doc.revision();
        // No subscribers is fine.
        let _ = entry.updates.send(doc.clone());
        Ok(())
    }

    async fn subscribe(&self, id: &MatchId) -> Result<broadcast::Receiver<MatchDocument>, StoreError> {
        let entries = self.entries.lock().await;
        entries
            .get(id)
            .map(|entry| entry.updates.subscribe())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
