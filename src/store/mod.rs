//! Match persistence behind a document-store interface.
//!
//! The engines never touch storage. The service reads a document, applies a
//! move, and writes the result back with [`MatchStore::update_if`], which
//! refuses the write when another move landed in between.

#![cfg(feature = "std")]

use std::fmt;

use tokio::sync::broadcast;

use crate::common::MatchId;
use crate::game::MatchDocument;

pub mod in_memory;

/// Errors returned by a match store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(MatchId),
    AlreadyExists(MatchId),
    /// Stored revision moved on since the document was read.
    StaleRevision { expected: u64, actual: u64 },
    /// Document could not be encoded or decoded.
    Codec(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Match {} not found", id),
            StoreError::AlreadyExists(id) => write!(f, "Match {} already exists", id),
            StoreError::StaleRevision { expected, actual } => write!(
                f,
                "Stale state, please retry (expected revision {}, store has {})",
                expected, actual
            ),
            StoreError::Codec(msg) => write!(f, "Codec error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait::async_trait]
pub trait MatchStore: Send + Sync {
    async fn create(&self, doc: &MatchDocument) -> Result<(), StoreError>;

    async fn load(&self, id: &MatchId) -> Result<MatchDocument, StoreError>;

    /// Replace the stored document only if its revision still equals
    /// `expected_revision`.
    async fn update_if(&self, expected_revision: u64, doc: &MatchDocument) -> Result<(), StoreError>;

    /// Stream of every document written for `id` from now on.
    async fn subscribe(&self, id: &MatchId) -> Result<broadcast::Receiver<MatchDocument>, StoreError>;
}

/// Serialize a document with bincode.
pub fn encode(doc: &MatchDocument) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(doc).map_err(|e| StoreError::Codec(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> Result<MatchDocument, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}
