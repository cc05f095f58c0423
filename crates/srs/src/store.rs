use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kickoff_conversation::Language;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::DocumentNotFound;

/// Opaque 128-bit random document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocumentId {
    type Err = DocumentNotFound;

    // anything that is not a UUID cannot have been issued by the store
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DocumentNotFound(s.to_string()))
    }
}

/// Where a document came from. Informational only; the record never points
/// back at the live transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub language: Language,
    pub source_turns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub provenance: Provenance,
}

/// Unbounded, process-lifetime map from id to synthesized content.
/// Records are immutable once stored and are never evicted.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: Arc<RwLock<HashMap<DocumentId, Arc<DocumentRecord>>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, content: impl Into<String>, provenance: Provenance) -> DocumentId {
        let mut records = self.records.write().await;

        let mut id = DocumentId::new();
        while records.contains_key(&id) {
            id = DocumentId::new();
        }

        let record = DocumentRecord {
            id,
            content: content.into(),
            created_at: Utc::now(),
            provenance,
        };
        tracing::debug!(document_id = %id, chars = record.content.len(), "document_stored");

        records.insert(id, Arc::new(record));
        id
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Arc<DocumentRecord>, DocumentNotFound> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DocumentNotFound::from(*id))
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
