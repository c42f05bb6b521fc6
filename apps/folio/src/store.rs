//! Record store — the read-only table of candidate records.
//!
//! Content lives in a declarative JSON file:
//!
//! ```json
//! { "records": [ { "id": "joshua", "name": "...", ... } ],
//!   "downloads": { "joshua": "resumes/joshua_resume.pdf" } }
//! ```
//!
//! It is parsed and validated once at startup. After that the store exposes
//! lookups only; there is no mutation API.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::{FolioError, Result};
use crate::export::download::DownloadRegistry;
use crate::models::{CandidateRecord, RecordId};

#[derive(Debug, Deserialize)]
struct ContentFile {
    records: Vec<CandidateRecord>,
    #[serde(default)]
    downloads: BTreeMap<RecordId, String>,
}

/// Immutable id → record mapping, remembering the order records were declared in.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<RecordId, CandidateRecord>,
    order: Vec<RecordId>,
}

impl RecordStore {
    /// Builds a store, rejecting empty ids, duplicate ids, and nameless records.
    pub fn new(records: Vec<CandidateRecord>) -> Result<Self> {
        let mut map = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());

        for record in records {
            if record.id.as_str().trim().is_empty() {
                return Err(FolioError::InvalidContent(
                    "record with an empty id".to_string(),
                ));
            }
            if record.name.trim().is_empty() {
                return Err(FolioError::InvalidContent(format!(
                    "record '{}' has an empty name",
                    record.id
                )));
            }
            if map.contains_key(&record.id) {
                return Err(FolioError::InvalidContent(format!(
                    "duplicate record id '{}'",
                    record.id
                )));
            }
            order.push(record.id.clone());
            map.insert(record.id.clone(), record);
        }

        Ok(Self {
            records: map,
            order,
        })
    }

    /// Looks up a record. An unknown id is an explicit `RecordNotFound`.
    pub fn lookup(&self, id: &str) -> Result<&CandidateRecord> {
        self.records
            .get(id)
            .ok_or_else(|| FolioError::RecordNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Record ids in declaration order.
    pub fn ids(&self) -> &[RecordId] {
        &self.order
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Everything loaded from the content file.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub store: RecordStore,
    pub downloads: DownloadRegistry,
}

impl Content {
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ContentFile = serde_json::from_str(raw)?;
        let store = RecordStore::new(file.records)?;

        let known: HashSet<&str> = store.ids().iter().map(RecordId::as_str).collect();
        for id in file.downloads.keys() {
            if !known.contains(id.as_str()) {
                warn!("Download registered for unknown record '{id}'");
            }
        }

        Ok(Self {
            store,
            downloads: DownloadRegistry::new(file.downloads),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let content = Self::from_json(&raw)?;
        info!(
            "Loaded {} records and {} downloads from {}",
            content.store.len(),
            content.downloads.len(),
            path.display()
        );
        Ok(content)
    }
}
