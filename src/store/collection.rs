//! # Document Collection
//!
//! An in-process document collection. Documents are JSON objects keyed by a
//! store-assigned [`ObjectId`]; every returned document carries its id under
//! `_id`. Listing order is insertion order, kept by a per-collection
//! sequence number rather than by id.
//!
//! Each operation takes the collection lock once, so single operations are
//! atomic. Nothing spans two operations: concurrent read-modify-write cycles
//! from callers resolve last-write-wins.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::object_id::{ObjectId, ObjectIdGenerator};
use super::text_index::{lookup_path, TextIndex, TextQuery};

/// A stored JSON object
pub type Document = Map<String, Value>;

/// Key under which a document's id is reported
pub const ID_FIELD: &str = "_id";

/// Collection definition: name and indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    /// Field paths covered by the text index (empty: no text index)
    #[serde(default)]
    pub text_index: Vec<String>,
    /// Field paths with a unique index
    #[serde(default)]
    pub unique_fields: Vec<String>,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text_index: Vec::new(),
            unique_fields: Vec::new(),
        }
    }

    pub fn with_text_index<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_index = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unique<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Which snapshot an update returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnDocument {
    /// The document as it was before the update
    #[default]
    Before,
    /// The document with the update applied
    After,
}

/// Query filter for [`DocumentStore::find`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document
    All,
    /// Documents whose text index matches the search string
    Text(String),
}

/// Document collection operations.
///
/// Ids are passed as strings and parsed by the store, so a malformed id
/// surfaces as a store error rather than a caller-side panic.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Collection name
    fn name(&self) -> &str;

    /// Inserts a document and returns it with its assigned `_id`.
    ///
    /// Any `_id` in the input is ignored.
    async fn insert_one(&self, document: Document) -> StoreResult<Document>;

    /// Returns matching documents in insertion order
    async fn find(&self, filter: Filter) -> StoreResult<Vec<Document>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>>;

    /// Applies `$set`-style assignments to one document.
    ///
    /// Top-level keys replace the field; dotted keys set nested fields.
    /// Returns `None` if no document has the id.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        set: Document,
        returning: ReturnDocument,
    ) -> StoreResult<Option<Document>>;

    /// Removes one document and returns it, or `None` if absent
    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Document>>;

    async fn count(&self) -> usize;
}

/// Documents in insertion order, addressable by id
#[derive(Debug, Default)]
struct Rows {
    next_seq: u64,
    by_seq: BTreeMap<u64, ObjectId>,
    by_id: HashMap<ObjectId, (u64, Document)>,
}

impl Rows {
    fn insert(&mut self, id: ObjectId, document: Document) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_seq.insert(seq, id);
        self.by_id.insert(id, (seq, document));
    }

    fn get(&self, id: &ObjectId) -> Option<&Document> {
        self.by_id.get(id).map(|(_, doc)| doc)
    }

    /// Replaces a document in place, keeping its position
    fn replace(&mut self, id: &ObjectId, document: Document) {
        if let Some(entry) = self.by_id.get_mut(id) {
            entry.1 = document;
        }
    }

    fn remove(&mut self, id: &ObjectId) -> Option<Document> {
        let (seq, document) = self.by_id.remove(id)?;
        self.by_seq.remove(&seq);
        Some(document)
    }

    fn iter(&self) -> impl Iterator<Item = (ObjectId, &Document)> + '_ {
        self.by_seq
            .values()
            .filter_map(move |id| self.get(id).map(|doc| (*id, doc)))
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}

/// In-memory [`DocumentStore`]
#[derive(Debug)]
pub struct MemoryCollection {
    spec: CollectionSpec,
    text_index: TextIndex,
    ids: ObjectIdGenerator,
    documents: RwLock<Rows>,
}

impl MemoryCollection {
    pub fn new(spec: CollectionSpec) -> Self {
        Self {
            text_index: TextIndex::new(spec.text_index.clone()),
            spec,
            ids: ObjectIdGenerator::new(),
            documents: RwLock::new(Rows::default()),
        }
    }

    pub fn spec(&self) -> &CollectionSpec {
        &self.spec
    }

    /// Fails if `candidate` repeats a uniquely indexed value of another document
    fn check_unique(
        &self,
        documents: &Rows,
        candidate_id: ObjectId,
        candidate: &Document,
    ) -> StoreResult<()> {
        for field in &self.spec.unique_fields {
            let Some(value) = lookup_path(candidate, field).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = documents
                .iter()
                .filter(|(id, _)| *id != candidate_id)
                .any(|(_, doc)| lookup_path(doc, field) == Some(value));
            if taken {
                return Err(StoreError::DuplicateKey {
                    collection: self.spec.name.clone(),
                    field: field.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryCollection {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn insert_one(&self, mut document: Document) -> StoreResult<Document> {
        document.remove(ID_FIELD);

        let mut documents = self.documents.write().await;
        let id = self.ids.next_id();
        self.check_unique(&documents, id, &document)?;

        documents.insert(id, document.clone());
        debug!(collection = %self.spec.name, %id, "document inserted");

        Ok(with_id(id, document))
    }

    async fn find(&self, filter: Filter) -> StoreResult<Vec<Document>> {
        let documents = self.documents.read().await;

        match filter {
            Filter::All => Ok(documents
                .iter()
                .map(|(id, doc)| with_id(id, doc.clone()))
                .collect()),
            Filter::Text(search) => {
                if self.text_index.is_empty() {
                    return Err(StoreError::MissingTextIndex);
                }
                let query = TextQuery::parse(&search);
                Ok(documents
                    .iter()
                    .filter(|(_, doc)| query.matches(&self.text_index.indexed_text(doc)))
                    .map(|(id, doc)| with_id(id, doc.clone()))
                    .collect())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        let id = ObjectId::parse(id)?;
        let documents = self.documents.read().await;
        Ok(documents.get(&id).map(|doc| with_id(id, doc.clone())))
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        set: Document,
        returning: ReturnDocument,
    ) -> StoreResult<Option<Document>> {
        let id = ObjectId::parse(id)?;
        if set.contains_key(ID_FIELD) {
            return Err(StoreError::ImmutableField {
                field: ID_FIELD.to_string(),
            });
        }

        let mut documents = self.documents.write().await;
        let Some(before) = documents.get(&id).cloned() else {
            return Ok(None);
        };

        let mut after = before.clone();
        for (path, value) in set {
            apply_set(&mut after, &path, value)?;
        }
        self.check_unique(&documents, id, &after)?;

        documents.replace(&id, after.clone());
        debug!(collection = %self.spec.name, %id, "document updated");

        let snapshot = match returning {
            ReturnDocument::Before => before,
            ReturnDocument::After => after,
        };
        Ok(Some(with_id(id, snapshot)))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Document>> {
        let id = ObjectId::parse(id)?;
        let removed = self.documents.write().await.remove(&id);
        if removed.is_some() {
            debug!(collection = %self.spec.name, %id, "document deleted");
        }
        Ok(removed.map(|doc| with_id(id, doc)))
    }

    async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

fn with_id(id: ObjectId, mut document: Document) -> Document {
    document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
    document
}

/// Assigns `value` at a dotted `path`, creating intermediate objects.
fn apply_set(document: &mut Document, path: &str, value: Value) -> StoreResult<()> {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return Ok(());
    };

    let mut current = document;
    let mut walked = String::new();
    for segment in segments {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::PathConflict {
                    field: path.to_string(),
                    parent: walked,
                    existing: other.to_string(),
                })
            }
        };
    }

    current.insert(last.to_string(), value);
    Ok(())
}
