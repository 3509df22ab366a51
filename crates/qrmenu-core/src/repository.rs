//! Generic document repository over a schemaless store.
//!
//! [`Repository`] turns typed records into JSON documents and back, and
//! owns the bookkeeping every collection shares: id assignment and
//! `createdAt`/`updatedAt` stamping. Record types opt in through the
//! [`Entity`] trait; timestamps are an optional capability exposed via
//! [`Entity::timestamps_mut`], so a type without them simply skips that
//! step.
//!
//! "Not found" is a normal return value here (`None`/`false`). Only
//! transport and conversion failures surface as errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{QrMenuError, QrMenuResult};

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Field that carries the document id inside a serialized entity.
pub const ID_FIELD: &str = "id";

/// Records that carry creation and modification times.
pub trait Timestamped {
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// A record type the repository can persist.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Entity name used in log lines and `NotFound` errors.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Timestamp capability. Types without timestamps keep the default.
    fn timestamps_mut(&mut self) -> Option<&mut dyn Timestamped> {
        None
    }
}

// ---------------------------------------------------------------------------
// Store client
// ---------------------------------------------------------------------------

/// Collection-scoped document operations offered by the backing store.
///
/// Documents handed out by `get`, `list`, `find_eq` and `query` include
/// their id under [`ID_FIELD`]. Implementations map transport, auth and
/// serialization failures to [`QrMenuError::StoreUnavailable`].
pub trait DocumentStore: Send + Sync {
    /// Store-native query accepted by [`DocumentStore::query`].
    type Query: Send;

    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = QrMenuResult<Option<Document>>> + Send;

    /// Write a new document under `id`.
    fn set(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> impl Future<Output = QrMenuResult<()>> + Send;

    /// Overwrite the given fields of an existing document, keeping the rest.
    fn merge(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> impl Future<Output = QrMenuResult<()>> + Send;

    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = QrMenuResult<()>> + Send;

    fn list(&self, collection: &str) -> impl Future<Output = QrMenuResult<Vec<Document>>> + Send;

    fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> impl Future<Output = QrMenuResult<Vec<Document>>> + Send;

    fn query(
        &self,
        collection: &str,
        query: Self::Query,
    ) -> impl Future<Output = QrMenuResult<Vec<Document>>> + Send;
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Typed CRUD over any [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct Repository<S> {
    store: S,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new record and return its id.
    ///
    /// An empty id is replaced with a fresh UUID; timestamps, when the
    /// type has them, are both set to now. The caller's value is updated
    /// in place so it mirrors what was written.
    pub async fn create<T: Entity>(&self, collection: &str, entity: &mut T) -> QrMenuResult<String> {
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        if let Some(timestamps) = entity.timestamps_mut() {
            let now = Utc::now();
            timestamps.set_created_at(now);
            timestamps.set_updated_at(now);
        }

        let id = entity.id().to_string();
        let document = to_document(entity)?;
        self.store.set(collection, &id, document).await?;

        info!(collection, id = %id, kind = T::KIND, "Created document");
        Ok(id)
    }

    pub async fn get_by_id<T: Entity>(&self, collection: &str, id: &str) -> QrMenuResult<Option<T>> {
        match self.store.get(collection, id).await? {
            Some(document) => {
                debug!(collection, id, "Retrieved document");
                Ok(Some(from_document(document)?))
            }
            None => {
                warn!(collection, id, "Document not found");
                Ok(None)
            }
        }
    }

    pub async fn get_all<T: Entity>(&self, collection: &str) -> QrMenuResult<Vec<T>> {
        let documents = self.store.list(collection).await?;
        debug!(collection, count = documents.len(), "Retrieved all documents");
        documents.into_iter().map(from_document).collect()
    }

    /// Equality filter pushed down to the store.
    pub async fn get_by_field<T: Entity>(
        &self,
        collection: &str,
        field: &str,
        value: impl Into<Value> + Send,
    ) -> QrMenuResult<Vec<T>> {
        let value = value.into();
        let documents = self.store.find_eq(collection, field, value).await?;
        debug!(collection, field, count = documents.len(), "Retrieved documents by field");
        documents.into_iter().map(from_document).collect()
    }

    /// Merge-write every field of `entity` into the existing document.
    ///
    /// Returns `false` without writing when `id` does not exist. The
    /// stored id is never rewritten.
    pub async fn update<T: Entity>(
        &self,
        collection: &str,
        id: &str,
        entity: &mut T,
    ) -> QrMenuResult<bool> {
        if self.store.get(collection, id).await?.is_none() {
            warn!(collection, id, "Update skipped, document not found");
            return Ok(false);
        }

        if let Some(timestamps) = entity.timestamps_mut() {
            timestamps.set_updated_at(Utc::now());
        }

        let mut document = to_document(entity)?;
        document.remove(ID_FIELD);
        self.store.merge(collection, id, document).await?;

        info!(collection, id, kind = T::KIND, "Updated document");
        Ok(true)
    }

    /// Remove a document. Returns `false` when it was already absent.
    pub async fn delete(&self, collection: &str, id: &str) -> QrMenuResult<bool> {
        if self.store.get(collection, id).await?.is_none() {
            warn!(collection, id, "Delete skipped, document not found");
            return Ok(false);
        }

        self.store.delete(collection, id).await?;
        info!(collection, id, "Deleted document");
        Ok(true)
    }

    /// Run a store-native query and map the hits to typed records.
    pub async fn query<T: Entity>(&self, collection: &str, query: S::Query) -> QrMenuResult<Vec<T>> {
        let documents = self.store.query(collection, query).await?;
        debug!(collection, count = documents.len(), "Query returned documents");
        documents.into_iter().map(from_document).collect()
    }
}

fn to_document<T: Serialize>(entity: &T) -> QrMenuResult<Document> {
    match serde_json::to_value(entity)? {
        Value::Object(document) => Ok(document),
        other => Err(QrMenuError::StoreUnavailable(format!(
            "entity serialized to a non-object value: {other}"
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> QrMenuResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    type Key = (String, String);

    /// HashMap-backed store; queries are plain predicates.
    #[derive(Default)]
    struct MemoryStore {
        documents: Mutex<HashMap<Key, Document>>,
        writes: Mutex<usize>,
    }

    impl MemoryStore {
        fn key(collection: &str, id: &str) -> Key {
            (collection.to_string(), id.to_string())
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn bump_writes(&self) {
            *self.writes.lock().unwrap() += 1;
        }

        fn scan(&self, collection: &str, keep: impl Fn(&Document) -> bool) -> Vec<Document> {
            let documents = self.documents.lock().unwrap();
            let mut hits = Vec::new();
            for ((c, _), doc) in documents.iter() {
                if c == collection && keep(doc) {
                    hits.push(doc.clone());
                }
            }
            hits
        }
    }

    impl DocumentStore for MemoryStore {
        type Query = fn(&Document) -> bool;

        async fn get(&self, collection: &str, id: &str) -> QrMenuResult<Option<Document>> {
            Ok(self
                .documents
                .lock()
                .unwrap()
                .get(&Self::key(collection, id))
                .cloned())
        }

        async fn set(&self, collection: &str, id: &str, mut document: Document) -> QrMenuResult<()> {
            self.bump_writes();
            document.insert(ID_FIELD.into(), Value::String(id.into()));
            self.documents
                .lock()
                .unwrap()
                .insert(Self::key(collection, id), document);
            Ok(())
        }

        async fn merge(&self, collection: &str, id: &str, document: Document) -> QrMenuResult<()> {
            self.bump_writes();
            let mut documents = self.documents.lock().unwrap();
            let existing = documents.entry(Self::key(collection, id)).or_default();
            for (field, value) in document {
                existing.insert(field, value);
            }
            Ok(())
        }

        async fn delete(&self, collection: &str, id: &str) -> QrMenuResult<()> {
            self.bump_writes();
            self.documents
                .lock()
                .unwrap()
                .remove(&Self::key(collection, id));
            Ok(())
        }

        async fn list(&self, collection: &str) -> QrMenuResult<Vec<Document>> {
            Ok(self.scan(collection, |_| true))
        }

        async fn find_eq(
            &self,
            collection: &str,
            field: &str,
            value: Value,
        ) -> QrMenuResult<Vec<Document>> {
            Ok(self.scan(collection, |doc| doc.get(field) == Some(&value)))
        }

        async fn query(&self, collection: &str, query: Self::Query) -> QrMenuResult<Vec<Document>> {
            Ok(self.scan(collection, query))
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Note {
        #[serde(default)]
        id: String,
        title: String,
        pinned: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl Note {
        fn new(title: &str, pinned: bool) -> Self {
            let epoch = DateTime::<Utc>::UNIX_EPOCH;
            Self {
                id: String::new(),
                title: title.into(),
                pinned,
                created_at: epoch,
                updated_at: epoch,
            }
        }
    }

    impl Timestamped for Note {
        fn set_created_at(&mut self, at: DateTime<Utc>) {
            self.created_at = at;
        }

        fn set_updated_at(&mut self, at: DateTime<Utc>) {
            self.updated_at = at;
        }
    }

    impl Entity for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn timestamps_mut(&mut self) -> Option<&mut dyn Timestamped> {
            Some(self)
        }
    }

    /// A record without timestamps.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Label {
        #[serde(default)]
        id: String,
        text: String,
    }

    impl Entity for Label {
        const KIND: &'static str = "label";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    const NOTES: &str = "notes";

    fn repo() -> Repository<MemoryStore> {
        Repository::new(MemoryStore::default())
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let repo = repo();
        let mut note = Note::new("groceries", false);

        let id = repo.create(NOTES, &mut note).await.unwrap();

        assert!(!id.is_empty());
        assert_eq!(note.id, id);
        assert!(note.created_at > DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn create_keeps_caller_supplied_id() {
        let repo = repo();
        let mut note = Note::new("fixed", false);
        note.id = "note-1".into();

        let id = repo.create(NOTES, &mut note).await.unwrap();
        assert_eq!(id, "note-1");
    }

    #[tokio::test]
    async fn get_by_id_round_trips_the_created_record() {
        let repo = repo();
        let mut note = Note::new("round trip", true);
        let id = repo.create(NOTES, &mut note).await.unwrap();

        let fetched: Note = repo.get_by_id(NOTES, &id).await.unwrap().unwrap();
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn get_by_id_absent_is_none() {
        let repo = repo();
        let fetched: Option<Note> = repo.get_by_id(NOTES, "missing").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn update_absent_returns_false_without_writing() {
        let repo = repo();
        let mut note = Note::new("ghost", false);

        let updated = repo.update(NOTES, "missing", &mut note).await.unwrap();

        assert!(!updated);
        assert_eq!(repo.store().writes(), 0);
        let fetched: Option<Note> = repo.get_by_id(NOTES, "missing").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn update_merges_and_advances_updated_at() {
        let repo = repo();
        let mut note = Note::new("before", false);
        let id = repo.create(NOTES, &mut note).await.unwrap();
        let created_at = note.created_at;

        let mut changed = note.clone();
        changed.title = "after".into();
        assert!(repo.update(NOTES, &id, &mut changed).await.unwrap());

        let fetched: Note = repo.get_by_id(NOTES, &id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.created_at, created_at);
        assert!(fetched.updated_at >= created_at);
    }

    #[tokio::test]
    async fn update_never_rewrites_the_stored_id() {
        let repo = repo();
        let mut note = Note::new("keep id", false);
        let id = repo.create(NOTES, &mut note).await.unwrap();

        let mut changed = note.clone();
        changed.id = "hijacked".into();
        assert!(repo.update(NOTES, &id, &mut changed).await.unwrap());

        let fetched: Note = repo.get_by_id(NOTES, &id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
    }

    #[tokio::test]
    async fn second_delete_returns_false() {
        let repo = repo();
        let mut note = Note::new("to delete", false);
        let id = repo.create(NOTES, &mut note).await.unwrap();

        assert!(repo.delete(NOTES, &id).await.unwrap());
        assert!(!repo.delete(NOTES, &id).await.unwrap());
    }

    #[tokio::test]
    async fn get_by_field_filters_on_equality() {
        let repo = repo();
        for (title, pinned) in [("a", true), ("b", false), ("c", true)] {
            repo.create(NOTES, &mut Note::new(title, pinned)).await.unwrap();
        }

        let mut pinned: Vec<Note> = repo.get_by_field(NOTES, "pinned", true).await.unwrap();
        pinned.sort_by(|a, b| a.title.cmp(&b.title));

        let titles: Vec<_> = pinned.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[tokio::test]
    async fn records_without_timestamps_are_supported() {
        let repo = repo();
        let mut label = Label {
            id: String::new(),
            text: "spicy".into(),
        };

        let id = repo.create("labels", &mut label).await.unwrap();
        let fetched: Label = repo.get_by_id("labels", &id).await.unwrap().unwrap();
        assert_eq!(fetched, label);

        let mut renamed = Label {
            id: id.clone(),
            text: "mild".into(),
        };
        assert!(repo.update("labels", &id, &mut renamed).await.unwrap());
    }

    #[tokio::test]
    async fn query_maps_native_hits_to_records() {
        let repo = repo();
        repo.create(NOTES, &mut Note::new("alpha", false)).await.unwrap();
        repo.create(NOTES, &mut Note::new("beta", false)).await.unwrap();

        let hits: Vec<Note> = repo
            .query(NOTES, |doc| doc.get("title") == Some(&json!("beta")))
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "beta");
    }
}
