use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{Document, DocumentStore, Result, StoreError, WriteBatch};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// An in-process document store.
///
/// Used for dry runs and tests. Writes to a collection can be made to fail,
/// and every attempted write is recorded whether it succeeded or not.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    attempts: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write to `collection` fail.
    /// A batch containing such a write fails as a whole.
    pub fn fail_on(&self, collection: &str) {
        self.failing.lock().insert(collection.to_string());
    }

    /// Returns a document, if it exists
    pub fn get(&self, collection: &str, key: &str) -> Option<Value> {
        self.collections
            .lock()
            .get(collection)
            .and_then(|documents| documents.get(key))
            .cloned()
    }

    /// The number of documents stored in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .get(collection)
            .map(|documents| documents.len())
            .unwrap_or_default()
    }

    /// All documents in a collection, ordered by key
    pub fn documents(&self, collection: &str) -> Vec<(String, Value)> {
        self.collections
            .lock()
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// How many writes to a collection were attempted, including failed ones
    pub fn attempts(&self, collection: &str) -> usize {
        self.attempts
            .lock()
            .iter()
            .filter(|c| c.as_str() == collection)
            .count()
    }

    fn check(&self, document: &Document) -> Result<()> {
        if self.failing.lock().contains(&document.collection) {
            return Err(StoreError::Rejected {
                collection: document.collection.clone(),
                key: document.key.clone(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set(&self, document: Document) -> Result<()> {
        self.attempts.lock().push(document.collection.clone());
        self.check(&document)?;

        debug!("Writing {}", document.path());

        self.collections
            .lock()
            .entry(document.collection)
            .or_default()
            .insert(document.key, document.data);

        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        self.attempts
            .lock()
            .extend(batch.documents().iter().map(|d| d.collection.clone()));

        // Validate everything before touching the collections
        for document in batch.documents() {
            self.check(document)?;
        }

        debug!("Committing batch of {} documents", batch.len());

        let mut collections = self.collections.lock();

        for document in batch {
            collections
                .entry(document.collection)
                .or_default()
                .insert(document.key, document.data);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::MemoryStore;
    use crate::{Document, DocumentStore, StoreError, WriteBatch};

    fn document(collection: &str, key: &str) -> Document {
        Document::from_record(collection, key, &json!({ "key": key })).unwrap()
    }

    #[tokio::test]
    async fn set_overwrites_existing_documents() {
        let store = MemoryStore::new();

        store.set(document("hotel_form", "default")).await.unwrap();
        store
            .set(Document::from_record("hotel_form", "default", &json!({ "forms": [] })).unwrap())
            .await
            .unwrap();

        assert_eq!(store.count("hotel_form"), 1);
        assert_eq!(
            store.get("hotel_form", "default"),
            Some(json!({ "forms": [] }))
        );
    }

    #[tokio::test]
    async fn batches_are_all_or_nothing() {
        let store = MemoryStore::new();
        store.fail_on("reservation");

        let batch: WriteBatch = vec![document("like", "a"), document("reservation", "b")]
            .into_iter()
            .collect();

        let result = store.commit(batch).await;

        assert!(matches!(result, Err(StoreError::Rejected { .. })));
        assert_eq!(store.count("like"), 0);
        assert_eq!(store.attempts("like"), 1);
    }

    #[tokio::test]
    async fn failing_collections_reject_single_writes() {
        let store = MemoryStore::new();
        store.fail_on("hotel");

        assert!(store.set(document("hotel", "hotel_1")).await.is_err());
        assert!(store.set(document("room", "hotel_1_room_1")).await.is_ok());

        assert_eq!(store.count("hotel"), 0);
        assert_eq!(store.attempts("hotel"), 1);
        assert_eq!(store.documents("room")[0].0, "hotel_1_room_1");
    }
}
