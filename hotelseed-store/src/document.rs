use serde::Serialize;
use serde_json::Value;

use crate::{Result, StoreError};

/// A record addressed by collection and key
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub collection: String,
    pub key: String,
    pub data: Value,
}

impl Document {
    /// Serializes a record into a document.
    pub fn from_record<T>(collection: &str, key: &str, record: &T) -> Result<Self>
    where
        T: Serialize,
    {
        let data = serde_json::to_value(record).map_err(|source| StoreError::Serialize {
            collection: collection.to_string(),
            key: key.to_string(),
            source,
        })?;

        Ok(Self {
            collection: collection.to_string(),
            key: key.to_string(),
            data,
        })
    }

    /// The `collection/key` path of the document
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.key)
    }
}

/// A set of writes that persist together or not at all.
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    documents: Vec<Document>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a write to the batch. Nothing is written until the batch is committed.
    pub fn set(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

impl IntoIterator for WriteBatch {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl FromIterator<Document> for WriteBatch {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}
