use async_trait::async_trait;
use thiserror::Error;

mod document;
pub use document::*;

mod memory;
pub use memory::*;

mod surreal;
pub use surreal::*;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An unknown or internal error happened with the store
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// A record could not be turned into a document
    #[error("Could not serialize {collection}/{key}: {source}")]
    Serialize {
        collection: String,
        key: String,
        source: serde_json::Error,
    },
    /// The store refused the write
    #[error("Write to {collection}/{key} was rejected")]
    Rejected { collection: String, key: String },
}

/// Helper trait to reduce boilerplate
pub trait IntoStoreError {
    fn any(self) -> StoreError;
}

/// Represents a document store the seed can write to.
///
/// Writes create the document or replace it entirely if it already exists.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes a single document.
    async fn set(&self, document: Document) -> Result<()>;

    /// Writes every document in the batch, or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;
}
