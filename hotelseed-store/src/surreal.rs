use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use surrealdb::{
    engine::remote::ws::{Client, Ws},
    opt::auth::Root,
    sql::Thing,
    Surreal,
};

use crate::{Document, DocumentStore, IntoStoreError, Result, StoreError, WriteBatch};

/// How to reach and sign in to a SurrealDB instance
#[derive(Debug, Clone)]
pub struct SurrealConfig {
    /// Host and port, e.g. `127.0.0.1:8000`
    pub address: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
}

/// A SurrealDB document store.
/// Collections map to tables and keys to record ids, so `hotel/hotel_1` is stored as `hotel:hotel_1`.
pub struct SurrealStore {
    db: Surreal<Client>,
}

#[derive(Debug, Deserialize)]
struct Record {
    #[allow(dead_code)]
    id: Thing,
}

impl SurrealStore {
    pub async fn connect(config: &SurrealConfig) -> Result<Self> {
        info!("Connecting to SurrealDB at {}...", config.address);

        let db = Surreal::new::<Ws>(config.address.as_str())
            .await
            .map_err(|e| e.any())?;

        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await
        .map_err(|e| e.any())?;

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|e| e.any())?;

        Ok(Self { db })
    }
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn set(&self, document: Document) -> Result<()> {
        debug!("Writing {}", document.path());

        let Document {
            collection,
            key,
            data,
        } = document;

        let written: Option<Record> = self
            .db
            .update((collection.as_str(), key.as_str()))
            .content(data)
            .await
            .map_err(|e| e.any())?;

        written
            .map(|_| ())
            .ok_or(StoreError::Rejected { collection, key })
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        debug!("Committing batch of {} documents", batch.len());

        let mut query = self.db.query("BEGIN TRANSACTION");

        for (i, document) in batch.into_iter().enumerate() {
            query = query
                .query(format!(
                    "UPDATE type::thing($collection_{i}, $key_{i}) CONTENT $data_{i}"
                ))
                .bind((format!("collection_{i}"), document.collection))
                .bind((format!("key_{i}"), document.key))
                .bind((format!("data_{i}"), document.data));
        }

        query
            .query("COMMIT TRANSACTION")
            .await
            .map_err(|e| e.any())?
            .check()
            .map_err(|e| e.any())?;

        Ok(())
    }
}

impl IntoStoreError for surrealdb::Error {
    fn any(self) -> StoreError {
        StoreError::Internal(Box::new(self))
    }
}
