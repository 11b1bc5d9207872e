// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! MongoDB-backed document store

use mongodb::{Client, Collection, bson::doc};
use shared_types::{ChainId, StoredAddress};
use tracing::{debug, info};

use crate::{DocumentStore, StoreResult, collection_name};

/// Writes documents into `<db>.user_data_v4_<chain_id>`
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<StoredAddress>,
}

impl MongoStore {
    /// Connect to `uri` and bind the collection for `chain_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid
    pub async fn connect(uri: &str, db_name: &str, chain_id: ChainId) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client
            .database(db_name)
            .collection::<StoredAddress>(&collection_name(chain_id));

        info!(
            database = db_name,
            collection = collection.name(),
            "connected to MongoDB"
        );

        Ok(Self { client, collection })
    }

    /// Name of the bound collection
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Close all pooled connections
    pub async fn close(self) {
        self.client.shutdown().await;
        debug!("MongoDB client closed");
    }
}

impl DocumentStore for MongoStore {
    async fn insert_many(&self, records: &[StoredAddress]) -> StoreResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let result = self.collection.insert_many(records).ordered(false).await?;
        let inserted = result.inserted_ids.len();

        info!(
            collection = self.collection.name(),
            inserted, "saved documents to MongoDB"
        );
        Ok(inserted)
    }

    async fn get(&self, address: &str) -> StoreResult<Option<StoredAddress>> {
        Ok(self.collection.find_one(doc! { "address": address }).await?)
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
