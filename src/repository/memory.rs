//! In-memory document store, used for local runs and tests

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Filter};
use crate::error::StoreResult;

type Collection = IndexMap<Uuid, Value>;

/// Collections keyed by name; records keep insertion order
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(&id))
            .map(|body| Document {
                id,
                body: body.clone(),
            }))
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, body)| filter.matches(body))
                    .map(|(id, body)| Document {
                        id: *id,
                        body: body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_matching(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| records.values().filter(|body| filter.matches(body)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document> {
        let id = Uuid::new_v4();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, body.clone());
        Ok(Document { id, body })
    }

    async fn update_by_id(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(slot) = collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(&id))
        else {
            return Ok(None);
        };
        *slot = body.clone();
        Ok(Some(Document { id, body }))
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|records| records.shift_remove(&id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_ok, block_on};

    #[tokio::test]
    async fn insert_mints_distinct_identifiers() {
        let store = InMemoryStore::new();
        let a = store.insert("genres", json!({ "name": "A" })).await.unwrap();
        let b = store.insert("genres", json!({ "name": "A" })).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.count_matching("genres", &Filter::All).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn find_many_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["c", "a", "b"] {
            store.insert("genres", json!({ "name": name })).await.unwrap();
        }
        let names: Vec<_> = store
            .find_many("genres", &Filter::All)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.body["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn update_keeps_identifier_and_skips_missing() {
        let store = InMemoryStore::new();
        let doc = store.insert("genres", json!({ "name": "Old" })).await.unwrap();

        let updated = store
            .update_by_id("genres", doc.id, json!({ "name": "New" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, doc.id);
        assert_eq!(
            store.find_by_id("genres", doc.id).await.unwrap().unwrap().body,
            json!({ "name": "New" })
        );

        let missing = store
            .update_by_id("genres", Uuid::new_v4(), json!({ "name": "x" }))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(store.count_matching("genres", &Filter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryStore::new();
        let doc = store.insert("books", json!({ "title": "t" })).await.unwrap();
        assert!(store.delete_by_id("books", doc.id).await.unwrap());
        assert!(!store.delete_by_id("books", doc.id).await.unwrap());
        assert!(store.find_by_id("books", doc.id).await.unwrap().is_none());
    }

    #[test]
    fn unknown_collection_is_empty() {
        let store = InMemoryStore::new();
        let found = assert_ok!(block_on(store.find_many("nothing", &Filter::All)));
        assert!(found.is_empty());
        assert_eq!(
            assert_ok!(block_on(store.count_matching("nothing", &Filter::All))),
            0
        );
        assert_ok!(block_on(store.delete_by_id("nothing", Uuid::new_v4())));
    }
}
