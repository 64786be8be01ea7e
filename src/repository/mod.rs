//! Repository layer: document store primitives and typed entity adapters

pub mod memory;
pub mod postgres;

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    models::{Author, Book, BookInstance, Entity, Genre},
};

/// A stored record: identifier beside its attribute body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Value,
}

/// Match condition for multi-record primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    /// Field equals value
    Eq(&'static str, Value),
    /// Array field contains value
    Contains(&'static str, Value),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn references(field: &'static str, id: Uuid) -> Self {
        Filter::Eq(field, Value::String(id.to_string()))
    }

    pub fn contains_ref(field: &'static str, id: Uuid) -> Self {
        Filter::Contains(field, Value::String(id.to_string()))
    }

    /// Evaluate against a body held in memory
    pub fn matches(&self, body: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => body.get(*field) == Some(value),
            Filter::Contains(field, value) => body
                .get(*field)
                .and_then(Value::as_array)
                .map(|items| items.contains(value))
                .unwrap_or(false),
        }
    }
}

/// Persistence primitives over named collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Document>>;

    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>>;

    async fn count_matching(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Persist a new body under a freshly minted identifier
    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document>;

    /// Replace the body of an existing record; `None` when absent
    async fn update_by_id(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<Option<Document>>;

    /// `true` when a record was removed
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<bool>;
}

/// Typed adapter over one entity collection
pub struct EntityStore<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        tracing::debug!("find {} {}", T::COLLECTION, id);
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_many(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        tracing::debug!("find {} matching {:?}", T::COLLECTION, filter);
        self.store
            .find_many(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Find matching records keeping only `fields` (plus the identifier)
    pub async fn find_many_as<P: DeserializeOwned>(
        &self,
        filter: &Filter,
        fields: &[&str],
    ) -> StoreResult<Vec<P>> {
        self.store
            .find_many(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|doc| decode(project(doc, fields)))
            .collect()
    }

    pub async fn count_matching(&self, filter: &Filter) -> StoreResult<u64> {
        self.store.count_matching(T::COLLECTION, filter).await
    }

    /// Insert validated fields; the store assigns the identifier
    pub async fn insert(&self, input: &T::Input) -> StoreResult<T> {
        let body = serde_json::to_value(input)?;
        let doc = self.store.insert(T::COLLECTION, body).await?;
        decode(doc)
    }

    /// Replace the stored body of `entity`, keyed by its existing identifier
    pub async fn update(&self, entity: &T) -> StoreResult<Option<T>> {
        let body = encode(entity)?;
        self.store
            .update_by_id(T::COLLECTION, entity.id(), body)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        self.store.delete_by_id(T::COLLECTION, id).await
    }
}

/// Serialize an entity into a persisted body (identifier stripped)
fn encode<T: Entity>(entity: &T) -> StoreResult<Value> {
    let mut body = serde_json::to_value(entity)?;
    if let Value::Object(ref mut map) = body {
        map.remove("id");
    }
    Ok(body)
}

/// Rebuild a typed record from a stored document
fn decode<P: DeserializeOwned>(doc: Document) -> StoreResult<P> {
    let mut map = match doc.body {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::Malformed(format!(
                "document {} has a non-object body: {}",
                doc.id, other
            )))
        }
    };
    map.insert("id".to_string(), Value::String(doc.id.to_string()));
    Ok(serde_json::from_value(Value::Object(map))?)
}

fn project(doc: Document, fields: &[&str]) -> Document {
    let body = match doc.body {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| fields.contains(&key.as_str()))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    };
    Document { id: doc.id, body }
}

/// Main repository struct holding one adapter per collection
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
    pub authors: EntityStore<Author>,
    pub books: EntityStore<Book>,
    pub genres: EntityStore<Genre>,
    pub book_instances: EntityStore<BookInstance>,
}

impl Repository {
    /// Create a repository over the given document store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: EntityStore::new(store.clone()),
            books: EntityStore::new(store.clone()),
            genres: EntityStore::new(store.clone()),
            book_instances: EntityStore::new(store.clone()),
            store,
        }
    }

    /// Adapter for any entity collection
    pub fn collection<T: Entity>(&self) -> EntityStore<T> {
        EntityStore::new(self.store.clone())
    }
}
