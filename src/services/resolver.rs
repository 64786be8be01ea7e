//! Relationship resolution: which records in other collections point at an id

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    error::StoreResult,
    models::{Author, Book, BookInstance, Entity, Genre},
    repository::{Filter, Repository},
};

/// An entity that other records may reference
pub trait Referenced: Entity {
    /// Record type holding the reference
    type Dependent: Entity;

    /// Filter selecting dependents of `id`
    fn dependents_filter(id: Uuid) -> Filter;
}

impl Referenced for Author {
    type Dependent = Book;

    fn dependents_filter(id: Uuid) -> Filter {
        Filter::references("author", id)
    }
}

impl Referenced for Book {
    type Dependent = BookInstance;

    fn dependents_filter(id: Uuid) -> Filter {
        Filter::references("book", id)
    }
}

impl Referenced for Genre {
    type Dependent = Book;

    fn dependents_filter(id: Uuid) -> Filter {
        Filter::contains_ref("genre", id)
    }
}

#[derive(Clone)]
pub struct RelationshipResolver {
    repository: Repository,
}

impl RelationshipResolver {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every record referencing `id`; empty when nothing does
    pub async fn dependents<T: Referenced>(&self, id: Uuid) -> StoreResult<Vec<T::Dependent>> {
        self.repository
            .collection::<T::Dependent>()
            .find_many(&T::dependents_filter(id))
            .await
    }

    /// Dependents of `id` projected onto `fields`
    pub async fn dependents_as<T: Referenced, P: DeserializeOwned>(
        &self,
        id: Uuid,
        fields: &[&str],
    ) -> StoreResult<Vec<P>> {
        self.repository
            .collection::<T::Dependent>()
            .find_many_as(&T::dependents_filter(id), fields)
            .await
    }
}
