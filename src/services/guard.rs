//! Mutation guard: identity rules for writes and the delete-while-referenced check

use uuid::Uuid;

use super::resolver::{Referenced, RelationshipResolver};
use crate::{
    error::{AppError, AppResult},
    models::Entity,
    repository::Repository,
};

/// Result of a guarded delete
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<D> {
    Deleted,
    /// Nothing was removed; these records still reference the target
    Blocked(Vec<D>),
}

#[derive(Clone)]
pub struct MutationGuard {
    repository: Repository,
    resolver: RelationshipResolver,
}

impl MutationGuard {
    pub fn new(repository: Repository, resolver: RelationshipResolver) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// Persist a new record; the store always mints the identifier
    pub async fn create<T: Entity>(&self, input: &T::Input) -> AppResult<T> {
        let created = self.repository.collection::<T>().insert(input).await?;
        tracing::info!("{} {} created", T::LABEL, created.id());
        Ok(created)
    }

    /// Replace an existing record under its current identifier
    pub async fn update<T: Entity>(&self, entity: &T) -> AppResult<T> {
        let id = entity.id();
        let updated = self
            .repository
            .collection::<T>()
            .update(entity)
            .await?
            .ok_or_else(|| AppError::missing::<T>(id))?;
        if updated.id() != id {
            return Err(AppError::Internal(format!(
                "{} {} came back as {}",
                T::LABEL,
                id,
                updated.id()
            )));
        }
        tracing::info!("{} {} updated", T::LABEL, id);
        Ok(updated)
    }

    /// Delete `id` unless something still references it.
    ///
    /// The dependents check and the delete are separate store calls; a
    /// dependent created in between is not detected.
    pub async fn delete<T: Referenced>(&self, id: Uuid) -> AppResult<DeleteOutcome<T::Dependent>> {
        let dependents = self.resolver.dependents::<T>(id).await?;
        if !dependents.is_empty() {
            tracing::warn!(
                "{} {} not deleted: {} dependent record(s)",
                T::LABEL,
                id,
                dependents.len()
            );
            return Ok(DeleteOutcome::Blocked(dependents));
        }

        self.remove::<T>(id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete a record nothing can reference
    pub async fn delete_unreferenced<T: Entity>(&self, id: Uuid) -> AppResult<()> {
        self.remove::<T>(id).await
    }

    async fn remove<T: Entity>(&self, id: Uuid) -> AppResult<()> {
        if self.repository.collection::<T>().delete_by_id(id).await? {
            tracing::info!("{} {} deleted", T::LABEL, id);
        } else {
            tracing::debug!("{} {} already gone", T::LABEL, id);
        }
        Ok(())
    }
}
