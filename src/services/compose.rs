//! View-model composition.
//!
//! A page render issues its primary lookup and every related lookup at once
//! and joins on all of them. The lookups are independent of each other; the
//! first failure aborts the whole composition and sibling results are
//! dropped.

use std::{collections::HashSet, future::Future};

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, StoreResult},
    models::{Entity, Genre},
};

/// Outcome of a fan-out whose primary record may be absent
#[derive(Debug)]
pub enum Composed<P, R> {
    Found(P, R),
    Missing,
}

impl<P, R> Composed<P, R> {
    /// Detail and update-form flows treat absence as terminal
    pub fn or_not_found<T: Entity>(self, id: Uuid) -> AppResult<(P, R)> {
        match self {
            Composed::Found(primary, related) => Ok((primary, related)),
            Composed::Missing => Err(AppError::missing::<T>(id)),
        }
    }
}

/// Run `primary` and `related` concurrently and merge the results
pub async fn compose<P, R, FP, FR>(primary: FP, related: FR) -> AppResult<Composed<P, R>>
where
    FP: Future<Output = StoreResult<Option<P>>>,
    FR: Future<Output = StoreResult<R>>,
{
    let (primary, related) = tokio::try_join!(primary, related)?;
    Ok(match primary {
        Some(p) => Composed::Found(p, related),
        None => Composed::Missing,
    })
}

/// A genre checkbox on the book form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenreOption {
    #[serde(flatten)]
    pub genre: Genre,
    pub checked: bool,
}

/// Mark every genre whose id is among `selected` as pre-selected
pub fn mark_selected<S: AsRef<str>>(genres: Vec<Genre>, selected: &[S]) -> Vec<GenreOption> {
    let selected: HashSet<Uuid> = selected
        .iter()
        .filter_map(|id| Uuid::parse_str(id.as_ref()).ok())
        .collect();
    genres
        .into_iter()
        .map(|genre| {
            let checked = selected.contains(&genre.id);
            GenreOption { genre, checked }
        })
        .collect()
}
