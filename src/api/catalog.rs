//! Catalog home endpoint

use axum::extract::State;

use crate::{
    error::AppResult,
    services::{catalog::IndexView, Outcome},
    AppState,
};

/// Record counts for the catalog home page
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog counts", body = IndexView)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Outcome<IndexView>> {
    state.services.catalog.index().await
}
