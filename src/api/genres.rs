//! Genre endpoints

use axum::extract::State;
use axum_extra::extract::Form;

use super::RecordId;
use crate::{
    error::AppResult,
    models::GenreForm,
    services::{
        genres::{GenreDetailView, GenreFormView, GenreListView},
        Outcome,
    },
    AppState,
};

/// List genres ordered by name
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list", body = GenreListView)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Outcome<GenreListView>> {
    state.services.genres.list().await
}

/// Genre with the books listing it
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreDetailView),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<GenreDetailView>> {
    state.services.genres.detail(id).await
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Blank genre form", body = GenreFormView)
    )
)]
pub async fn create_genre_form(State(state): State<AppState>) -> AppResult<Outcome<GenreFormView>> {
    state.services.genres.create_form().await
}

/// Submit a new genre
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, or already present; redirects to the genre"),
        (status = 422, description = "Submission rejected", body = GenreFormView)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Outcome<GenreFormView>> {
    state.services.genres.create(form).await
}

/// Genre form prefilled with current values
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Prefilled genre form", body = GenreFormView),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<GenreFormView>> {
    state.services.genres.update_form(id).await
}

/// Submit changes to a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the genre"),
        (status = 404, description = "Genre not found"),
        (status = 422, description = "Submission rejected", body = GenreFormView)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<GenreForm>,
) -> AppResult<Outcome<GenreFormView>> {
    state.services.genres.update(id, form).await
}

/// Delete confirmation listing the genre's books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = GenreDetailView),
        (status = 303, description = "Genre already gone; redirects to the list")
    )
)]
pub async fn delete_genre_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<GenreDetailView>> {
    state.services.genres.delete_form(id).await
}

/// Delete a genre no book lists
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 303, description = "Deleted; redirects to the list"),
        (status = 409, description = "Genre is still listed by books", body = GenreDetailView)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<GenreDetailView>> {
    state.services.genres.delete(id).await
}
