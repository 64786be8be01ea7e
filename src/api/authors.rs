//! Author endpoints

use axum::extract::State;
use axum_extra::extract::Form;

use super::RecordId;
use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{
        authors::{AuthorDetailView, AuthorFormView, AuthorListView},
        Outcome,
    },
    AppState,
};

/// List authors ordered by family name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = AuthorListView)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Outcome<AuthorListView>> {
    state.services.authors.list().await
}

/// Author with the books written by them
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailView),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<AuthorDetailView>> {
    state.services.authors.detail(id).await
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Blank author form", body = AuthorFormView)
    )
)]
pub async fn create_author_form(State(state): State<AppState>) -> AppResult<Outcome<AuthorFormView>> {
    state.services.authors.create_form().await
}

/// Submit a new author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the author"),
        (status = 422, description = "Submission rejected", body = AuthorFormView)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Outcome<AuthorFormView>> {
    state.services.authors.create(form).await
}

/// Author form prefilled with current values
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Prefilled author form", body = AuthorFormView),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<AuthorFormView>> {
    state.services.authors.update_form(id).await
}

/// Submit changes to an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the author"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Submission rejected", body = AuthorFormView)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<AuthorForm>,
) -> AppResult<Outcome<AuthorFormView>> {
    state.services.authors.update(id, form).await
}

/// Delete confirmation listing the author's books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = AuthorDetailView),
        (status = 303, description = "Author already gone; redirects to the list")
    )
)]
pub async fn delete_author_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<AuthorDetailView>> {
    state.services.authors.delete_form(id).await
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 303, description = "Deleted; redirects to the list"),
        (status = 409, description = "Author still has books", body = AuthorDetailView)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<AuthorDetailView>> {
    state.services.authors.delete(id).await
}
