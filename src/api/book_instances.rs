//! Book instance (copy) endpoints

use axum::extract::State;
use axum_extra::extract::Form;

use super::RecordId;
use crate::{
    error::AppResult,
    models::BookInstanceForm,
    services::{
        book_instances::{BookInstanceDetailView, BookInstanceFormView, BookInstanceListView},
        Outcome,
    },
    AppState,
};

/// List copies with the books they belong to
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy list", body = BookInstanceListView)
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Outcome<BookInstanceListView>> {
    state.services.book_instances.list().await
}

/// Copy with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetailView),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookInstanceDetailView>> {
    state.services.book_instances.detail(id).await
}

/// Empty copy form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Blank copy form", body = BookInstanceFormView)
    )
)]
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Outcome<BookInstanceFormView>> {
    state.services.book_instances.create_form().await
}

/// Submit a new copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the copy"),
        (status = 422, description = "Submission rejected", body = BookInstanceFormView)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Outcome<BookInstanceFormView>> {
    state.services.book_instances.create(form).await
}

/// Copy form prefilled with current values
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Prefilled copy form", body = BookInstanceFormView),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookInstanceFormView>> {
    state.services.book_instances.update_form(id).await
}

/// Submit changes to a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the copy"),
        (status = 404, description = "Copy not found"),
        (status = 422, description = "Submission rejected", body = BookInstanceFormView)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Outcome<BookInstanceFormView>> {
    state.services.book_instances.update(id, form).await
}

/// Delete confirmation for a copy
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = BookInstanceDetailView),
        (status = 303, description = "Copy already gone; redirects to the list")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookInstanceDetailView>> {
    state.services.book_instances.delete_form(id).await
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 303, description = "Deleted; redirects to the list")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookInstanceDetailView>> {
    state.services.book_instances.delete(id).await
}
