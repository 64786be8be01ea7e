//! Book endpoints

use axum::extract::State;
use axum_extra::extract::Form;

use super::RecordId;
use crate::{
    error::AppResult,
    models::BookForm,
    services::{
        books::{BookDeleteView, BookDetailView, BookFormView, BookListView},
        Outcome,
    },
    AppState,
};

/// List books ordered by title, with their authors
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = BookListView)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Outcome<BookListView>> {
    state.services.books.list().await
}

/// Book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetailView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookDetailView>> {
    state.services.books.detail(id).await
}

/// Empty book form
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Blank book form", body = BookFormView)
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Outcome<BookFormView>> {
    state.services.books.create_form().await
}

/// Submit a new book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the book"),
        (status = 422, description = "Submission rejected", body = BookFormView)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Outcome<BookFormView>> {
    state.services.books.create(form).await
}

/// Book form prefilled, with the book's genres pre-selected
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Prefilled book form", body = BookFormView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookFormView>> {
    state.services.books.update_form(id).await
}

/// Submit changes to a book
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the book"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Submission rejected", body = BookFormView)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<BookForm>,
) -> AppResult<Outcome<BookFormView>> {
    state.services.books.update(id, form).await
}

/// Delete confirmation listing the book's copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = BookDeleteView),
        (status = 303, description = "Book already gone; redirects to the list")
    )
)]
pub async fn delete_book_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookDeleteView>> {
    state.services.books.delete_form(id).await
}

/// Delete a book that has no copies
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Deleted; redirects to the list"),
        (status = 409, description = "Book still has copies", body = BookDeleteView)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Outcome<BookDeleteView>> {
    state.services.books.delete(id).await
}
