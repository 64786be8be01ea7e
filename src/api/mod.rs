//! HTTP surface: thin axum handlers over the catalog services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{error::AppError, services::Outcome, AppState};

/// Record identifier taken from the `:id` path segment
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|_| AppError::BadRequest(format!("{} is not a record identifier", raw)))
    }
}

/// Render 200, Invalid 422, Blocked 409, Redirect 303 See Other
impl<V: Serialize> IntoResponse for Outcome<V> {
    fn into_response(self) -> Response {
        let status = match &self {
            Outcome::Render(_) => StatusCode::OK,
            Outcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Outcome::Blocked(_) => StatusCode::CONFLICT,
            Outcome::Redirect(to) => return Redirect::to(to).into_response(),
        };
        (status, Json(self)).into_response()
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route(
            "/author/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route("/author/:id", get(authors::get_author))
        .route(
            "/author/:id/update",
            get(authors::update_author_form).post(authors::update_author),
        )
        .route(
            "/author/:id/delete",
            get(authors::delete_author_form).post(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/book/:id", get(books::get_book))
        .route(
            "/book/:id/update",
            get(books::update_book_form).post(books::update_book),
        )
        .route(
            "/book/:id/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        // Genres
        .route("/genres", get(genres::list_genres))
        .route(
            "/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        .route(
            "/genre/:id/delete",
            get(genres::delete_genre_form).post(genres::delete_genre),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form).post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form).post(book_instances::update_book_instance),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form).post(book_instances::delete_book_instance),
        );

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest(crate::models::CATALOG_ROOT, catalog)
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
