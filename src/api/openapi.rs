//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{authors, book_instances, books, catalog, genres, health},
    services,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLib API",
        version = "0.1.0",
        description = "Library catalog: authors, books, genres and book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog home
        catalog::index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::update_author_form,
        authors::update_author,
        authors::delete_author_form,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::update_book_form,
        books::update_book,
        books::delete_book_form,
        books::delete_book,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre_form,
        genres::create_genre,
        genres::update_genre_form,
        genres::update_genre,
        genres::delete_genre_form,
        genres::delete_genre,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance_form,
        book_instances::create_book_instance,
        book_instances::update_book_instance_form,
        book_instances::update_book_instance,
        book_instances::delete_book_instance_form,
        book_instances::delete_book_instance,
    ),
    components(
        schemas(
            // Records
            crate::models::Author,
            crate::models::AuthorView,
            crate::models::author::IsoDates,
            crate::models::Book,
            crate::models::BookSummary,
            crate::models::Genre,
            crate::models::GenreView,
            crate::models::BookInstance,
            crate::models::BookInstanceView,
            crate::models::BookInstanceStatus,
            // Submissions
            crate::models::AuthorForm,
            crate::models::BookForm,
            crate::models::GenreForm,
            crate::models::BookInstanceForm,
            crate::forms::FieldError,
            // Views
            services::catalog::IndexView,
            services::catalog::CatalogCounts,
            services::authors::AuthorListView,
            services::authors::AuthorDetailView,
            services::authors::AuthorFormView,
            services::books::BookListView,
            services::books::BookListEntry,
            services::books::BookDetailView,
            services::books::PopulatedBook,
            services::books::BookFormView,
            services::books::BookDeleteView,
            services::compose::GenreOption,
            services::genres::GenreListView,
            services::genres::GenreDetailView,
            services::genres::GenreFormView,
            services::book_instances::BookInstanceListView,
            services::book_instances::BookInstanceDetailView,
            services::book_instances::BookInstanceFormView,
            services::book_instances::CopyEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
