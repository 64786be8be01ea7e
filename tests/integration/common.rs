//! Shared fixtures

use std::{fmt::Debug, sync::Arc};

use axum::Router;
use locallib_server::{
    api,
    config::AppConfig,
    models::{AuthorForm, BookForm, BookInstanceForm, GenreForm},
    repository::{memory::InMemoryStore, Repository},
    services::{Outcome, Services},
    AppState,
};
use uuid::Uuid;

pub fn services() -> Services {
    Services::new(Repository::new(Arc::new(InMemoryStore::new())))
}

pub fn app() -> Router {
    let repository = Repository::new(Arc::new(InMemoryStore::new()));
    api::create_router(AppState::new(AppConfig::default(), repository))
}

pub fn redirected<V: Debug>(outcome: Outcome<V>) -> String {
    match outcome {
        Outcome::Redirect(to) => to,
        other => panic!("expected a redirect, got {:?}", other),
    }
}

pub fn rendered<V: Debug>(outcome: Outcome<V>) -> V {
    match outcome {
        Outcome::Render(view) => view,
        other => panic!("expected a rendered view, got {:?}", other),
    }
}

/// Identifier at the end of a canonical path
pub fn id_of(path: &str) -> Uuid {
    let last = path.rsplit('/').next().expect("path has segments");
    Uuid::parse_str(last).expect("path ends with an identifier")
}

pub fn author_form(first: &str, family: &str) -> AuthorForm {
    AuthorForm {
        first_name: first.to_string(),
        family_name: family.to_string(),
        ..Default::default()
    }
}

pub fn book_form(title: &str, author: Uuid, genres: &[Uuid]) -> BookForm {
    BookForm {
        title: title.to_string(),
        author: author.to_string(),
        summary: format!("About {}", title),
        isbn: "9780000000000".to_string(),
        genre: genres.iter().map(Uuid::to_string).collect(),
    }
}

pub fn copy_form(book: Uuid, status: &str) -> BookInstanceForm {
    BookInstanceForm {
        book: book.to_string(),
        imprint: "Ace, 1969".to_string(),
        status: status.to_string(),
        due_back: String::new(),
    }
}

pub async fn create_author(services: &Services, first: &str, family: &str) -> Uuid {
    id_of(&redirected(
        services
            .authors
            .create(author_form(first, family))
            .await
            .unwrap(),
    ))
}

pub async fn create_genre(services: &Services, name: &str) -> Uuid {
    id_of(&redirected(
        services
            .genres
            .create(GenreForm {
                name: name.to_string(),
            })
            .await
            .unwrap(),
    ))
}

pub async fn create_book(services: &Services, title: &str, author: Uuid, genres: &[Uuid]) -> Uuid {
    id_of(&redirected(
        services
            .books
            .create(book_form(title, author, genres))
            .await
            .unwrap(),
    ))
}

pub async fn create_copy(services: &Services, book: Uuid, status: &str) -> Uuid {
    id_of(&redirected(
        services
            .book_instances
            .create(copy_form(book, status))
            .await
            .unwrap(),
    ))
}
