//! Genre workflows

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    compose::{compose, Composed},
    guard::{DeleteOutcome, MutationGuard},
    outcome::Outcome,
    resolver::RelationshipResolver,
};
use crate::{
    error::{AppError, AppResult},
    forms::{self, FieldError, Validated},
    models::{BookSummary, Entity, Genre, GenreForm, GenreView},
    repository::{Filter, Repository},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreListView {
    pub title: String,
    pub genre_list: Vec<GenreView>,
}

/// Genre detail and delete-confirmation pages
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDetailView {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreFormView {
    pub title: String,
    pub genre: GenreForm,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
    resolver: RelationshipResolver,
    guard: MutationGuard,
}

impl GenresService {
    pub fn new(repository: Repository, resolver: RelationshipResolver, guard: MutationGuard) -> Self {
        Self {
            repository,
            resolver,
            guard,
        }
    }

    pub async fn list(&self) -> AppResult<Outcome<GenreListView>> {
        let mut genres = self.repository.genres.find_many(&Filter::All).await?;
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Outcome::Render(GenreListView {
            title: "Genre List".to_string(),
            genre_list: genres.into_iter().map(GenreView::from).collect(),
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome<GenreDetailView>> {
        let (genre, books) = self.with_books(id).await?.or_not_found::<Genre>(id)?;
        Ok(Outcome::Render(detail_view("Genre Detail", genre, books)))
    }

    pub async fn create_form(&self) -> AppResult<Outcome<GenreFormView>> {
        Ok(Outcome::Render(form_view("Create Genre", GenreForm::default(), Vec::new())))
    }

    /// Creating a name that already exists redirects to the existing genre
    pub async fn create(&self, form: GenreForm) -> AppResult<Outcome<GenreFormView>> {
        let input = match forms::validate(form) {
            Validated::Valid(input) => input,
            Validated::Invalid { errors, echo } => {
                return Ok(Outcome::Invalid(form_view("Create Genre", echo, errors)))
            }
        };

        let existing = self
            .repository
            .genres
            .find_many(&Filter::eq("name", input.name.as_str()))
            .await?;
        if let Some(genre) = existing.first() {
            tracing::debug!("Genre {:?} already exists as {}", genre.name, genre.id);
            return Ok(Outcome::Redirect(genre.url()));
        }

        let genre = self.guard.create::<Genre>(&input).await?;
        Ok(Outcome::Redirect(genre.url()))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Outcome<GenreFormView>> {
        let genre = self
            .repository
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::missing::<Genre>(id))?;
        Ok(Outcome::Render(form_view(
            "Update Genre",
            GenreForm::from(&genre),
            Vec::new(),
        )))
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<Outcome<GenreFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => {
                Ok(Outcome::Invalid(form_view("Update Genre", echo, errors)))
            }
            Validated::Valid(input) => {
                let genre = self.guard.update(&Genre::from_input(id, input)).await?;
                Ok(Outcome::Redirect(genre.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Outcome<GenreDetailView>> {
        Ok(match self.with_books(id).await? {
            Composed::Found(genre, books) => Outcome::Render(detail_view("Delete Genre", genre, books)),
            Composed::Missing => Outcome::Redirect(Genre::list_url()),
        })
    }

    /// Blocked while any book still lists the genre
    pub async fn delete(&self, id: Uuid) -> AppResult<Outcome<GenreDetailView>> {
        let books = match self.guard.delete::<Genre>(id).await? {
            DeleteOutcome::Deleted => return Ok(Outcome::Redirect(Genre::list_url())),
            DeleteOutcome::Blocked(books) => books,
        };

        Ok(match self.repository.genres.find_by_id(id).await? {
            Some(genre) => Outcome::Blocked(detail_view(
                "Delete Genre",
                genre,
                books.iter().map(BookSummary::from).collect(),
            )),
            None => Outcome::Redirect(Genre::list_url()),
        })
    }

    async fn with_books(&self, id: Uuid) -> AppResult<Composed<Genre, Vec<BookSummary>>> {
        compose(
            self.repository.genres.find_by_id(id),
            self.resolver
                .dependents_as::<Genre, BookSummary>(id, BookSummary::FIELDS),
        )
        .await
    }
}

fn detail_view(title: &str, genre: Genre, books: Vec<BookSummary>) -> GenreDetailView {
    GenreDetailView {
        title: title.to_string(),
        genre: GenreView::from(genre),
        genre_books: books.into_iter().map(BookSummary::with_url).collect(),
    }
}

fn form_view(title: &str, genre: GenreForm, errors: Vec<FieldError>) -> GenreFormView {
    GenreFormView {
        title: title.to_string(),
        genre,
        errors,
    }
}
