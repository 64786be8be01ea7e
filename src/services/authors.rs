//! Author workflows

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
    models::{Author, AuthorForm, AuthorView, BookSummary, Entity},
    repository::{Filter, Repository},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorListView {
    pub title: String,
    pub author_list: Vec<AuthorView>,
}

/// Author detail and delete-confirmation pages
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetailView {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorFormView {
    pub title: String,
    pub author: AuthorForm,
    pub errors: Vec<FieldError>,
}

impl AuthorFormView {
    fn new(title: &str, author: AuthorForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: title.to_string(),
            author,
            errors,
        }
    }
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    resolver: RelationshipResolver,
    guard: MutationGuard,
}

impl AuthorsService {
    pub fn new(repository: Repository, resolver: RelationshipResolver, guard: MutationGuard) -> Self {
        Self {
            repository,
            resolver,
            guard,
        }
    }

    /// All authors ordered by family name
    pub async fn list(&self) -> AppResult<Outcome<AuthorListView>> {
        let mut authors = self.repository.authors.find_many(&Filter::All).await?;
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(Outcome::Render(AuthorListView {
            title: "Author List".to_string(),
            author_list: authors.into_iter().map(AuthorView::from).collect(),
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome<AuthorDetailView>> {
        let (author, books) = self.with_books(id).await?.or_not_found::<Author>(id)?;
        Ok(Outcome::Render(detail_view("Author Detail", author, books)))
    }

    pub async fn create_form(&self) -> AppResult<Outcome<AuthorFormView>> {
        Ok(Outcome::Render(AuthorFormView::new(
            "Create Author",
            AuthorForm::default(),
            Vec::new(),
        )))
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Outcome<AuthorFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => {
                Ok(Outcome::Invalid(AuthorFormView::new("Create Author", echo, errors)))
            }
            Validated::Valid(input) => {
                let author = self.guard.create::<Author>(&input).await?;
                Ok(Outcome::Redirect(author.url()))
            }
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Outcome<AuthorFormView>> {
        let author = self
            .repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::missing::<Author>(id))?;
        Ok(Outcome::Render(AuthorFormView::new(
            "Update Author",
            AuthorForm::from(&author),
            Vec::new(),
        )))
    }

    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<Outcome<AuthorFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => {
                Ok(Outcome::Invalid(AuthorFormView::new("Update Author", echo, errors)))
            }
            Validated::Valid(input) => {
                let author = self.guard.update(&Author::from_input(id, input)).await?;
                Ok(Outcome::Redirect(author.url()))
            }
        }
    }

    /// Confirmation page; an author already gone sends the client back to the listing
    pub async fn delete_form(&self, id: Uuid) -> AppResult<Outcome<AuthorDetailView>> {
        Ok(match self.with_books(id).await? {
            Composed::Found(author, books) => {
                Outcome::Render(detail_view("Delete Author", author, books))
            }
            Composed::Missing => Outcome::Redirect(Author::list_url()),
        })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Outcome<AuthorDetailView>> {
        let books = match self.guard.delete::<Author>(id).await? {
            DeleteOutcome::Deleted => return Ok(Outcome::Redirect(Author::list_url())),
            DeleteOutcome::Blocked(books) => books,
        };

        Ok(match self.repository.authors.find_by_id(id).await? {
            Some(author) => Outcome::Blocked(detail_view(
                "Delete Author",
                author,
                books.iter().map(BookSummary::from).collect(),
            )),
            None => Outcome::Redirect(Author::list_url()),
        })
    }

    async fn with_books(&self, id: Uuid) -> AppResult<Composed<Author, Vec<BookSummary>>> {
        compose(
            self.repository.authors.find_by_id(id),
            self.resolver
                .dependents_as::<Author, BookSummary>(id, BookSummary::FIELDS),
        )
        .await
    }
}

fn detail_view(title: &str, author: Author, books: Vec<BookSummary>) -> AuthorDetailView {
    AuthorDetailView {
        title: title.to_string(),
        author: AuthorView::from(author),
        author_books: books.into_iter().map(BookSummary::with_url).collect(),
    }
}
