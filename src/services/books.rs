//! Book workflows, including author/genre population and genre pre-selection

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    compose::{compose, mark_selected, Composed, GenreOption},
    guard::{DeleteOutcome, MutationGuard},
    outcome::Outcome,
    resolver::RelationshipResolver,
};
use crate::{
    error::{AppResult, StoreResult},
    forms::{self, FieldError, Validated},
    models::{
        Author, AuthorView, Book, BookForm, BookInstance, BookInstanceView, BookSummary, Entity,
        Genre, GenreView,
    },
    repository::{Filter, Repository},
};

/// Book with its author and genres resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulatedBook {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    /// `None` when the referenced author no longer exists
    pub author: Option<AuthorView>,
    pub genre: Vec<GenreView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListEntry {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub author: Option<AuthorView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListView {
    pub title: String,
    pub book_list: Vec<BookListEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetailView {
    pub title: String,
    pub book: PopulatedBook,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormView {
    pub title: String,
    pub book: BookForm,
    pub authors: Vec<AuthorView>,
    pub genres: Vec<GenreOption>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDeleteView {
    pub title: String,
    pub book: BookSummary,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    resolver: RelationshipResolver,
    guard: MutationGuard,
}

impl BooksService {
    pub fn new(repository: Repository, resolver: RelationshipResolver, guard: MutationGuard) -> Self {
        Self {
            repository,
            resolver,
            guard,
        }
    }

    /// All books ordered by title, each with its author
    pub async fn list(&self) -> AppResult<Outcome<BookListView>> {
        let (mut books, authors) = tokio::try_join!(
            self.repository.books.find_many(&Filter::All),
            self.repository.authors.find_many(&Filter::All),
        )?;
        books.sort_by(|a, b| a.title.cmp(&b.title));

        let authors: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        let book_list = books
            .into_iter()
            .map(|book| BookListEntry {
                url: book.url(),
                author: authors.get(&book.author).cloned().map(AuthorView::from),
                id: book.id,
                title: book.title,
            })
            .collect();

        Ok(Outcome::Render(BookListView {
            title: "Book List".to_string(),
            book_list,
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome<BookDetailView>> {
        let (book, instances) = compose(
            self.find_populated(id),
            self.resolver.dependents::<Book>(id),
        )
        .await?
        .or_not_found::<Book>(id)?;

        Ok(Outcome::Render(BookDetailView {
            title: book.title.clone(),
            book,
            book_instances: instances.into_iter().map(BookInstanceView::from).collect(),
        }))
    }

    pub async fn create_form(&self) -> AppResult<Outcome<BookFormView>> {
        let (authors, genres) = self.choices().await?;
        Ok(Outcome::Render(form_view(
            "Create Book",
            BookForm::default(),
            authors,
            genres,
            Vec::new(),
        )))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Outcome<BookFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => self.redisplay("Create Book", echo, errors).await,
            Validated::Valid(input) => {
                let book = self.guard.create::<Book>(&input).await?;
                Ok(Outcome::Redirect(book.url()))
            }
        }
    }

    /// Current values with the book's genres pre-selected
    pub async fn update_form(&self, id: Uuid) -> AppResult<Outcome<BookFormView>> {
        let (book, (authors, genres)) = compose(self.repository.books.find_by_id(id), self.choices())
            .await?
            .or_not_found::<Book>(id)?;

        Ok(Outcome::Render(form_view(
            "Update Book",
            BookForm::from(&book),
            authors,
            genres,
            Vec::new(),
        )))
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<Outcome<BookFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => self.redisplay("Update Book", echo, errors).await,
            Validated::Valid(input) => {
                let book = self.guard.update(&Book::from_input(id, input)).await?;
                Ok(Outcome::Redirect(book.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Outcome<BookDeleteView>> {
        let composed = compose(
            self.repository.books.find_by_id(id),
            self.resolver.dependents::<Book>(id),
        )
        .await?;

        Ok(match composed {
            Composed::Found(book, instances) => Outcome::Render(delete_view(&book, instances)),
            Composed::Missing => Outcome::Redirect(Book::list_url()),
        })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Outcome<BookDeleteView>> {
        let instances = match self.guard.delete::<Book>(id).await? {
            DeleteOutcome::Deleted => return Ok(Outcome::Redirect(Book::list_url())),
            DeleteOutcome::Blocked(instances) => instances,
        };

        Ok(match self.repository.books.find_by_id(id).await? {
            Some(book) => Outcome::Blocked(delete_view(&book, instances)),
            None => Outcome::Redirect(Book::list_url()),
        })
    }

    /// Failed submission: the echoed genre ids drive pre-selection
    async fn redisplay(
        &self,
        title: &str,
        echo: BookForm,
        errors: Vec<FieldError>,
    ) -> AppResult<Outcome<BookFormView>> {
        let (authors, genres) = self.choices().await?;
        Ok(Outcome::Invalid(form_view(title, echo, authors, genres, errors)))
    }

    /// Every author and genre, for the form selectors
    async fn choices(&self) -> StoreResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(
            self.repository.authors.find_many(&Filter::All),
            self.repository.genres.find_many(&Filter::All),
        )
    }

    async fn find_populated(&self, id: Uuid) -> StoreResult<Option<PopulatedBook>> {
        let Some(book) = self.repository.books.find_by_id(id).await? else {
            return Ok(None);
        };
        let (author, genres) = tokio::try_join!(
            self.repository.authors.find_by_id(book.author),
            self.repository.genres.find_many(&Filter::All),
        )?;

        let mut by_id: HashMap<Uuid, Genre> = genres.into_iter().map(|g| (g.id, g)).collect();
        let genre = book
            .genre
            .iter()
            .filter_map(|gid| by_id.remove(gid))
            .map(GenreView::from)
            .collect();

        Ok(Some(PopulatedBook {
            url: book.url(),
            author: author.map(AuthorView::from),
            genre,
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
        }))
    }
}

fn form_view(
    title: &str,
    book: BookForm,
    mut authors: Vec<Author>,
    genres: Vec<Genre>,
    errors: Vec<FieldError>,
) -> BookFormView {
    authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
    let genres = mark_selected(genres, &book.genre);
    BookFormView {
        title: title.to_string(),
        book,
        authors: authors.into_iter().map(AuthorView::from).collect(),
        genres,
        errors,
    }
}

fn delete_view(book: &Book, instances: Vec<BookInstance>) -> BookDeleteView {
    BookDeleteView {
        title: "Delete Book".to_string(),
        book: BookSummary::from(book),
        book_instances: instances.into_iter().map(BookInstanceView::from).collect(),
    }
}
