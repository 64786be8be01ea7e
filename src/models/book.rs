//! Book model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{detail_path, Entity};
use crate::forms::{self, Checks, FieldError, FormIntake};

/// Full book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Referenced author
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    /// Referenced genres
    #[serde(default)]
    pub genre: Vec<Uuid>,
}

impl Entity for Book {
    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";
    const PATH_SEGMENT: &'static str = "book";

    type Input = BookInput;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: BookInput) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            summary: input.summary,
            isbn: input.isbn,
            genre: input.genre,
        }
    }
}

/// Projection of a book used in dependent listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
}

impl BookSummary {
    pub const FIELDS: &'static [&'static str] = &["title", "summary"];

    /// Attach the canonical path after projection
    pub fn with_url(mut self) -> Self {
        self.url = detail_path(Book::PATH_SEGMENT, self.id);
        self
    }
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

/// Validated book fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Book create/update submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    /// Selected genre ids; a single value or none at all is accepted
    #[serde(default, deserialize_with = "forms::one_or_many")]
    pub genre: Vec<String>,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(Uuid::to_string).collect(),
        }
    }
}

impl FormIntake for BookForm {
    type Value = BookInput;

    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn normalize(self) -> Self {
        Self {
            title: forms::sanitize(&self.title),
            author: forms::sanitize(&self.author),
            summary: forms::sanitize(&self.summary),
            isbn: forms::sanitize(&self.isbn),
            genre: self.genre.iter().map(|g| forms::escape(g)).collect(),
        }
    }

    fn check(&self) -> Result<BookInput, Vec<FieldError>> {
        let mut checks = Checks::default();
        checks.rule(forms::required("title", &self.title, "Title must not be empty"));

        let author = if self.author.is_empty() {
            checks.rule(forms::required("author", &self.author, "Author must not be empty"));
            None
        } else {
            checks.take(forms::identifier("author", &self.author, "Author is not a valid reference"))
        };

        checks.rule(forms::required("summary", &self.summary, "Summary must not be empty"));
        checks.rule(forms::required("isbn", &self.isbn, "ISBN must not be empty"));

        let genre: Vec<Option<Uuid>> = self
            .genre
            .iter()
            .map(|g| checks.take(forms::identifier("genre", g, "Genre is not a valid reference")))
            .collect();

        checks.finish(|| {
            Some(BookInput {
                title: self.title.clone(),
                author: author?,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre: genre.into_iter().collect::<Option<Vec<_>>>()?,
            })
        })
    }
}
