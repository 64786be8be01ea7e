//! Book instance (copy) workflows

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{compose::compose, guard::MutationGuard, outcome::Outcome};
use crate::{
    error::{AppError, AppResult, StoreResult},
    forms::{self, FieldError, Validated},
    models::{
        BookInstance, BookInstanceForm, BookInstanceStatus, BookInstanceView, BookSummary, Entity,
    },
    repository::{Filter, Repository},
};

/// A copy together with the book it belongs to
#[derive(Debug, Serialize, ToSchema)]
pub struct CopyEntry {
    pub bookinstance: BookInstanceView,
    /// `None` when the referenced book no longer exists
    pub book: Option<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceListView {
    pub title: String,
    pub bookinstance_list: Vec<CopyEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceDetailView {
    pub title: String,
    pub copy: CopyEntry,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceFormView {
    pub title: String,
    pub bookinstance: BookInstanceForm,
    pub book_list: Vec<BookSummary>,
    pub statuses: Vec<BookInstanceStatus>,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
    guard: MutationGuard,
}

impl BookInstancesService {
    pub fn new(repository: Repository, guard: MutationGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn list(&self) -> AppResult<Outcome<BookInstanceListView>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.find_many(&Filter::All),
            self.book_list(),
        )?;

        let books: HashMap<Uuid, BookSummary> = books.into_iter().map(|b| (b.id, b)).collect();
        let bookinstance_list = instances
            .into_iter()
            .map(|instance| CopyEntry {
                book: books.get(&instance.book).cloned(),
                bookinstance: BookInstanceView::from(instance),
            })
            .collect();

        Ok(Outcome::Render(BookInstanceListView {
            title: "Book Instance List".to_string(),
            bookinstance_list,
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome<BookInstanceDetailView>> {
        let copy = self
            .find_populated(id)
            .await?
            .ok_or_else(|| AppError::missing::<BookInstance>(id))?;
        Ok(Outcome::Render(BookInstanceDetailView {
            title: match &copy.book {
                Some(book) => format!("Copy: {}", book.title),
                None => "Copy".to_string(),
            },
            copy,
        }))
    }

    pub async fn create_form(&self) -> AppResult<Outcome<BookInstanceFormView>> {
        let books = self.book_list().await?;
        Ok(Outcome::Render(form_view(
            "Create BookInstance",
            BookInstanceForm::default(),
            books,
            Vec::new(),
        )))
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<Outcome<BookInstanceFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => {
                self.redisplay("Create BookInstance", echo, errors).await
            }
            Validated::Valid(input) => {
                let instance = self.guard.create::<BookInstance>(&input).await?;
                Ok(Outcome::Redirect(instance.url()))
            }
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Outcome<BookInstanceFormView>> {
        let (instance, books) = compose(
            self.repository.book_instances.find_by_id(id),
            self.book_list(),
        )
        .await?
        .or_not_found::<BookInstance>(id)?;

        Ok(Outcome::Render(form_view(
            "Update BookInstance",
            BookInstanceForm::from(&instance),
            books,
            Vec::new(),
        )))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<Outcome<BookInstanceFormView>> {
        match forms::validate(form) {
            Validated::Invalid { errors, echo } => {
                self.redisplay("Update BookInstance", echo, errors).await
            }
            Validated::Valid(input) => {
                let instance = self
                    .guard
                    .update(&BookInstance::from_input(id, input))
                    .await?;
                Ok(Outcome::Redirect(instance.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Outcome<BookInstanceDetailView>> {
        Ok(match self.find_populated(id).await? {
            Some(copy) => Outcome::Render(BookInstanceDetailView {
                title: "Delete BookInstance".to_string(),
                copy,
            }),
            None => Outcome::Redirect(BookInstance::list_url()),
        })
    }

    /// Nothing references a copy, so deletion is never blocked
    pub async fn delete(&self, id: Uuid) -> AppResult<Outcome<BookInstanceDetailView>> {
        self.guard.delete_unreferenced::<BookInstance>(id).await?;
        Ok(Outcome::Redirect(BookInstance::list_url()))
    }

    async fn redisplay(
        &self,
        title: &str,
        echo: BookInstanceForm,
        errors: Vec<FieldError>,
    ) -> AppResult<Outcome<BookInstanceFormView>> {
        let books = self.book_list().await?;
        Ok(Outcome::Invalid(form_view(title, echo, books, errors)))
    }

    /// Book titles for the copy's book selector, ordered by title
    async fn book_list(&self) -> StoreResult<Vec<BookSummary>> {
        let mut books: Vec<BookSummary> = self
            .repository
            .books
            .find_many_as(&Filter::All, BookSummary::FIELDS)
            .await?;
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books.into_iter().map(BookSummary::with_url).collect())
    }

    async fn find_populated(&self, id: Uuid) -> StoreResult<Option<CopyEntry>> {
        let Some(instance) = self.repository.book_instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books.find_by_id(instance.book).await?;
        Ok(Some(CopyEntry {
            book: book.as_ref().map(BookSummary::from),
            bookinstance: BookInstanceView::from(instance),
        }))
    }
}

fn form_view(
    title: &str,
    bookinstance: BookInstanceForm,
    book_list: Vec<BookSummary>,
    errors: Vec<FieldError>,
) -> BookInstanceFormView {
    BookInstanceFormView {
        title: title.to_string(),
        bookinstance,
        book_list,
        statuses: BookInstanceStatus::ALL.to_vec(),
        errors,
    }
}
