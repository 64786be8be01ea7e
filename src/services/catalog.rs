//! Catalog home: record counts across every collection

use serde::Serialize;
use utoipa::ToSchema;

use super::outcome::Outcome;
use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::{Filter, Repository},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexView {
    pub title: String,
    pub data: CatalogCounts,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Cheapest round trip that proves the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.genres.count_matching(&Filter::All).await?;
        Ok(())
    }

    pub async fn index(&self) -> AppResult<Outcome<IndexView>> {
        let available = Filter::eq("status", BookInstanceStatus::Available.as_str());
        let (books, copies, available, authors, genres) = tokio::try_join!(
            self.repository.books.count_matching(&Filter::All),
            self.repository.book_instances.count_matching(&Filter::All),
            self.repository.book_instances.count_matching(&available),
            self.repository.authors.count_matching(&Filter::All),
            self.repository.genres.count_matching(&Filter::All),
        )?;

        Ok(Outcome::Render(IndexView {
            title: "Local Library Home".to_string(),
            data: CatalogCounts {
                book_count: books,
                book_instance_count: copies,
                book_instance_available_count: available,
                author_count: authors,
                genre_count: genres,
            },
        }))
    }
}
