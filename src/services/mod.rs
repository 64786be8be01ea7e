//! Catalog orchestration services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod compose;
pub mod genres;
pub mod guard;
pub mod outcome;
pub mod resolver;

pub use outcome::Outcome;

use crate::repository::Repository;

use self::{guard::MutationGuard, resolver::RelationshipResolver};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Wire every service over one repository
    pub fn new(repository: Repository) -> Self {
        let resolver = RelationshipResolver::new(repository.clone());
        let guard = MutationGuard::new(repository.clone(), resolver.clone());

        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone(), resolver.clone(), guard.clone()),
            books: books::BooksService::new(repository.clone(), resolver.clone(), guard.clone()),
            genres: genres::GenresService::new(repository.clone(), resolver, guard.clone()),
            book_instances: book_instances::BookInstancesService::new(repository, guard),
        }
    }
}
