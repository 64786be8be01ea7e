//! Data models for the LocalLib catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorInput, AuthorView};
pub use book::{Book, BookForm, BookInput, BookSummary};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceStatus, BookInstanceView,
};
pub use genre::{Genre, GenreForm, GenreInput, GenreView};

/// Root of every canonical catalog path
pub const CATALOG_ROOT: &str = "/catalog";

/// A persisted catalog record.
///
/// The identifier is assigned by the store on insert and is never part of the
/// persisted body; `from_input` is the only way to pair validated fields with
/// an identity.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records live in
    const COLLECTION: &'static str;
    /// Human label used in messages ("Author", "Book", ...)
    const LABEL: &'static str;
    /// Path segment used by canonical detail paths
    const PATH_SEGMENT: &'static str;

    /// Validated, identity-less field set
    type Input: Serialize + Send + Sync;

    fn id(&self) -> Uuid;

    fn from_input(id: Uuid, input: Self::Input) -> Self;

    /// Canonical detail-page path
    fn url(&self) -> String {
        detail_path(Self::PATH_SEGMENT, self.id())
    }

    /// Collection listing path
    fn list_url() -> String {
        format!("{}/{}s", CATALOG_ROOT, Self::PATH_SEGMENT)
    }
}

pub(crate) fn detail_path(segment: &str, id: Uuid) -> String {
    format!("{}/{}/{}", CATALOG_ROOT, segment, id)
}
