//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{author::medium_date, Entity};
use crate::forms::{self, Checks, FieldError, FormIntake};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for BookInstanceStatus {
    fn default() -> Self {
        BookInstanceStatus::Maintenance
    }
}

impl FromStr for BookInstanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book instance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    /// Referenced book
    pub book: Uuid,
    pub imprint: String,
    #[serde(default)]
    pub status: BookInstanceStatus,
    #[serde(default)]
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Due-back date for display, blank when unset
    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(medium_date).unwrap_or_default()
    }
}

impl Entity for BookInstance {
    const COLLECTION: &'static str = "bookinstances";
    const LABEL: &'static str = "Book copy";
    const PATH_SEGMENT: &'static str = "bookinstance";

    type Input = BookInstanceInput;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: BookInstanceInput) -> Self {
        Self {
            id,
            book: input.book,
            imprint: input.imprint,
            status: input.status,
            due_back: input.due_back,
        }
    }
}

/// Copy with its derived fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookInstanceView {
    #[serde(flatten)]
    pub instance: BookInstance,
    pub due_back_formatted: String,
    pub url: String,
}

impl From<BookInstance> for BookInstanceView {
    fn from(instance: BookInstance) -> Self {
        Self {
            due_back_formatted: instance.due_back_formatted(),
            url: instance.url(),
            instance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstanceInput {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Book instance create/update submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

impl FormIntake for BookInstanceForm {
    type Value = BookInstanceInput;

    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn normalize(self) -> Self {
        Self {
            book: forms::sanitize(&self.book),
            imprint: forms::sanitize(&self.imprint),
            status: forms::sanitize(&self.status),
            due_back: self.due_back.trim().to_string(),
        }
    }

    fn check(&self) -> Result<BookInstanceInput, Vec<FieldError>> {
        let mut checks = Checks::default();

        let book = if self.book.is_empty() {
            checks.rule(forms::required("book", &self.book, "Book must be specified"));
            None
        } else {
            checks.take(forms::identifier("book", &self.book, "Book is not a valid reference"))
        };
        checks.rule(forms::required("imprint", &self.imprint, "Imprint must be specified"));

        let status = if self.status.is_empty() {
            Some(BookInstanceStatus::default())
        } else {
            checks.take(
                self.status
                    .parse::<BookInstanceStatus>()
                    .map_err(|_| FieldError::new("status", "Invalid status", &self.status)),
            )
        };
        let due_back = checks.take(forms::optional_date("due_back", &self.due_back, "Invalid date"));

        checks.finish(|| {
            Some(BookInstanceInput {
                book: book?,
                imprint: self.imprint.clone(),
                status: status?,
                due_back: due_back?,
            })
        })
    }
}
