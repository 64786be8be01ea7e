//! Genre model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::Entity;
use crate::forms::{self, Checks, FieldError, FormIntake};

/// Genre record; `name` acts as a soft-unique key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Entity for Genre {
    const COLLECTION: &'static str = "genres";
    const LABEL: &'static str = "Genre";
    const PATH_SEGMENT: &'static str = "genre";

    type Input = GenreInput;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: GenreInput) -> Self {
        Self { id, name: input.name }
    }
}

/// Genre with its canonical path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenreView {
    #[serde(flatten)]
    pub genre: Genre,
    pub url: String,
}

impl From<Genre> for GenreView {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre.url(),
            genre,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreInput {
    pub name: String,
}

/// Genre create/update submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

impl FormIntake for GenreForm {
    type Value = GenreInput;

    const FIELDS: &'static [&'static str] = &["name"];

    fn normalize(self) -> Self {
        Self {
            name: forms::sanitize(&self.name),
        }
    }

    fn check(&self) -> Result<GenreInput, Vec<FieldError>> {
        let checks = Checks::new(forms::rule_failures(
            self.validate(),
            &[("name", &self.name)],
        ));
        checks.finish(|| {
            Some(GenreInput {
                name: self.name.clone(),
            })
        })
    }
}
