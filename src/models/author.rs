//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::Entity;
use crate::forms::{self, Checks, FieldError, FormIntake, ALPHANUMERIC};

/// Maximum length of either name part
pub const NAME_MAX_LEN: usize = 100;

/// Full author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// "(No dates provided)" without a birth date, else "(birth - death)"
    pub fn lifespan(&self) -> String {
        match self.date_of_birth {
            None => "(No dates provided)".to_string(),
            Some(birth) => {
                let death = self.date_of_death.map(medium_date).unwrap_or_default();
                format!("({} - {})", medium_date(birth), death)
            }
        }
    }

    /// ISO renderings used to prefill date inputs
    pub fn iso_dates(&self) -> IsoDates {
        IsoDates {
            birth: self.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            death: self.date_of_death.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// "Jan 1, 1900"
pub fn medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

impl Entity for Author {
    const COLLECTION: &'static str = "authors";
    const LABEL: &'static str = "Author";
    const PATH_SEGMENT: &'static str = "author";

    type Input = AuthorInput;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: AuthorInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            family_name: input.family_name,
            date_of_birth: input.date_of_birth,
            date_of_death: input.date_of_death,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IsoDates {
    pub birth: Option<String>,
    pub death: Option<String>,
}

/// Author with its derived fields, for presentation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub dates: String,
    pub iso_dates: IsoDates,
    pub url: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            name: author.name(),
            dates: author.lifespan(),
            iso_dates: author.iso_dates(),
            url: author.url(),
            author,
        }
    }
}

/// Validated author fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author create/update submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified"),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified"),
        regex(path = *ALPHANUMERIC, message = "Family name has non-alphanumeric characters")
    )]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        let dates = author.iso_dates();
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: dates.birth.unwrap_or_default(),
            date_of_death: dates.death.unwrap_or_default(),
        }
    }
}

impl FormIntake for AuthorForm {
    type Value = AuthorInput;

    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn normalize(self) -> Self {
        Self {
            first_name: forms::sanitize(&self.first_name),
            family_name: forms::sanitize(&self.family_name),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    fn check(&self) -> Result<AuthorInput, Vec<FieldError>> {
        let mut checks = Checks::new(forms::rule_failures(
            self.validate(),
            &[
                ("first_name", &self.first_name),
                ("family_name", &self.family_name),
            ],
        ));
        checks.rule(forms::bounded(
            "first_name",
            &self.first_name,
            NAME_MAX_LEN,
            "First name is too long",
        ));
        checks.rule(forms::bounded(
            "family_name",
            &self.family_name,
            NAME_MAX_LEN,
            "Family name is too long",
        ));
        let birth = checks.take(forms::optional_date(
            "date_of_birth",
            &self.date_of_birth,
            "Invalid date of birth",
        ));
        let death = checks.take(forms::optional_date(
            "date_of_death",
            &self.date_of_death,
            "Invalid date of death",
        ));

        checks.finish(|| {
            Some(AuthorInput {
                first_name: self.first_name.clone(),
                family_name: self.family_name.clone(),
                date_of_birth: birth?,
                date_of_death: death?,
            })
        })
    }
}
