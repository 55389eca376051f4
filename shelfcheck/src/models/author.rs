use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::{or_null, string_or_number};

/// An author record from `/api/v1/Authors`.
///
/// `id_book` points at a book by value only; nothing checks that the book
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub id: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub id_book: Option<String>,
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
}

impl Author {
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    /// Sets the referenced book id.
    pub fn with_book(mut self, id_book: impl Into<String>) -> Self {
        self.id_book = Some(id_book.into());
        self
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    /// True when the author has an identity and both names.
    pub fn is_valid(&self) -> bool {
        self.id > 0 && self.has_minimal_fields()
    }

    /// True when both names are present and non-empty.
    pub fn has_minimal_fields(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.validate().err()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author{{id={}, firstName='{}', lastName='{}', idBook='{}'}}",
            self.id,
            or_null(&self.first_name),
            or_null(&self.last_name),
            or_null(&self.id_book),
        )
    }
}
