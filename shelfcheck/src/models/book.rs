use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::{is_filled, or_null};

/// A book record from `/api/v1/Books`.
///
/// The field rules back [`Book::has_minimal_fields`]: a title and a
/// positive page count are enough to attempt a create. The identity check
/// in [`Book::is_valid`] is separate because the id is assigned by the
/// service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: i64,
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub page_count: i32,
    pub excerpt: Option<String>,
    pub publish_date: Option<String>,
}

impl Book {
    /// A create payload with just a title and page count.
    pub fn draft(title: impl Into<String>, page_count: i32) -> Self {
        Self {
            title: Some(title.into()),
            page_count,
            ..Default::default()
        }
    }

    /// True when the book has an identity and a title.
    pub fn is_valid(&self) -> bool {
        self.id > 0 && is_filled(&self.title)
    }

    /// True when the book can be submitted for creation.
    pub fn has_minimal_fields(&self) -> bool {
        self.validate().is_ok()
    }

    /// The rules [`has_minimal_fields`](Self::has_minimal_fields) rejected.
    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.validate().err()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{id={}, title='{}', description='{}', pageCount={}, publishDate='{}'}}",
            self.id,
            or_null(&self.title),
            or_null(&self.description),
            self.page_count,
            or_null(&self.publish_date),
        )
    }
}
