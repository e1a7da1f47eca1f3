//! Home feed domain model.
//!
//! # Responsibility
//! - Define the records rendered by the home screen (connections, activities,
//!   events) and the category selector that filters them.
//! - Provide the `Categorized` seam used by the filter engine.
//!
//! # Invariants
//! - Every feed item carries exactly one free-text `category`.
//! - Category labels are unique within a selector; `"All"` means no filter.
//! - Category comparison is exact and case-sensitive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sentinel category label meaning "no filter".
pub const ALL_CATEGORY_LABEL: &str = "All";

/// Selector entry for the home feed category bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Matching key for filtering. `id` is never compared.
    pub label: String,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Returns whether this entry is the `"All"` pass-through selector.
    pub fn is_all(&self) -> bool {
        self.label == ALL_CATEGORY_LABEL
    }
}

/// Presence indicator shown on a connection avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Online,
    Offline,
}

/// Priority connection shown in the horizontal avatar strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Stable owner ID, also the key into the image reference store.
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: Option<ConnectionStatus>,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: ConnectionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_online(&self) -> bool {
        self.status == Some(ConnectionStatus::Online)
    }
}

/// Recent activity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display string such as `2h ago`; never parsed.
    pub timestamp: String,
    pub category: String,
}

/// Upcoming event card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    /// Serialized as `type` to match the UI schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display string such as `3:00 PM`; never parsed.
    pub date: String,
    pub day: String,
    pub month: String,
    pub category: String,
}

/// Feed item tagged with a single category label.
pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for Connection {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for Activity {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for EventItem {
    fn category(&self) -> &str {
        &self.category
    }
}

/// Model-level validation failures for feed and contact records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text field is blank.
    EmptyField(&'static str),
    /// Two selector entries share the same label.
    DuplicateCategoryLabel(String),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Phone contains characters other than digits and `+-() `.
    InvalidPhoneNumber(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::DuplicateCategoryLabel(label) => {
                write!(f, "duplicate category label: `{label}`")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidPhoneNumber(value) => write!(f, "invalid phone number: `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

/// Validates a category selector list.
///
/// # Errors
/// - `EmptyField("label")` when any label is blank.
/// - `DuplicateCategoryLabel` when two entries share a label.
pub fn validate_categories(categories: &[Category]) -> Result<(), ModelValidationError> {
    let mut seen = BTreeSet::new();
    for category in categories {
        if category.label.trim().is_empty() {
            return Err(ModelValidationError::EmptyField("label"));
        }
        if !seen.insert(category.label.as_str()) {
            return Err(ModelValidationError::DuplicateCategoryLabel(
                category.label.clone(),
            ));
        }
    }
    Ok(())
}
