//! Contact model and edit-form state.
//!
//! # Responsibility
//! - Define the contact record listed by the Friends/Family and Work tabs.
//! - Hold the draft state of the contact edit modal and validate it on save.
//!
//! # Invariants
//! - A saved contact always has a non-empty trimmed `name`.
//! - `email` and `phone_number` are either empty or well-formed.
//! - A draft keeps the contact `id` it started with; new drafts get a UUID.

use crate::model::feed::ModelValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\- ]*[0-9][0-9()\- ]*$").expect("valid phone regex"));

/// Relationship bucket picked in the edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    Family,
    Friend,
    Work,
    Other,
}

impl RelationshipType {
    /// Selector order used by the edit modal.
    pub const ALL: [RelationshipType; 4] = [Self::Family, Self::Friend, Self::Work, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friend => "Friend",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Family" => Some(Self::Family),
            "Friend" => Some(Self::Friend),
            "Work" => Some(Self::Work),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable owner ID; doubles as the image reference key.
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub relationship: RelationshipType,
    pub birthday: Option<String>,
    pub notes: Option<String>,
    pub image: Option<String>,
}

/// Contacts tab that lists a subset of relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTab {
    FriendsFamily,
    Work,
}

impl ContactTab {
    pub fn includes(self, relationship: RelationshipType) -> bool {
        match self {
            Self::FriendsFamily => matches!(
                relationship,
                RelationshipType::Family | RelationshipType::Friend
            ),
            Self::Work => relationship == RelationshipType::Work,
        }
    }
}

/// Returns the contacts shown by `tab`, preserving input order.
pub fn contacts_for_tab(contacts: &[Contact], tab: ContactTab) -> Vec<&Contact> {
    contacts
        .iter()
        .filter(|contact| tab.includes(contact.relationship))
        .collect()
}

/// Mutable form state behind the contact edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    contact: Contact,
    is_new: bool,
}

impl ContactDraft {
    /// Starts a blank draft with a fresh stable ID and relationship `Other`.
    pub fn new_contact() -> Self {
        Self {
            contact: Contact {
                id: Uuid::new_v4().to_string(),
                name: String::new(),
                phone_number: String::new(),
                email: String::new(),
                relationship: RelationshipType::Other,
                birthday: None,
                notes: None,
                image: None,
            },
            is_new: true,
        }
    }

    /// Starts a draft from an existing contact.
    pub fn edit(contact: Contact) -> Self {
        Self {
            contact,
            is_new: false,
        }
    }

    /// Modal title depends on whether the draft edits an existing contact.
    pub fn title(&self) -> &'static str {
        if self.is_new {
            "New Contact"
        } else {
            "Edit Contact"
        }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn id(&self) -> &str {
        &self.contact.id
    }

    /// Returns the unsaved form state.
    pub fn current(&self) -> &Contact {
        &self.contact
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.contact.name = name.into();
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) {
        self.contact.phone_number = phone_number.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.contact.email = email.into();
    }

    pub fn set_relationship(&mut self, relationship: RelationshipType) {
        self.contact.relationship = relationship;
    }

    pub fn set_birthday(&mut self, birthday: Option<String>) {
        self.contact.birthday = birthday;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.contact.notes = notes;
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.contact.image = image;
    }

    /// Normalizes and validates the draft, returning the contact to persist.
    ///
    /// Blank optional fields collapse to `None`.
    ///
    /// # Errors
    /// - `EmptyField("name")` for a blank name.
    /// - `InvalidEmail` / `InvalidPhoneNumber` for malformed non-empty values.
    pub fn save(&self) -> Result<Contact, ModelValidationError> {
        let name = self.contact.name.trim().to_string();
        if name.is_empty() {
            return Err(ModelValidationError::EmptyField("name"));
        }

        let email = self.contact.email.trim().to_string();
        if !email.is_empty() && !EMAIL_RE.is_match(&email) {
            return Err(ModelValidationError::InvalidEmail(email));
        }

        let phone_number = self.contact.phone_number.trim().to_string();
        if !phone_number.is_empty() && !PHONE_RE.is_match(&phone_number) {
            return Err(ModelValidationError::InvalidPhoneNumber(phone_number));
        }

        Ok(Contact {
            id: self.contact.id.clone(),
            name,
            phone_number,
            email,
            relationship: self.contact.relationship,
            birthday: non_blank(self.contact.birthday.as_deref()),
            notes: non_blank(self.contact.notes.as_deref()),
            image: non_blank(self.contact.image.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
