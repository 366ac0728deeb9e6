//! Address aggregate.
//!
//! An [`Address`] is a postal address owned by nobody in particular: it has
//! no relationships, and every mutation replaces all of its descriptive
//! fields at once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application-generated identifier of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(Uuid);

impl AddressId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AddressId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AddressId> for Uuid {
    fn from(value: AddressId) -> Self {
        value.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five descriptive fields shared by create input, update input and the
/// stored entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetails {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Client-supplied address fields before validation.
///
/// `None` marks a field the client left out or sent as `null`; the format
/// rules only judge values that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl From<AddressInput> for AddressDetails {
    fn from(value: AddressInput) -> Self {
        Self {
            street: value.street.unwrap_or_default(),
            city: value.city.unwrap_or_default(),
            state: value.state.unwrap_or_default(),
            zip_code: value.zip_code.unwrap_or_default(),
            country: value.country.unwrap_or_default(),
        }
    }
}

/// A persisted postal address.
///
/// `created_at` is stamped once on creation; `updated_at` stays `None` until
/// the first successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    #[serde(flatten)]
    pub details: AddressDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Address {
    /// Build a brand-new address with a fresh identifier.
    #[must_use]
    pub fn create(details: AddressDetails, now: DateTime<Utc>) -> Self {
        Self {
            id: AddressId::random(),
            details,
            created_at: now,
            updated_at: None,
        }
    }

    /// Overwrite every descriptive field and stamp the modification time.
    pub fn revise(&mut self, details: AddressDetails, now: DateTime<Utc>) {
        self.details = details;
        self.updated_at = Some(now);
    }
}
