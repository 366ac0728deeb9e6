//! Internal Diesel row structs for the `addresses` table.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from [`Address`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Address, AddressDetails, AddressId};

use super::schema::addresses;

/// Row struct for reading from the addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::from(row.id),
            details: AddressDetails {
                street: row.street,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
                country: row.country,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating address records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub id: Uuid,
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub country: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Address> for NewAddressRow<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            id: *address.id.as_uuid(),
            street: &address.details.street,
            city: &address.details.city,
            state: &address.details.state,
            zip_code: &address.details.zip_code,
            country: &address.details.country,
            created_at: address.created_at,
        }
    }
}

/// Changeset for full-field address updates.
///
/// `created_at` is not part of the changeset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = addresses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AddressUpdate<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub country: &'a str,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Address> for AddressUpdate<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            street: &address.details.street,
            city: &address.details.city,
            state: &address.details.state,
            zip_code: &address.details.zip_code,
            country: &address.details.country,
            updated_at: address.updated_at,
        }
    }
}
