//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement. `update` and `delete` report a
//! missing row through their return value so a concurrent delete between the
//! service's existence check and the write surfaces as `None`/`false`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AddressRepository, AddressRepositoryError};
use crate::domain::{Address, AddressId};

use super::models::{AddressRow, AddressUpdate, NewAddressRow};
use super::pool::{DbPool, PoolError};
use super::schema::addresses;

/// Diesel-backed implementation of the `AddressRepository` port.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AddressRepositoryError {
    AddressRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AddressRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "address query failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "address query failed"
        ),
    }

    match error {
        DieselError::NotFound => AddressRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => AddressRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AddressRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AddressRepositoryError::query("address identifier already exists")
        }
        _ => AddressRepositoryError::query("database error"),
    }
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn list_all(&self) -> Result<Vec<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AddressRow> = addresses::table
            .select(AddressRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AddressRow> = addresses::table
            .find(id.as_uuid())
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Address::from))
    }

    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AddressRow = diesel::insert_into(addresses::table)
            .values(NewAddressRow::from(address))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AddressRow> = diesel::update(addresses::table.find(address.id.as_uuid()))
            .set(AddressUpdate::from(address))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Address::from))
    }

    async fn delete(&self, id: AddressId) -> Result<bool, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(addresses::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn exists(&self, id: AddressId) -> Result<bool, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(addresses::table.find(id.as_uuid())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
