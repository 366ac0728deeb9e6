//! In-process `AddressRepository` backed by an ordered map.
//!
//! Serves requests when no database URL is configured and doubles as a
//! realistic repository in tests. Each operation takes the lock once, so
//! `update` and `delete` observe a concurrent delete the same way the SQL
//! adapter does.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{AddressRepository, AddressRepositoryError};
use crate::domain::{Address, AddressId};

/// Address repository holding rows in memory.
#[derive(Debug, Default)]
pub struct InMemoryAddressRepository {
    rows: RwLock<BTreeMap<AddressId, Address>>,
}

impl InMemoryAddressRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing rows.
    pub fn with_addresses(addresses: impl IntoIterator<Item = Address>) -> Self {
        let rows = addresses
            .into_iter()
            .map(|address| (address.id, address))
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn list_all(&self) -> Result<Vec<Address>, AddressRepositoryError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, AddressRepositoryError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&address.id) {
            return Err(AddressRepositoryError::query(
                "address identifier already exists",
            ));
        }
        rows.insert(address.id, address.clone());
        Ok(address.clone())
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError> {
        let mut rows = self.rows.write().await;
        let Some(existing) = rows.get_mut(&address.id) else {
            return Ok(None);
        };
        existing.details = address.details.clone();
        existing.updated_at = address.updated_at;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: AddressId) -> Result<bool, AddressRepositoryError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn exists(&self, id: AddressId) -> Result<bool, AddressRepositoryError> {
        Ok(self.rows.read().await.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressDetails;
    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn address() -> Address {
        Address::create(
            AddressDetails {
                street: "1 Main St".to_owned(),
                city: "Troy".to_owned(),
                state: "NY".to_owned(),
                zip_code: "12180".to_owned(),
                country: "USA".to_owned(),
            },
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_find_round_trips(address: Address) {
        let repo = InMemoryAddressRepository::new();

        repo.create(&address).await.expect("create succeeds");

        assert_eq!(
            repo.find_by_id(address.id).await.expect("lookup succeeds"),
            Some(address.clone())
        );
        assert!(repo.exists(address.id).await.expect("exists succeeds"));
        assert_eq!(repo.list_all().await.expect("list succeeds").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_duplicate_ids(address: Address) {
        let repo = InMemoryAddressRepository::with_addresses([address.clone()]);

        let error = repo.create(&address).await.expect_err("duplicate fails");

        assert!(matches!(error, AddressRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_creation_time(address: Address) {
        let repo = InMemoryAddressRepository::with_addresses([address.clone()]);
        let mut revised = address.clone();
        revised.revise(
            AddressDetails {
                street: "2 Elm St".to_owned(),
                ..address.details.clone()
            },
            address.created_at + Duration::minutes(5),
        );
        revised.created_at = address.created_at + Duration::days(1);

        let stored = repo
            .update(&revised)
            .await
            .expect("update succeeds")
            .expect("row exists");

        assert_eq!(stored.details.street, "2 Elm St");
        assert_eq!(stored.created_at, address.created_at);
        assert_eq!(stored.updated_at, revised.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_rows_are_reported_not_errors(address: Address) {
        let repo = InMemoryAddressRepository::new();

        assert_eq!(repo.update(&address).await.expect("update runs"), None);
        assert!(!repo.delete(address.id).await.expect("delete runs"));
        assert!(!repo.exists(address.id).await.expect("exists runs"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_once(address: Address) {
        let repo = InMemoryAddressRepository::with_addresses([address.clone()]);

        assert!(repo.delete(address.id).await.expect("delete runs"));
        assert!(!repo.delete(address.id).await.expect("delete runs"));
    }
}
