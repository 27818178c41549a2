use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::{NewProduct, Product, ProductPatch};

/// Port to the persistent product store.
///
/// Every `*_available` method only sees rows with `available = true`.
/// Conditional writes return `RepositoryError::NotFound` when no available row matched.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
    async fn count_available(&self) -> Result<u64, RepositoryError>;
    async fn find_available_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Product>, RepositoryError>;
    async fn find_available_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
    async fn update_available(
        &self,
        id: i64,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError>;
    async fn mark_unavailable(&self, id: i64) -> Result<Product, RepositoryError>;
    /// Raw existence lookup, regardless of availability.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, RepositoryError>;
}
