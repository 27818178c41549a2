use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct DeleteProductParams {
    pub id: i64,
}

/// Soft-deletes a product by clearing its availability flag.
#[async_trait]
pub trait DeleteProductUseCase: Send + Sync {
    async fn execute(&self, params: DeleteProductParams) -> Result<Product, ProductError>;
}
