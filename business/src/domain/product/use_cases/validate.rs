use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct ValidateProductsParams {
    pub ids: Vec<i64>,
}

/// Confirms that every requested id exists as a stored product.
#[async_trait]
pub trait ValidateProductsUseCase: Send + Sync {
    async fn execute(&self, params: ValidateProductsParams) -> Result<Vec<Product>, ProductError>;
}
