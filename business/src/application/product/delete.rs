use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Deleting product: {}", params.id));

        // Verify product exists before deleting
        self.repository
            .find_available_by_id(params.id)
            .await
            .map_err(|e| ProductError::from_lookup(params.id, e))?;

        let product = self
            .repository
            .mark_unavailable(params.id)
            .await
            .map_err(|e| ProductError::from_lookup(params.id, e))?;

        self.logger
            .info(&format!("Product marked unavailable: {}", params.id));
        Ok(product)
    }
}
