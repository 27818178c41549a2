use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::validate::{
    ValidateProductsParams, ValidateProductsUseCase,
};

pub struct ValidateProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ValidateProductsUseCase for ValidateProductsUseCaseImpl {
    async fn execute(&self, params: ValidateProductsParams) -> Result<Vec<Product>, ProductError> {
        let ids: Vec<i64> = params
            .ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        self.logger
            .info(&format!("Validating {} distinct product ids", ids.len()));

        // Raw existence only: soft-deleted rows still count as valid here.
        let products = self.repository.find_by_ids(&ids).await?;

        if products.len() != ids.len() {
            self.logger.warn(&format!(
                "Product validation failed: {} of {} ids found",
                products.len(),
                ids.len()
            ));
            return Err(ProductError::ValidationFailed);
        }

        Ok(products)
    }
}
