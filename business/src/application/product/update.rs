use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Updating product: {}", params.id));

        params.patch.validate()?;
        if params.patch.is_empty() {
            self.logger
                .debug(&format!("Empty patch for product {}, only touching updated_at", params.id));
        }

        // Verify product exists and is available
        self.repository
            .find_available_by_id(params.id)
            .await
            .map_err(|e| ProductError::from_lookup(params.id, e))?;

        // The write is conditional on availability too, so a product soft-deleted
        // after the check above surfaces as NotFound instead of being modified.
        let updated = self
            .repository
            .update_available(params.id, &params.patch)
            .await
            .map_err(|e| ProductError::from_lookup(params.id, e))?;

        self.logger
            .info(&format!("Product updated: {}", updated.id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::{NewProduct, ProductPatch};
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn insert(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
            async fn count_available(&self) -> Result<u64, RepositoryError>;
            async fn find_available_page(&self, offset: u64, limit: u64) -> Result<Vec<Product>, RepositoryError>;
            async fn find_available_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
            async fn update_available(&self, id: i64, patch: &ProductPatch) -> Result<Product, RepositoryError>;
            async fn mark_unavailable(&self, id: i64) -> Result<Product, RepositoryError>;
            async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn existing(id: i64) -> Product {
        let now = Utc::now();
        Product::from_repository(
            id,
            "Desk Lamp".to_string(),
            BigDecimal::from(20),
            true,
            now,
            now,
        )
    }

    #[tokio::test]
    async fn should_apply_patch_to_existing_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_find_available_by_id()
            .with(eq(3))
            .times(1)
            .returning(|id| Ok(existing(id)));
        mock_repo
            .expect_update_available()
            .withf(|id, patch| *id == 3 && patch.name.as_deref() == Some("LED Desk Lamp"))
            .times(1)
            .returning(|id, patch| {
                let mut product = existing(id);
                if let Some(name) = &patch.name {
                    product.name = name.clone();
                }
                Ok(product)
            });

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(UpdateProductParams {
                id: 3,
                patch: ProductPatch {
                    name: Some("LED Desk Lamp".to_string()),
                    price: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(product.id, 3);
        assert_eq!(product.name, "LED Desk Lamp");
        assert_eq!(product.price, BigDecimal::from(20));
    }

    #[tokio::test]
    async fn should_return_not_found_without_writing() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_find_available_by_id()
            .returning(|_| Err(RepositoryError::NotFound));
        mock_repo.expect_update_available().never();

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: 99,
                patch: ProductPatch {
                    name: Some("Ghost".to_string()),
                    price: None,
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound(99)));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleted_between_check_and_write() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_find_available_by_id()
            .returning(|id| Ok(existing(id)));
        mock_repo
            .expect_update_available()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: 5,
                patch: ProductPatch {
                    name: None,
                    price: Some(BigDecimal::from(1)),
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn should_reject_invalid_patch_before_touching_store() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_find_available_by_id().never();
        mock_repo.expect_update_available().never();

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: 1,
                patch: ProductPatch {
                    name: Some(" ".to_string()),
                    price: None,
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NameEmpty));
    }
}
