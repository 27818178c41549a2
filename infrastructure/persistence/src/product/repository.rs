use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{NewProduct, Product, ProductPatch};
use business::domain::product::repository::ProductRepository;

use super::entity::{PRODUCT_COLUMNS, ProductEntity};

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        tracing::error!(operation, error = %e, "Product query failed");
        RepositoryError::database_error()
    }
}

/// Postgres binds BIGINT as signed; values beyond `i64::MAX` saturate.
fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn insert(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "INSERT INTO products (name, price, available) VALUES ($1, $2, TRUE) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.name)
        .bind(&product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("insert"))?;

        Ok(entity.into_domain())
    }

    async fn count_available(&self) -> Result<u64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("count_available"))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn find_available_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE available = TRUE ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(to_bigint(limit))
        .bind(to_bigint(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("find_available_page"))?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn find_available_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND available = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("find_available_by_id"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn update_available(
        &self,
        id: i64,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("update_available"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn mark_unavailable(&self, id: i64) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"UPDATE products SET available = FALSE, updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("mark_unavailable"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("find_by_ids"))?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }
}
