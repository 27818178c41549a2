use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::product::model::Product;

/// Column list shared by every query that materializes a `ProductEntity`.
pub const PRODUCT_COLUMNS: &str = "id, name, price, available, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub name: String,
    pub price: BigDecimal,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.name,
            self.price,
            self.available,
            self.created_at,
            self.updated_at,
        )
    }
}
