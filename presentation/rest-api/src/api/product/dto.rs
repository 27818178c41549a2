use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use poem_openapi::Object;

use business::domain::product::model::{Product, ProductPatch};
use business::domain::shared::pagination::{Page, PageMeta};

/// Converts a JSON number into a decimal price; `None` for NaN or infinities.
///
/// Goes through the shortest round-trip representation so `19.99` stays `19.99`.
pub fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}

#[derive(Debug, Clone, Object)]
pub struct CreateProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Unit price (cannot be negative)
    pub price: f64,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateProductRequest {
    /// Accepted for compatibility and ignored; the path id is authoritative
    #[oai(skip_serializing_if_is_none)]
    pub id: Option<i64>,
    /// New product name
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    /// New unit price
    #[oai(skip_serializing_if_is_none)]
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    /// Builds the domain patch, dropping any `id` in the body.
    ///
    /// Returns `None` when `price` is not a finite number.
    pub fn into_patch(self) -> Option<ProductPatch> {
        let price = match self.price {
            Some(value) => Some(decimal_from_f64(value)?),
            None => None,
        };
        Some(ProductPatch {
            name: self.name,
            price,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct ValidateProductsRequest {
    /// Product ids to check; duplicates are allowed
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product identifier
    pub id: i64,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// False once the product has been removed
    pub available: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price.to_f64().unwrap_or_default(),
            available: product.available,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct PageMetaResponse {
    /// Number of available products
    pub total: u64,
    /// Requested page
    pub page: u64,
    /// Last page holding data for the requested limit
    #[oai(rename = "lastPage")]
    pub last_page: u64,
}

impl From<PageMeta> for PageMetaResponse {
    fn from(meta: PageMeta) -> Self {
        Self {
            total: meta.total,
            page: meta.page,
            last_page: meta.last_page,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductPageResponse {
    pub data: Vec<ProductResponse>,
    pub meta: PageMetaResponse,
}

impl From<Page<Product>> for ProductPageResponse {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(ProductResponse::from);
        Self {
            data: page.data,
            meta: page.meta.into(),
        }
    }
}
