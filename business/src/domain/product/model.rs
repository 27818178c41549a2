use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Signed;

use super::errors::ProductError;

/// Decimal places kept by the `NUMERIC(12, 2)` price column.
pub const PRICE_SCALE: i64 = 2;
/// Integer digits kept by the price column, i.e. prices stay below `10^10`.
pub const PRICE_INTEGER_DIGITS: u32 = 10;

/// Rejects prices the store would round or overflow on.
pub fn validate_price(price: &BigDecimal) -> Result<(), ProductError> {
    if price.is_negative() {
        return Err(ProductError::NegativePrice);
    }

    let (_, scale) = price.normalized().as_bigint_and_exponent();
    if scale > PRICE_SCALE || *price >= BigDecimal::from(10i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(ProductError::PriceOutOfRange);
    }

    Ok(())
}

/// A sellable catalog product.
///
/// `available = false` marks the product as soft-deleted: it stays stored but is
/// invisible to every read, update and delete path.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: BigDecimal,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: i64,
        name: String,
        price: BigDecimal,
        available: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            price,
            available,
            created_at,
            updated_at,
        }
    }
}

pub struct NewProductProps {
    pub name: String,
    pub price: BigDecimal,
}

/// A validated candidate row. The store assigns `id` and timestamps, and
/// always inserts it with `available = true`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: BigDecimal,
}

impl NewProduct {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        if props.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }

        validate_price(&props.price)?;

        Ok(Self {
            name: props.name,
            price: props.price,
        })
    }
}

/// Partial update of the mutable fields. Identity is never part of a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ProductError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ProductError::NameEmpty);
        }

        if let Some(price) = &self.price {
            validate_price(price)?;
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}
