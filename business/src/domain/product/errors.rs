use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    NameEmpty,
    #[error("Product price cannot be negative")]
    NegativePrice,
    #[error("Product price must have at most 2 decimal places and be below 10000000000")]
    PriceOutOfRange,
    #[error("Product with id {0} not found")]
    NotFound(i64),
    #[error("Some products were not found")]
    ValidationFailed,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    /// HTTP-style status carried across the RPC boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::NameEmpty
            | ProductError::NegativePrice
            | ProductError::PriceOutOfRange => 400,
            ProductError::ValidationFailed => 400,
            ProductError::NotFound(_) => 404,
            ProductError::Repository(_) => 500,
        }
    }

    /// Maps a repository lookup failure for `id`, turning a missing row into `NotFound`.
    pub fn from_lookup(id: i64, error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ProductError::NotFound(id),
            other => ProductError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_missing_row_to_not_found_with_id() {
        let error = ProductError::from_lookup(42, RepositoryError::NotFound);

        assert!(matches!(error, ProductError::NotFound(42)));
        assert_eq!(error.status_code(), 404);
        assert_eq!(error.to_string(), "Product with id 42 not found");
    }

    #[test]
    fn should_keep_store_failures_as_repository_errors() {
        let error = ProductError::from_lookup(7, RepositoryError::DatabaseError);

        assert!(matches!(
            error,
            ProductError::Repository(RepositoryError::DatabaseError)
        ));
        assert_eq!(error.status_code(), 500);
    }

    #[test]
    fn should_report_validation_failure_as_bad_request() {
        let error = ProductError::ValidationFailed;

        assert_eq!(error.status_code(), 400);
        assert_eq!(error.to_string(), "Some products were not found");
    }
}
