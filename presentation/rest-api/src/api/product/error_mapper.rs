use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let name = match &self {
            ProductError::NameEmpty
            | ProductError::NegativePrice
            | ProductError::PriceOutOfRange => "ValidationError",
            ProductError::ValidationFailed => "ValidationFailed",
            ProductError::NotFound(_) => "NotFound",
            ProductError::Repository(_) => "InternalError",
        };

        (
            status,
            Json(ErrorResponse {
                status: status.as_u16(),
                name: name.to_string(),
                message: self.to_string(),
            }),
        )
    }
}
