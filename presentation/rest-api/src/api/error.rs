use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body forwarded verbatim to the remote caller.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// HTTP-style status code
    pub status: u16,
    pub name: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            name: "ValidationError".to_string(),
            message: message.into(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
