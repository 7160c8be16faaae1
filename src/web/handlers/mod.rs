pub mod auth_handlers;
pub mod resume_handlers;
pub mod score_handlers;
pub mod system_handlers;

pub use auth_handlers::*;
pub use resume_handlers::*;
pub use score_handlers::*;
pub use system_handlers::*;

use rocket::http::Status;
use rocket::serde::json::Json;

use crate::web::types::StandardErrorResponse;

/// Error envelope paired with the HTTP status it is sent with
pub type ApiError = (Status, Json<StandardErrorResponse>);

pub fn api_error(
    status: Status,
    error: &str,
    error_code: &str,
    suggestions: &[&str],
    conversation_id: Option<String>,
) -> ApiError {
    (
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            error_code.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
            conversation_id,
        )),
    )
}
