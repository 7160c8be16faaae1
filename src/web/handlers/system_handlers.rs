// src/web/handlers/system_handlers.rs

use crate::auth::OptionalUser;
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use tracing::info;

pub async fn health_handler(auth: OptionalUser) -> Json<TextResponse> {
    match auth.user {
        Some(user) => info!("Health check by logged-in user: {}", user.email),
        None => info!("Health check by anonymous user"),
    }
    Json(TextResponse::success("OK".to_string(), None))
}
