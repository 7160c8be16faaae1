// src/web/handlers/resume_handlers.rs

use crate::auth::LoggedInUser;
use crate::store::ResumeStore;
use crate::types::ResumeData;
use crate::web::handlers::{api_error, ApiError};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::sync::Arc;
use tracing::{error, info};

fn storage_error(conversation_id: Option<String>) -> ApiError {
    api_error(
        Status::InternalServerError,
        "Resume storage unavailable",
        "STORAGE_ERROR",
        &["Try again in a few moments"],
        conversation_id,
    )
}

/// The logged-in user's resume, or an empty one if nothing was saved yet
pub async fn get_resume_handler(
    user: LoggedInUser,
    resumes: &State<Arc<dyn ResumeStore>>,
) -> Result<Json<DataResponse<ResumeData>>, ApiError> {
    let LoggedInUser(user) = user;

    let resume = resumes.load_resume(user.id).await.map_err(|e| {
        error!("Failed to load resume for user {}: {:#}", user.id, e);
        storage_error(None)
    })?;

    let message = if resume.is_some() {
        "Resume loaded"
    } else {
        "No saved resume, starting empty"
    };

    Ok(Json(DataResponse::success(
        message.to_string(),
        resume.unwrap_or_default(),
        None,
    )))
}

pub async fn save_resume_handler(
    request: Json<StandardRequest<ResumeData>>,
    user: LoggedInUser,
    resumes: &State<Arc<dyn ResumeStore>>,
) -> Result<Json<ActionResponse>, ApiError> {
    let LoggedInUser(user) = user;
    let conversation_id = request.conversation_id();

    if let Err(e) = resumes.save_resume(user.id, &request.data).await {
        error!("Failed to save resume for user {}: {:#}", user.id, e);
        return Err(storage_error(conversation_id));
    }

    info!("Saved resume for user {}", user.id);
    Ok(Json(
        ActionResponse::success(
            "Resume saved".to_string(),
            "resume_saved".to_string(),
            conversation_id,
        )
        .with_next_actions(vec!["score".to_string(), "preview".to_string()]),
    ))
}
