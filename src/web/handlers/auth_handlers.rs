// src/web/handlers/auth_handlers.rs

use crate::auth::{AuthError, AuthService, LoggedInUser};
use crate::store::SessionUser;
use crate::web::handlers::{api_error, ApiError};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

fn auth_failure(e: anyhow::Error, conversation_id: Option<String>) -> ApiError {
    match e.downcast_ref::<AuthError>() {
        Some(AuthError::InvalidCredentials) => api_error(
            Status::Unauthorized,
            AuthError::InvalidCredentials.message(),
            AuthError::InvalidCredentials.code(),
            &["Check your email and password"],
            conversation_id,
        ),
        Some(AuthError::EmailAlreadyRegistered) => api_error(
            Status::Conflict,
            AuthError::EmailAlreadyRegistered.message(),
            AuthError::EmailAlreadyRegistered.code(),
            &["Log in with the existing account instead"],
            conversation_id,
        ),
        _ => {
            error!("Session store failure: {:#}", e);
            api_error(
                Status::InternalServerError,
                "Failed to update session",
                "SESSION_ERROR",
                &["Try again in a few moments"],
                conversation_id,
            )
        }
    }
}

pub async fn login_handler(
    request: Json<StandardRequest<LoginRequest>>,
    auth: &State<AuthService>,
) -> Result<Json<DataResponse<SessionUser>>, ApiError> {
    let conversation_id = request.conversation_id();

    match auth.login(&request.data.email, &request.data.password).await {
        Ok(user) => Ok(Json(DataResponse::success(
            format!("Welcome back, {}", user.name),
            user,
            conversation_id,
        ))),
        Err(e) => Err(auth_failure(e, conversation_id)),
    }
}

pub async fn signup_handler(
    request: Json<StandardRequest<SignupRequest>>,
    auth: &State<AuthService>,
) -> Result<Json<DataResponse<SessionUser>>, ApiError> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    if data.name.trim().is_empty() || data.email.trim().is_empty() || data.password.is_empty() {
        return Err(api_error(
            Status::BadRequest,
            "Name, email and password are required",
            "MISSING_FIELDS",
            &["Fill in every signup field"],
            conversation_id,
        ));
    }

    match auth.signup(&data.name, &data.email, &data.password).await {
        Ok(user) => Ok(Json(DataResponse::success(
            format!("Account created for {}", user.email),
            user,
            conversation_id,
        ))),
        Err(e) => Err(auth_failure(e, conversation_id)),
    }
}

pub async fn logout_handler(auth: &State<AuthService>) -> Result<Json<ActionResponse>, ApiError> {
    auth.logout().await.map_err(|e| auth_failure(e, None))?;

    Ok(Json(
        ActionResponse::success("Logged out".to_string(), "logout".to_string(), None)
            .with_next_actions(vec!["login".to_string(), "signup".to_string()]),
    ))
}

pub async fn current_user_handler(user: LoggedInUser) -> Json<DataResponse<SessionUser>> {
    let LoggedInUser(user) = user;
    Json(DataResponse::success(
        format!("Logged in as {}", user.email),
        user,
        None,
    ))
}
