// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{AuthService, LoggedInUser, OptionalUser};
use crate::config::ConfigManager;
use crate::enhance::EnhancementService;
use crate::store::{KeyValueStore, KvRepository, MemoryStore, ResumeStore, SessionUser, SqliteStore};
use crate::types::ResumeData;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// ===== Routes =====

#[post("/score", data = "<request>")]
pub async fn score_resume(
    request: Json<StandardRequest<ResumeData>>,
) -> Json<DataResponse<ScoreData>> {
    handlers::score_resume_handler(request).await
}

#[post("/enhance", data = "<request>")]
pub async fn enhance(
    request: Json<StandardRequest<EnhanceRequest>>,
    enhancer: &State<EnhancementService>,
) -> Result<Json<DataResponse<TextData>>, ApiError> {
    handlers::enhance_handler(request, enhancer).await
}

#[post("/preview", data = "<request>")]
pub async fn preview(request: Json<StandardRequest<ResumeData>>) -> Json<DataResponse<TextData>> {
    handlers::preview_handler(request).await
}

#[post("/auth/login", data = "<request>")]
pub async fn login(
    request: Json<StandardRequest<LoginRequest>>,
    auth: &State<AuthService>,
) -> Result<Json<DataResponse<SessionUser>>, ApiError> {
    handlers::login_handler(request, auth).await
}

#[post("/auth/signup", data = "<request>")]
pub async fn signup(
    request: Json<StandardRequest<SignupRequest>>,
    auth: &State<AuthService>,
) -> Result<Json<DataResponse<SessionUser>>, ApiError> {
    handlers::signup_handler(request, auth).await
}

#[post("/auth/logout")]
pub async fn logout(auth: &State<AuthService>) -> Result<Json<ActionResponse>, ApiError> {
    handlers::logout_handler(auth).await
}

#[get("/auth/me")]
pub async fn current_user(user: LoggedInUser) -> Json<DataResponse<SessionUser>> {
    handlers::current_user_handler(user).await
}

#[get("/resume")]
pub async fn get_resume(
    user: LoggedInUser,
    resumes: &State<Arc<dyn ResumeStore>>,
) -> Result<Json<DataResponse<ResumeData>>, ApiError> {
    handlers::get_resume_handler(user, resumes).await
}

#[put("/resume", data = "<request>")]
pub async fn save_resume(
    request: Json<StandardRequest<ResumeData>>,
    user: LoggedInUser,
    resumes: &State<Arc<dyn ResumeStore>>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::save_resume_handler(request, user, resumes).await
}

#[get("/health")]
pub async fn health(auth: OptionalUser) -> Json<TextResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// ===== Error catchers =====

fn catcher_error(error: &str, code: &str, suggestions: &[&str]) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        error.to_string(),
        code.to_string(),
        suggestions.iter().map(|s| s.to_string()).collect(),
        None,
    ))
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    catcher_error(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    )
}

#[rocket::catch(401)]
pub fn unauthorized() -> Json<StandardErrorResponse> {
    catcher_error(
        "Login required",
        "AUTHENTICATION_REQUIRED",
        &["Log in via /api/auth/login", "Create an account via /api/auth/signup"],
    )
}

#[rocket::catch(404)]
pub fn not_found(req: &Request) -> Json<StandardErrorResponse> {
    catcher_error(
        &format!("No endpoint at {}", req.uri()),
        "NOT_FOUND",
        &["Check the endpoint path and method"],
    )
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    catcher_error(
        "Request body does not match the expected shape",
        "INVALID_BODY",
        &["Verify field names and value types"],
    )
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    catcher_error(
        "Internal server error",
        "INTERNAL_ERROR",
        &[
            "Try again in a few moments",
            "Contact support if the problem persists",
        ],
    )
}

// ===== Server =====

/// Services shared by every request
pub struct WebState {
    pub enhancer: EnhancementService,
    pub auth: AuthService,
    pub resumes: Arc<dyn ResumeStore>,
}

impl WebState {
    /// Auth and resume storage over a single key-value backend
    pub fn new(kv: Arc<dyn KeyValueStore>, enhancer: EnhancementService) -> Self {
        let repository = KvRepository::new(kv);
        Self {
            enhancer,
            auth: AuthService::new(Arc::new(repository.clone())),
            resumes: Arc::new(repository),
        }
    }
}

pub fn mount_api(rocket: Rocket<Build>, state: WebState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state.enhancer)
        .manage(state.auth)
        .manage(state.resumes)
        .register(
            "/api",
            catchers![bad_request, unauthorized, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                score_resume,
                enhance,
                preview,
                login,
                signup,
                logout,
                current_user,
                get_resume,
                save_resume,
                health,
                options,
            ],
        )
}

pub fn build_rocket(state: WebState) -> Rocket<Build> {
    mount_api(rocket::build(), state)
}

pub async fn start_web_server(config: ConfigManager, in_memory: bool) -> Result<()> {
    let kv: Arc<dyn KeyValueStore> = if in_memory {
        info!("Using in-memory storage; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let store = SqliteStore::new(&config.environment.database_path).await?;
        store.health_check().await?;
        info!("Database: {}", config.environment.database_path.display());
        Arc::new(store)
    };

    let enhancer = EnhancementService::from_config(&config.enhance)?;
    let state = WebState::new(kv, enhancer);
    state.auth.initialize_users().await?;

    let figment = rocket::Config::figment()
        .merge(("address", config.environment.address.clone()))
        .merge(("port", config.environment.port));

    info!(
        "Starting resume builder API on {}:{} ({})",
        config.environment.address, config.environment.port, config.environment_name
    );

    let _rocket = mount_api(rocket::custom(figment), state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::TemplateEnhancer;
    use rocket::http::ContentType;
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};

    fn client() -> Client {
        let state = WebState::new(
            Arc::new(MemoryStore::new()),
            EnhancementService::new(TemplateEnhancer::with_seed(7)),
        );
        Client::tracked(build_rocket(state)).unwrap()
    }

    fn post_json(client: &Client, uri: &str, body: Value) -> (Status, Value) {
        let response = client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = response.status();
        (status, response.into_json().unwrap())
    }

    fn get_json(client: &Client, uri: &str) -> (Status, Value) {
        let response = client.get(uri.to_string()).dispatch();
        let status = response.status();
        (status, response.into_json().unwrap())
    }

    #[test]
    fn test_health() {
        let client = client();
        let (status, body) = get_json(&client, "/api/health");
        assert_eq!(status, Status::Ok);
        assert_eq!(body["type"], "text");
        assert_eq!(body["message"], "OK");
    }

    #[test]
    fn test_score_empty_resume() {
        let client = client();
        let (status, body) = post_json(
            &client,
            "/api/score",
            json!({ "conversation_id": "abc-123" }),
        );

        assert_eq!(status, Status::Ok);
        assert_eq!(body["type"], "data");
        assert_eq!(body["conversation_id"], "abc-123");
        assert_eq!(body["data"]["overallScore"], 38);
        assert_eq!(body["data"]["band"], "needs_work");
        assert_eq!(body["data"]["categories"]["formatting"]["score"], 100);
        assert_eq!(body["data"]["categories"]["length"]["score"], 28);
        assert_eq!(body["data"]["recommendations"].as_array().unwrap().len(), 6);
        assert_eq!(body["display_format"]["sections"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_malformed_body_uses_error_envelope() {
        let client = client();
        let response = client
            .post("/api/score")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["type"], "error");
        assert_eq!(body["error_code"], "BAD_REQUEST");
    }

    #[test]
    fn test_preview() {
        let client = client();
        let (status, body) = post_json(
            &client,
            "/api/preview",
            json!({ "personal": { "fullName": "Ada Lovelace" } }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(body["data"]["text"], "Ada Lovelace\nProfessional Title\n");
    }

    #[test]
    fn test_enhance() {
        let client = client();
        let (status, body) = post_json(&client, "/api/enhance", json!({ "kind": "summary" }));
        assert_eq!(status, Status::Ok);
        assert!(!body["data"]["text"].as_str().unwrap().is_empty());

        let (status, body) = post_json(
            &client,
            "/api/enhance",
            json!({ "kind": "experience", "index": 3 }),
        );
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error_code"], "INVALID_TARGET");
        assert_eq!(body["error"], "Invalid experience index");
    }

    #[test]
    fn test_resume_requires_login() {
        let client = client();
        let (status, body) = get_json(&client, "/api/resume");
        assert_eq!(status, Status::Unauthorized);
        assert_eq!(body["error_code"], "AUTHENTICATION_REQUIRED");

        let (status, _) = get_json(&client, "/api/auth/me");
        assert_eq!(status, Status::Unauthorized);
    }

    #[test]
    fn test_login_save_and_load_resume() {
        let client = client();

        let (status, body) = post_json(
            &client,
            "/api/auth/login",
            json!({ "email": "demo@example.com", "password": "wrong" }),
        );
        assert_eq!(status, Status::Unauthorized);
        assert_eq!(body["error_code"], "INVALID_CREDENTIALS");

        let (status, body) = post_json(
            &client,
            "/api/auth/login",
            json!({ "email": "demo@example.com", "password": "demo123" }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(body["data"]["id"], 1);

        let (_, body) = get_json(&client, "/api/resume");
        assert_eq!(body["data"]["personal"]["fullName"], "");

        let response = client
            .put("/api/resume")
            .header(ContentType::JSON)
            .body(json!({ "personal": { "fullName": "Demo" }, "skills": ["Rust"] }).to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let (_, body) = get_json(&client, "/api/resume");
        assert_eq!(body["data"]["personal"]["fullName"], "Demo");
        assert_eq!(body["data"]["skills"], json!(["Rust"]));

        let response = client.post("/api/auth/logout").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let (status, _) = get_json(&client, "/api/auth/me");
        assert_eq!(status, Status::Unauthorized);
    }

    #[test]
    fn test_signup_conflict() {
        let client = client();
        let (status, body) = post_json(
            &client,
            "/api/auth/signup",
            json!({ "name": "New", "email": "new@example.com", "password": "pw" }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(body["data"]["id"], 3);

        let (status, body) = post_json(
            &client,
            "/api/auth/signup",
            json!({ "name": "Again", "email": "new@example.com", "password": "pw" }),
        );
        assert_eq!(status, Status::Conflict);
        assert_eq!(body["error_code"], "EMAIL_ALREADY_REGISTERED");
    }
}
