// src/auth.rs
//! Demo login against the stored user list. Credentials are compared in
//! plaintext; this is a convenience gate for a local tool, not security.

use anyhow::Result;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::store::{SessionStore, SessionUser, UserAccount};

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    EmailAlreadyRegistered,
    NotLoggedIn,
    SessionUnavailable,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password",
            AuthError::EmailAlreadyRegistered => "Email already registered",
            AuthError::NotLoggedIn => "Login required",
            AuthError::SessionUnavailable => "Session store unavailable",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AuthError::NotLoggedIn => "AUTHENTICATION_REQUIRED",
            AuthError::SessionUnavailable => "SESSION_ERROR",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

fn demo_users() -> Vec<UserAccount> {
    vec![
        UserAccount {
            id: 1,
            email: "demo@example.com".to_string(),
            password: "demo123".to_string(),
            name: "Demo User".to_string(),
        },
        UserAccount {
            id: 2,
            email: "test@example.com".to_string(),
            password: "test123".to_string(),
            name: "Test User".to_string(),
        },
    ]
}

pub struct AuthService {
    sessions: Arc<dyn SessionStore>,
    // Serializes read-modify-write of the user list
    users_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions,
            users_lock: Mutex::new(()),
        }
    }

    /// Seed the demo accounts when no user list exists yet
    pub async fn initialize_users(&self) -> Result<()> {
        let _guard = self.users_lock.lock().await;
        self.seed_if_missing().await
    }

    // Caller must hold `users_lock`
    async fn seed_if_missing(&self) -> Result<()> {
        if self.sessions.users().await?.is_none() {
            self.sessions.save_users(&demo_users()).await?;
            info!("Seeded demo users");
        }
        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<UserAccount>> {
        self.initialize_users().await?;
        Ok(self.sessions.users().await?.unwrap_or_default())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        let users = self.load_users().await?;
        let account = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| {
                warn!("Failed login for {}", email);
                AuthError::InvalidCredentials
            })?;

        let user = SessionUser::from(account);
        self.sessions.set_current_user(&user).await?;
        info!("User {} logged in", user.email);
        Ok(user)
    }

    /// Register a new account and log it in
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<SessionUser> {
        let _guard = self.users_lock.lock().await;
        self.seed_if_missing().await?;
        let mut users = self.sessions.users().await?.unwrap_or_default();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let account = UserAccount {
            id,
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let user = SessionUser::from(&account);

        users.push(account);
        self.sessions.save_users(&users).await?;
        self.sessions.set_current_user(&user).await?;

        info!("Registered user {} with id {}", user.email, user.id);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear_current_user().await
    }

    pub async fn current_user(&self) -> Result<Option<SessionUser>> {
        self.sessions.current_user().await
    }
}

// ===== Request Guards =====

/// The user currently logged in; fails with 401 otherwise
pub struct LoggedInUser(pub SessionUser);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for LoggedInUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = match req.guard::<&State<AuthService>>().await {
            Outcome::Success(auth) => auth,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::SessionUnavailable))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        match auth.current_user().await {
            Ok(Some(user)) => Outcome::Success(LoggedInUser(user)),
            Ok(None) => {
                warn!("Request to {} without a logged-in user", req.uri());
                Outcome::Error((Status::Unauthorized, AuthError::NotLoggedIn))
            }
            Err(e) => {
                error!("Failed to read current user: {:#}", e);
                Outcome::Error((Status::InternalServerError, AuthError::SessionUnavailable))
            }
        }
    }
}

pub struct OptionalUser {
    pub user: Option<SessionUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalUser {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match LoggedInUser::from_request(req).await {
            Outcome::Success(LoggedInUser(user)) => Outcome::Success(OptionalUser { user: Some(user) }),
            _ => Outcome::Success(OptionalUser { user: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KvRepository, MemoryStore};

    fn service() -> AuthService {
        AuthService::new(Arc::new(KvRepository::new(Arc::new(MemoryStore::new()))))
    }

    #[tokio::test]
    async fn test_demo_login() {
        let auth = service();
        assert_eq!(auth.current_user().await.unwrap(), None);

        let user = auth.login("demo@example.com", "demo123").await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Demo User");
        assert!(auth.current_user().await.unwrap().is_some());

        auth.logout().await.unwrap();
        assert_eq!(auth.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let auth = service();
        let err = auth.login("demo@example.com", "nope").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::InvalidCredentials)
        ));
        assert_eq!(auth.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_signup_assigns_next_id_and_logs_in() {
        let auth = service();
        let user = auth
            .signup("Jane Doe", "jane@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(auth.current_user().await.unwrap().map(|u| u.id), Some(3));

        auth.logout().await.unwrap();
        assert_eq!(
            auth.login("jane@example.com", "secret").await.unwrap().id,
            3
        );
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let auth = service();
        let err = auth
            .signup("Someone", "test@example.com", "x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_users() {
        let repo = Arc::new(KvRepository::new(Arc::new(MemoryStore::new())));
        repo.save_users(&[]).await.unwrap();

        let auth = AuthService::new(repo.clone());
        auth.initialize_users().await.unwrap();

        assert_eq!(repo.users().await.unwrap(), Some(Vec::new()));
        let user = auth.signup("First", "first@example.com", "pw").await.unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_keep_every_account() {
        let repo = Arc::new(KvRepository::new(Arc::new(MemoryStore::new())));
        let auth = Arc::new(AuthService::new(repo.clone()));

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let auth = auth.clone();
                tokio::spawn(async move {
                    auth.signup("User", &format!("user{}@example.com", i), "pw")
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let users = repo.users().await.unwrap().unwrap();
        assert_eq!(users.len(), 52);
        let ids: std::collections::HashSet<u64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), 52);
    }
}
