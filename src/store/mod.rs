// src/store/mod.rs
//! Key-value persistence for user sessions and resumes.
//!
//! Values are JSON blobs stored under the same keys the browser build kept in
//! local storage, so exported data stays interchangeable.

pub mod memory;
pub mod sqlite;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::ResumeData;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key of the logged-in user
pub const CURRENT_USER_KEY: &str = "ai-resume-builder-user";
/// Key of the registered user list
pub const USERS_KEY: &str = "ai-resume-builder-users";

pub fn resume_key(user_id: u64) -> String {
    format!("resume-{}", user_id)
}

#[rocket::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Registered account. Passwords are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Logged-in user as exposed to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl From<&UserAccount> for SessionUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            logged_in_at: Some(Utc::now()),
        }
    }
}

#[rocket::async_trait]
pub trait SessionStore: Send + Sync {
    /// `None` when the user list was never initialized
    async fn users(&self) -> Result<Option<Vec<UserAccount>>>;
    async fn save_users(&self, users: &[UserAccount]) -> Result<()>;
    async fn current_user(&self) -> Result<Option<SessionUser>>;
    async fn set_current_user(&self, user: &SessionUser) -> Result<()>;
    async fn clear_current_user(&self) -> Result<()>;
}

#[rocket::async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load_resume(&self, user_id: u64) -> Result<Option<ResumeData>>;
    async fn save_resume(&self, user_id: u64, resume: &ResumeData) -> Result<()>;
}

/// Session and resume repositories over any key-value backend
#[derive(Clone)]
pub struct KvRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv.get(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value stored under {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for {}", key))?;
        self.kv.set(key, &raw).await
    }
}

#[rocket::async_trait]
impl SessionStore for KvRepository {
    async fn users(&self) -> Result<Option<Vec<UserAccount>>> {
        self.get_json(USERS_KEY).await
    }

    async fn save_users(&self, users: &[UserAccount]) -> Result<()> {
        self.set_json(USERS_KEY, users).await
    }

    async fn current_user(&self) -> Result<Option<SessionUser>> {
        self.get_json(CURRENT_USER_KEY).await
    }

    async fn set_current_user(&self, user: &SessionUser) -> Result<()> {
        self.set_json(CURRENT_USER_KEY, user).await
    }

    async fn clear_current_user(&self) -> Result<()> {
        self.kv.remove(CURRENT_USER_KEY).await
    }
}

#[rocket::async_trait]
impl ResumeStore for KvRepository {
    async fn load_resume(&self, user_id: u64) -> Result<Option<ResumeData>> {
        self.get_json(&resume_key(user_id)).await
    }

    async fn save_resume(&self, user_id: u64, resume: &ResumeData) -> Result<()> {
        self.set_json(&resume_key(user_id), resume).await
    }
}
