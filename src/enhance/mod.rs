// src/enhance/mod.rs
//! Free-text enhancement of summary, experience and project descriptions

pub mod client;
pub mod templates;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EnhanceConfig;
use crate::types::ResumeData;

pub use client::MessagesClient;
pub use templates::{generate_enhanced_text, TemplateEnhancer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceKind {
    Summary,
    Experience,
    Project,
}

#[rocket::async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn enhance(
        &self,
        kind: EnhanceKind,
        data: &ResumeData,
        index: Option<usize>,
    ) -> Result<String>;
}

/// Ensure the entry targeted by an experience or project enhancement exists
pub fn validate_target(kind: EnhanceKind, data: &ResumeData, index: Option<usize>) -> Result<()> {
    match kind {
        EnhanceKind::Summary => Ok(()),
        EnhanceKind::Experience => match index {
            Some(i) if i < data.experience.len() => Ok(()),
            _ => anyhow::bail!("Invalid experience index"),
        },
        EnhanceKind::Project => match index {
            Some(i) if i < data.projects.len() => Ok(()),
            _ => anyhow::bail!("Invalid project index"),
        },
    }
}

/// Remote enhancement when configured, templates otherwise and on remote failure
pub struct EnhancementService {
    templates: TemplateEnhancer,
    remote: Option<Box<dyn TextEnhancer>>,
}

impl EnhancementService {
    pub fn new(templates: TemplateEnhancer) -> Self {
        Self {
            templates,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Box<dyn TextEnhancer>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Uses the messages API only for keys that look like real API keys
    pub fn from_config(config: &EnhanceConfig) -> Result<Self> {
        let service = Self::new(TemplateEnhancer::new());

        match config.api_key.as_deref() {
            Some(key) if key.starts_with("sk-") => {
                info!("Enhancement via messages API ({})", config.model);
                let client = MessagesClient::new(config, key.to_string())?;
                Ok(service.with_remote(Box::new(client)))
            }
            _ => {
                info!("Enhancement via built-in templates");
                Ok(service)
            }
        }
    }

    pub fn uses_remote(&self) -> bool {
        self.remote.is_some()
    }
}

#[rocket::async_trait]
impl TextEnhancer for EnhancementService {
    async fn enhance(
        &self,
        kind: EnhanceKind,
        data: &ResumeData,
        index: Option<usize>,
    ) -> Result<String> {
        validate_target(kind, data, index)?;

        if let Some(remote) = &self.remote {
            match remote.enhance(kind, data, index).await {
                Ok(text) => return Ok(text),
                Err(e) => warn!("Remote enhancement failed, using templates: {:#}", e),
            }
        }

        self.templates.enhance(kind, data, index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRemote;

    #[rocket::async_trait]
    impl TextEnhancer for FailingRemote {
        async fn enhance(&self, _: EnhanceKind, _: &ResumeData, _: Option<usize>) -> Result<String> {
            anyhow::bail!("API Error: 503 Service Unavailable")
        }
    }

    struct FixedRemote;

    #[rocket::async_trait]
    impl TextEnhancer for FixedRemote {
        async fn enhance(&self, _: EnhanceKind, _: &ResumeData, _: Option<usize>) -> Result<String> {
            Ok("remote text".to_string())
        }
    }

    #[test]
    fn test_validate_target() {
        let mut data = ResumeData::default();
        assert!(validate_target(EnhanceKind::Summary, &data, None).is_ok());
        assert!(validate_target(EnhanceKind::Experience, &data, Some(0)).is_err());
        assert!(validate_target(EnhanceKind::Project, &data, None).is_err());

        data.add_experience();
        assert!(validate_target(EnhanceKind::Experience, &data, Some(0)).is_ok());
    }

    #[tokio::test]
    async fn test_remote_text_is_used() {
        let service = EnhancementService::new(TemplateEnhancer::with_seed(1))
            .with_remote(Box::new(FixedRemote));
        let text = service
            .enhance(EnhanceKind::Summary, &ResumeData::default(), None)
            .await
            .unwrap();
        assert_eq!(text, "remote text");
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_templates() {
        let service = EnhancementService::new(TemplateEnhancer::with_seed(1))
            .with_remote(Box::new(FailingRemote));
        let text = service
            .enhance(EnhanceKind::Summary, &ResumeData::default(), None)
            .await
            .unwrap();
        assert!(text.contains("with proven expertise in technical expertise."));
    }

    #[tokio::test]
    async fn test_without_remote_uses_template_enhancer() {
        let mut data = ResumeData::default();
        data.skills = vec!["Rust".to_string(), "SQL".to_string()];
        data.projects.push(Default::default());

        let service = EnhancementService::new(TemplateEnhancer::with_seed(9));
        let text = service
            .enhance(EnhanceKind::Project, &data, Some(0))
            .await
            .unwrap();
        assert_eq!(
            text,
            TemplateEnhancer::with_seed(9).generate(EnhanceKind::Project, &data)
        );
    }

    #[tokio::test]
    async fn test_invalid_index_is_an_error() {
        let service = EnhancementService::new(TemplateEnhancer::with_seed(1));
        let err = service
            .enhance(EnhanceKind::Project, &ResumeData::default(), Some(2))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid project index");
    }

    #[test]
    fn test_from_config_requires_sk_key() {
        let mut config = EnhanceConfig::default();
        assert!(!EnhancementService::from_config(&config).unwrap().uses_remote());

        config.api_key = Some("not-a-key".to_string());
        assert!(!EnhancementService::from_config(&config).unwrap().uses_remote());

        config.api_key = Some("sk-test".to_string());
        assert!(EnhancementService::from_config(&config).unwrap().uses_remote());
    }
}
