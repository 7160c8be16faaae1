// src/enhance/client.rs
//! HTTP client for an external messages API used for enhancement

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{error, info};

use super::{EnhanceKind, TextEnhancer};
use crate::config::EnhanceConfig;
use crate::types::response::{ChatMessage, MessagesRequest, MessagesResponse};
use crate::types::ResumeData;

pub struct MessagesClient {
    client: Client,
    api_url: String,
    api_key: String,
    api_version: String,
    model: String,
    max_tokens: u32,
}

impl MessagesClient {
    pub fn new(config: &EnhanceConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Build the prompt for `kind`; the index must already be validated
    pub fn build_prompt(
        kind: EnhanceKind,
        data: &ResumeData,
        index: Option<usize>,
    ) -> Result<String> {
        let prompt = match kind {
            EnhanceKind::Summary => {
                let title = if data.personal.title.is_empty() {
                    "professional"
                } else {
                    data.personal.title.as_str()
                };
                let background =
                    serde_json::to_string(data).context("Failed to serialize resume data")?;
                format!(
                    "Write a compelling professional summary for a {} with the following background: {}. \
                     Keep it to 2-3 sentences, impactful and ATS-friendly.",
                    title, background
                )
            }
            EnhanceKind::Experience => {
                let exp = index
                    .and_then(|i| data.experience.get(i))
                    .ok_or_else(|| anyhow::anyhow!("Invalid experience index"))?;
                format!(
                    "Enhance this job description for {} at {}: \"{}\". Make it achievement-focused \
                     with metrics, use strong action verbs, and keep it to 3-4 bullet points.",
                    exp.position, exp.company, exp.description
                )
            }
            EnhanceKind::Project => {
                let project = index
                    .and_then(|i| data.projects.get(i))
                    .ok_or_else(|| anyhow::anyhow!("Invalid project index"))?;
                format!(
                    "Enhance this project description: \"{}\". Make it impressive, technical, and \
                     highlight impact. Keep it to 2-3 sentences.",
                    project.description
                )
            }
        };
        Ok(prompt)
    }

    pub async fn send_message(&self, prompt: String) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        info!("Sending enhancement request to {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to messages API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Messages API error {}: {}", status, error_text);
            anyhow::bail!("API Error: {}", status);
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse messages API response")?;

        messages_response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Messages API returned no content"))
    }
}

#[rocket::async_trait]
impl TextEnhancer for MessagesClient {
    async fn enhance(
        &self,
        kind: EnhanceKind,
        data: &ResumeData,
        index: Option<usize>,
    ) -> Result<String> {
        let prompt = Self::build_prompt(kind, data, index)?;
        self.send_message(prompt).await
    }
}
