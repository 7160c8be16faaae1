// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

use crate::types::ResumeData;

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(path: &Path, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(path)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", path.display()))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

pub async fn read_file_safe(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Load a resume from a JSON file; missing fields default to empty
pub async fn read_resume_file(path: &Path) -> Result<ResumeData> {
    validate_file_extension(path, &["json"])?;
    let content = read_file_safe(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid resume JSON: {}", path.display()))
}

pub async fn write_resume_file(path: &Path, data: &ResumeData) -> Result<()> {
    let content = serde_json::to_string_pretty(data).context("Failed to serialize resume")?;
    write_file_safe(path, &content).await
}
