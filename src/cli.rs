// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::ats::{calculate_score, ScoreBand};
use crate::config::ConfigManager;
use crate::enhance::{EnhanceKind, EnhancementService, TextEnhancer};
use crate::preview::render_text;
use crate::types::{Priority, ScoreReport};
use crate::utils::{read_resume_file, write_resume_file};
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Resume builder with ATS compatibility scoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the web API
    Serve {
        /// Keep users and resumes in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },
    /// Score a resume JSON file
    Score {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render a resume JSON file as plain text
    Preview { file: PathBuf },
    /// Generate improved text for the summary, an experience or a project
    Enhance {
        file: PathBuf,
        #[arg(long, value_enum)]
        kind: EnhanceKind,
        /// Entry index for experience and project enhancement
        #[arg(long)]
        index: Option<usize>,
        /// Write the generated text back into the file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { memory } => {
            let config = ConfigManager::load()?;
            start_web_server(config, memory).await
        }

        Command::Score { file, format } => {
            let data = read_resume_file(&file).await?;
            let report = calculate_score(&data);
            info!("Scored {}: {}", file.display(), report.overall_score);

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print!("{}", render_text_report(&report)),
            }
            Ok(())
        }

        Command::Preview { file } => {
            let data = read_resume_file(&file).await?;
            print!("{}", render_text(&data));
            Ok(())
        }

        Command::Enhance {
            file,
            kind,
            index,
            write,
        } => {
            let config = ConfigManager::load()?;
            let enhancer = EnhancementService::from_config(&config.enhance)?;

            let mut data = read_resume_file(&file).await?;
            let text = enhancer.enhance(kind, &data, index).await?;
            println!("{}", text);

            if write {
                data.apply_enhancement(kind, index, text)?;
                write_resume_file(&file, &data).await?;
                info!("Updated {}", file.display());
            }
            Ok(())
        }
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "CRITICAL",
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

/// Human-readable score report for the terminal
pub fn render_text_report(report: &ScoreReport) -> String {
    let band = ScoreBand::from_score(report.overall_score);
    let mut out = format!(
        "ATS Score: {}/100 ({})\n{}\n",
        report.overall_score,
        band.label(),
        band.description()
    );

    out.push_str("\nCategories:\n");
    for category in report.categories.iter() {
        out.push_str(&format!(
            "  {:<12}{:>4}  (weight {}%)\n",
            category.category.key(),
            category.score,
            category.weight
        ));
        for check in &category.checks {
            out.push_str(&format!("    - {}: {}\n", check.name, check.score));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                priority_label(rec.priority),
                rec.category,
                rec.suggestion
            ));
        }
    }

    out
}
