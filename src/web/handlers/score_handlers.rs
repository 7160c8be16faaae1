// src/web/handlers/score_handlers.rs

use crate::ats::calculate_score;
use crate::enhance::{EnhancementService, TextEnhancer};
use crate::preview::render_text;
use crate::types::{Priority, ResumeData, ScoreReport};
use crate::web::handlers::{api_error, ApiError};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, info_span, warn};

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "critical",
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

/// One section per category plus the recommendation list
fn score_sections(report: &ScoreReport) -> DisplayFormat {
    let mut sections: Vec<DisplaySection> = report
        .categories
        .iter()
        .map(|category| DisplaySection {
            title: category.category.key().to_string(),
            content: format!("Weight {}%", category.weight),
            score: Some(format!("{}/100", category.score)),
            points: Some(
                category
                    .checks
                    .iter()
                    .map(|check| format!("{}: {}", check.name, check.score))
                    .collect(),
            ),
        })
        .collect();

    if !report.recommendations.is_empty() {
        sections.push(DisplaySection {
            title: "recommendations".to_string(),
            content: format!("{} suggestions", report.recommendations.len()),
            score: None,
            points: Some(
                report
                    .recommendations
                    .iter()
                    .map(|r| {
                        format!("[{}] {}: {}", priority_tag(r.priority), r.category, r.suggestion)
                    })
                    .collect(),
            ),
        });
    }

    DisplayFormat {
        format_type: "sections".to_string(),
        sections: Some(sections),
    }
}

pub async fn score_resume_handler(
    request: Json<StandardRequest<ResumeData>>,
) -> Json<DataResponse<ScoreData>> {
    let conversation_id = request.conversation_id();
    let request = request.into_inner();

    let span = info_span!("ats_score", name = %request.data.personal.full_name);
    let _enter = span.enter();

    let report = calculate_score(&request.data);
    info!(
        "Scored resume: {} ({} recommendations)",
        report.overall_score,
        report.recommendations.len()
    );

    let display_format = score_sections(&report);
    let data = ScoreData::from(report);
    let message = format!("ATS score {} ({})", data.report.overall_score, data.band_label);

    Json(DataResponse::success(message, data, conversation_id).with_display_format(display_format))
}

pub async fn enhance_handler(
    request: Json<StandardRequest<EnhanceRequest>>,
    enhancer: &State<EnhancementService>,
) -> Result<Json<DataResponse<TextData>>, ApiError> {
    let conversation_id = request.conversation_id();
    let request = request.into_inner().data;

    match enhancer
        .enhance(request.kind, &request.resume, request.index)
        .await
    {
        Ok(text) => {
            info!("Enhanced {:?} text ({} chars)", request.kind, text.len());
            Ok(Json(DataResponse::success(
                "Enhanced text generated".to_string(),
                TextData { text },
                conversation_id,
            )))
        }
        Err(e) => {
            warn!("Enhancement rejected: {}", e);
            Err(api_error(
                Status::BadRequest,
                &e.to_string(),
                "INVALID_TARGET",
                &[
                    "Pass the index of an existing experience or project entry",
                    "Summary enhancement needs no index",
                ],
                conversation_id,
            ))
        }
    }
}

pub async fn preview_handler(
    request: Json<StandardRequest<ResumeData>>,
) -> Json<DataResponse<TextData>> {
    let conversation_id = request.conversation_id();
    let text = render_text(&request.data);

    Json(DataResponse::success(
        "Preview rendered".to_string(),
        TextData { text },
        conversation_id,
    ))
}
