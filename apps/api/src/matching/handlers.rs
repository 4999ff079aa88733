//! Axum route handlers for the matching API.

use std::collections::HashMap;

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::matching::form::UPLOAD_FORM_HTML;
use crate::matching::normalizer::normalize;
use crate::matching::scorer::{score_normalized, similarity, SimilarityScore};
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

pub const MISSING_FILES_MESSAGE: &str = "Please upload both resume and job description files.";
pub const EMPTY_FILE_NAME_MESSAGE: &str = "Please select both resume and job description files.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub resume_text: String,
    pub job_description_text: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity_percentage: SimilarityScore,
    pub resume_tokens: usize,
    pub job_description_tokens: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM_HTML)
}

/// POST /
///
/// Form posts to the root are sent on to the match endpoint.
pub async fn handle_root_post() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/match")])
}

/// POST /match
///
/// Multipart upload of `resume` and `job_description`. Answers in plain text:
/// either a prompt to supply both files or the similarity percentage.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, AppError> {
    let mut files = match multipart {
        Ok(multipart) => read_file_fields(multipart).await?,
        Err(rejection) => {
            debug!("POST /match without a multipart body: {rejection}");
            HashMap::new()
        }
    };

    let (Some(resume), Some(job_description)) = (
        files.remove(RESUME_FIELD),
        files.remove(JOB_DESCRIPTION_FIELD),
    ) else {
        return Ok(MISSING_FILES_MESSAGE.to_string());
    };

    if resume.file_name.is_empty() || job_description.file_name.is_empty() {
        return Ok(EMPTY_FILE_NAME_MESSAGE.to_string());
    }

    let resume_name = resume.file_name.clone();
    let job_description_name = job_description.file_name.clone();

    let resume_text = state.extractor.extract(resume).await?;
    let job_description_text = state.extractor.extract(job_description).await?;

    let score = run_blocking("scoring", move || {
        similarity(&resume_text, &job_description_text)
    })
    .await?;
    info!("Matched {resume_name} against {job_description_name}: {score}");

    Ok(format!("Similarity Percentage: {:.2}%", score.value()))
}

/// POST /api/v1/similarity
///
/// Scores two already-extracted texts without any upload.
pub async fn handle_similarity(
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, AppError> {
    let response = run_blocking("scoring", move || {
        let resume = normalize(&request.resume_text);
        let job_description = normalize(&request.job_description_text);
        SimilarityResponse {
            similarity_percentage: score_normalized(&resume, &job_description),
            resume_tokens: resume.token_count(),
            job_description_tokens: job_description.token_count(),
        }
    })
    .await?;

    Ok(Json(response))
}

/// Runs CPU-bound work (normalization and character matching) on the blocking pool.
async fn run_blocking<T, F>(task: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("{task} task failed: {e}")))
}

/// Collects file parts by field name. The first part wins when a name repeats.
async fn read_file_fields(
    mut multipart: Multipart,
) -> Result<HashMap<String, UploadedDocument>, AppError> {
    let mut files = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if files.contains_key(&name) || !is_file_part(&field) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        files.insert(
            name.clone(),
            UploadedDocument {
                field_name: name,
                file_name,
                bytes,
            },
        );
    }

    Ok(files)
}

/// Browsers send a `filename` (possibly empty) for every file input, selected
/// or not. Parts without one are form fields, whatever their content type.
fn is_file_part(field: &Field<'_>) -> bool {
    field.file_name().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scoring_runs_off_the_request_thread() {
        let request_thread = std::thread::current().id();
        let scoring_thread = run_blocking("scoring", || std::thread::current().id())
            .await
            .unwrap();
        assert_ne!(request_thread, scoring_thread);
    }

    #[tokio::test]
    async fn test_run_blocking_returns_score() {
        let score = run_blocking("scoring", || similarity("Rust engineer", "rust, engineer"))
            .await
            .unwrap();
        assert_eq!(score.value(), 100.0);
    }

    #[tokio::test]
    async fn test_panicking_task_is_internal_error() {
        let err = run_blocking("scoring", || -> u8 { panic!("matcher blew up") })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
