use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::analysis;
use crate::analysis::extract::extract_pdf_text;
use crate::analysis::scoring::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
///
/// Multipart fields: `file` (PDF resume) and `job_description` (plain text).
/// Both are required; the request is rejected before the pipeline runs when
/// either is missing or the job description is blank.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::InvalidRequest("missing 'file' field".to_string()))?;
    let job_description = match upload.job_description {
        Some(jd) if !jd.trim().is_empty() => jd,
        _ => {
            return Err(AppError::InvalidRequest(
                "missing or blank 'job_description' field".to_string(),
            ))
        }
    };

    // The pipeline is CPU-bound (PDF parsing, tokenization, set operations);
    // keep it off the async workers.
    let vocabulary = state.vocabulary.clone();
    let result = tokio::task::spawn_blocking(move || {
        analysis::analyze(&file.bytes, &job_description, &vocabulary)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    tracing::info!(
        score = result.score,
        matched = result.resume_skills.len(),
        missing = result.missing_skills.len(),
        "analysis complete"
    );
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub filename: String,
    pub text: String,
}

/// POST /extract-text
///
/// Returns the normalized text layer of an uploaded PDF without scoring it.
pub async fn handle_extract_text(
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::InvalidRequest("missing 'file' field".to_string()))?;

    let filename = file.filename.clone();
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&file.bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    Ok(Json(ExtractTextResponse { filename, text }))
}

struct UploadedFile {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadFields {
    file: Option<UploadedFile>,
    job_description: Option<String>,
}

/// Drains the multipart stream into the two fields the API understands.
/// Unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<UploadFields, AppError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidRequest(format!("failed to read 'file' field: {e}"))
                })?;
                fields.file = Some(UploadedFile { filename, bytes });
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidRequest(format!("failed to read 'job_description' field: {e}"))
                })?;
                fields.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(fields)
}
