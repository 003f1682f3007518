// Resume/job matching engine: text extraction, skill vocabulary, skill
// extraction, scoring, and the HTTP handlers that drive the pipeline.

pub mod extract;
pub mod handlers;
pub mod scoring;
pub mod skills;
pub mod vocabulary;

use crate::analysis::scoring::AnalysisResult;
use crate::analysis::vocabulary::Vocabulary;
use crate::errors::AppError;

/// Runs the full pipeline for one request: resume PDF bytes and job
/// description text in, terminal `AnalysisResult` out.
///
/// Stateless apart from the read-only vocabulary; nothing from the request
/// outlives the call.
pub fn analyze(
    resume_pdf: &[u8],
    job_description: &str,
    vocabulary: &Vocabulary,
) -> Result<AnalysisResult, AppError> {
    let resume_text = extract::extract_pdf_text(resume_pdf)?;
    let job_text = extract::normalize_text(job_description);

    let resume_skills = skills::extract_skills(&resume_text, vocabulary);
    let job_skills = skills::extract_skills(&job_text, vocabulary);

    let outcome = scoring::score_match(&resume_skills, &job_skills);
    Ok(scoring::assemble(&outcome, vocabulary))
}
