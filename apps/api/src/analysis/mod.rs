//! Candidate analysis: turns a job description, resume and similarity score
//! into a short natural-language summary.
//!
//! The generation service is treated as unreliable. Every request produces a
//! summary, chosen by the first tier that succeeds:
//!
//! 1. `Generated`: the first text block returned by the generation service.
//! 2. `Fallback`: a templated sentence, used when the service rejects the call
//!    or the call fails in transport.
//! 3. `Apology`: a fixed sentence, used when the request itself cannot be
//!    handled (unparseable body, unusable similarity, panic).

pub mod handlers;
pub mod prompts;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm_client::{LlmError, SummaryGenerator};
use prompts::{analysis_prompt, fallback_summary, APOLOGY_SUMMARY};

const DEFAULT_CANDIDATE_NAME: &str = "Candidate";
const LOGGED_BODY_CHARS: usize = 200;

/// Failures that send a request straight to the apology tier.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("similarity is not a finite number: {0}")]
    InvalidSimilarity(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

/// A parsed scoring request with defaults applied. Similarity is not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub job_desc: String,
    pub resume: String,
    pub similarity: f64,
    pub candidate_name: String,
}

impl AnalysisRequest {
    /// Parses a raw request body leniently.
    ///
    /// An empty top-level value (`null`, `false`, `0`, `""`, `[]`, `{}`) is
    /// read as an empty object; any other non-object is an error. Text fields
    /// accept any JSON value and use its display form. Similarity accepts
    /// numbers, booleans and numeric strings; an explicit `null` is an error.
    pub fn from_body(body: &[u8]) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_slice(body).map_err(AnalysisError::MalformedBody)?;

        let empty = Map::new();
        let fields = match &value {
            Value::Object(map) => map,
            v if is_empty_value(v) => &empty,
            Value::Bool(_) => return Err(AnalysisError::NotAnObject("a boolean")),
            Value::Number(_) => return Err(AnalysisError::NotAnObject("a number")),
            Value::String(_) => return Err(AnalysisError::NotAnObject("a string")),
            _ => return Err(AnalysisError::NotAnObject("an array")),
        };

        let similarity = match fields.get("similarity") {
            None => 0.0,
            Some(v) => similarity_from(v)?,
        };

        Ok(Self {
            job_desc: text_field(fields, "jobDesc", ""),
            resume: text_field(fields, "resume", ""),
            similarity,
            candidate_name: text_field(fields, "candidateName", DEFAULT_CANDIDATE_NAME),
        })
    }

    /// Similarity as a whole percentage.
    pub fn match_percentage(&self) -> Result<MatchPercent, AnalysisError> {
        match_percentage(self.similarity)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    }
}

fn similarity_from(value: &Value) -> Result<f64, AnalysisError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AnalysisError::InvalidSimilarity(n.to_string())),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AnalysisError::InvalidSimilarity(format!("{s:?}"))),
        other => Err(AnalysisError::InvalidSimilarity(other.to_string())),
    }
}

/// A similarity rounded to a whole percentage. Displays as an integer with no
/// decimal point, however large.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPercent(f64);

impl fmt::Display for MatchPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

/// `round(similarity * 100)` with ties going to the even neighbour,
/// so 0.125 gives 12 and 0.375 gives 38.
pub fn match_percentage(similarity: f64) -> Result<MatchPercent, AnalysisError> {
    let scaled = similarity * 100.0;
    if !scaled.is_finite() {
        return Err(AnalysisError::InvalidSimilarity(similarity.to_string()));
    }
    // + 0.0 folds -0.0 into 0.0 so tiny negatives render as "0"
    Ok(MatchPercent(scaled.round_ties_even() + 0.0))
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

/// Which tier produced the summary. Only used server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Generated,
    Fallback,
    Apology,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub source: SummarySource,
    pub summary: String,
}

impl Analysis {
    pub fn apology() -> Self {
        Self {
            source: SummarySource::Apology,
            summary: APOLOGY_SUMMARY.to_string(),
        }
    }
}

/// Wire shape of every `/analyze` response. `success` is always true.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub summary: String,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            success: true,
            summary: analysis.summary,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Policy
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full recovery policy over a raw body. Never fails.
pub async fn analyze(body: &[u8], generator: &dyn SummaryGenerator) -> Analysis {
    match analyze_request(body, generator).await {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("Server exception: {e}");
            Analysis::apology()
        }
    }
}

/// Generated summary, or the templated fallback if the generation service
/// fails. Errors only when the request itself is unusable.
async fn analyze_request(
    body: &[u8],
    generator: &dyn SummaryGenerator,
) -> Result<Analysis, AnalysisError> {
    let request = AnalysisRequest::from_body(body)?;
    let pct = request.match_percentage()?;

    info!("Analyze -> {} | sim~{}%", request.candidate_name, pct);

    let prompt = analysis_prompt(&request.job_desc, &request.resume, pct);

    let analysis = match generator.generate(&prompt).await {
        Ok(summary) => Analysis {
            source: SummarySource::Generated,
            summary,
        },
        Err(e) => {
            log_generation_failure(&e);
            Analysis {
                source: SummarySource::Fallback,
                summary: fallback_summary(&request.candidate_name, pct),
            }
        }
    };

    Ok(analysis)
}

fn log_generation_failure(err: &LlmError) {
    match err {
        LlmError::Api { status, body } => {
            let head: String = body.chars().take(LOGGED_BODY_CHARS).collect();
            warn!("Claude error {status}: {head}...");
        }
        other => warn!("Claude request failed: {other}"),
    }
}
