use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document accepted by the backend, as returned from `POST /upload/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedDocument {
    pub file_id: String,
    pub filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub upload_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub file_id: &'a str,
}

/// The structured opinion returned from `POST /analyze/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub key_points: Vec<String>,
    pub recommendations: Vec<String>,
    pub risks: Vec<String>,
    pub next_steps: Vec<String>,
    pub confidence_score: f32,
}

impl AnalysisReport {
    /// Confidence as a 0.0..=1.0 fraction for the progress bar.
    pub fn confidence_fraction(&self) -> f32 {
        (self.confidence_score / 100.0).clamp(0.0, 1.0)
    }
}

/// A document already stored on the backend, as listed by `GET /files/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDocument {
    pub filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub upload_time: Option<String>,
}
