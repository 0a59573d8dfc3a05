use reqwest::multipart;

use crate::api::types::{AnalysisReport, AnalyzeRequest, ApiError, RemoteDocument, UploadedDocument};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "OPINION_DESK_BASE_URL";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the backend's interactive API documentation.
    pub fn docs_url(&self) -> String {
        format!("{}/docs", self.base_url)
    }

    /// Upload one document as the multipart form field `file`.
    pub async fn upload_document(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedDocument, ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Request analysis of a previously uploaded document.
    pub async fn request_analysis(&self, file_id: &str) -> Result<AnalysisReport, ApiError> {
        let response = self
            .client
            .post(format!("{}/analyze/", self.base_url))
            .json(&AnalyzeRequest { file_id })
            .send()
            .await?;

        Self::decode(response).await
    }

    /// List the documents already stored on the backend.
    pub async fn list_documents(&self) -> Result<Vec<RemoteDocument>, ApiError> {
        let response = self
            .client
            .get(format!("{}/files/", self.base_url))
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
