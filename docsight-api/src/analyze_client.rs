use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use docsight_common::AnalysisError;
use docsight_db::DocumentRepository;

use crate::config::ServerConfig;
use crate::handlers::{AnalyzeRequest, AnalyzeResponse, analyze_and_store};

#[derive(Debug, Error)]
pub enum AnalyzeClientError {
    #[error("analyze request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("analyze endpoint returned {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// How the upload handler gets a document analyzed.
///
/// `Remote` posts to `/api/analyze` on the configured base URL, which is
/// normally this same server. `InProcess` runs the pipeline directly.
/// Both store the document and return the same response.
#[derive(Debug)]
pub enum AnalyzeClient {
    Remote {
        client: reqwest::Client,
        endpoint: String,
    },
    InProcess,
}

impl AnalyzeClient {
    pub fn remote(base_url: &str, timeout: Duration) -> Result<Self, AnalyzeClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(AnalyzeClient::Remote {
            client,
            endpoint: format!("{}/api/analyze", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AnalyzeClientError> {
        if config.analyze_in_process {
            Ok(AnalyzeClient::InProcess)
        } else {
            Self::remote(&config.api_url, config.analyze_timeout)
        }
    }

    pub async fn analyze(
        &self,
        repository: &DocumentRepository,
        content: String,
        name: Option<String>,
    ) -> Result<AnalyzeResponse, AnalyzeClientError> {
        match self {
            AnalyzeClient::InProcess => Ok(analyze_and_store(repository, content, name).await?),
            AnalyzeClient::Remote { client, endpoint } => {
                tracing::debug!(%endpoint, bytes = content.len(), "posting to analyze endpoint");
                let response = client
                    .post(endpoint.as_str())
                    .json(&AnalyzeRequest { content, name })
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AnalyzeClientError::Status(status));
                }
                Ok(response.json::<AnalyzeResponse>().await?)
            }
        }
    }
}
