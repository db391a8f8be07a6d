use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use docsight_common::{AnalysisError, Sentiment, analyze_text};
use docsight_db::{DEFAULT_DOCUMENT_NAME, Document, DocumentRepository, UploadDir};

use crate::analyze_client::AnalyzeClient;
use crate::config::{MAX_UPLOAD_BYTES, ServerConfig};
use crate::error::ApiError;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded and analyzed successfully";

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<DocumentRepository>,
    pub uploads: UploadDir,
    pub analyzer: Arc<AnalyzeClient>,
    pub config: Arc<ServerConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub document_id: String,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub entities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub document_id: String,
}

/// Runs the extraction pipeline and stores the resulting document.
pub async fn analyze_and_store(
    repository: &DocumentRepository,
    content: String,
    name: Option<String>,
) -> Result<AnalyzeResponse, AnalysisError> {
    let analysis = analyze_text(content.clone()).await?;
    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string());
    let doc = Document::from_analysis(repository.next_id(), name, content, analysis);
    let response = AnalyzeResponse {
        document_id: doc.id.clone(),
        keywords: doc.keywords.clone(),
        sentiment: doc.sentiment,
        entities: doc.entities.clone(),
    };
    repository.add(doc).await;
    Ok(response)
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn handle_search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let query = params
        .ok()
        .and_then(|Query(params)| params.q)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let results = state.repository.search(&query).await;
    tracing::debug!(query = %query, hits = results.len(), "search");
    Ok(Json(results))
}

/// Accepts any body and validates it by hand so that an empty or non-JSON
/// body is a 400 rather than an extractor rejection.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let content = payload
        .get("content")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Content is required".to_string()))?;
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);

    let response = analyze_and_store(&state.repository, content.to_string(), name)
        .await
        .map_err(|e| {
            tracing::error!("Analysis error: {e}");
            ApiError::Internal("Error analyzing document".to_string())
        })?;
    tracing::info!(
        document_id = %response.document_id,
        sentiment = %response.sentiment,
        "document analyzed"
    );
    Ok(Json(response))
}

pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    match upload_document(&state, multipart).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Upload error: {e:#}");
            Err(ApiError::Internal("Error uploading file".to_string()))
        }
    }
}

async fn upload_document(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> anyhow::Result<UploadResponse> {
    let mut multipart = multipart?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        // text parts are not files, even when named "file"
        let Some(file_name) = field
            .file_name()
            .filter(|_| field.name() == Some("file"))
            .map(str::to_string)
        else {
            continue;
        };
        if upload.is_some() {
            anyhow::bail!("multiple files received");
        }
        let bytes = read_file_field(field).await?;
        upload = Some((file_name, bytes));
    }

    let Some((file_name, bytes)) = upload else {
        anyhow::bail!("no file uploaded");
    };

    let saved = state
        .uploads
        .persist(&state.repository.next_id(), &file_name, &bytes)
        .await?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let analysis = state
        .analyzer
        .analyze(&state.repository, content.clone(), Some(file_name.clone()))
        .await?;
    let saved = state
        .uploads
        .assign_id(&saved, &analysis.document_id, &file_name)
        .await?;
    tracing::info!(
        document_id = %analysis.document_id,
        path = %saved.display(),
        "upload analyzed"
    );

    Ok(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        content,
        keywords: analysis.keywords,
        document_id: analysis.document_id,
    })
}

async fn read_file_field(mut field: Field<'_>) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            anyhow::bail!("file exceeds {MAX_UPLOAD_BYTES} bytes");
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    Json(state.repository.all().await)
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    state
        .repository
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))
}

pub async fn handle_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "documents": state.repository.len().await,
    }))
}
