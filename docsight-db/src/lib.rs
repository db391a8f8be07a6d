pub mod model;
pub mod repository;
pub mod uploads;

use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub use model::{DEFAULT_DOCUMENT_NAME, Document};
pub use repository::DocumentRepository;
pub use uploads::UploadDir;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare upload directory {path:?}: {source}")]
    UploadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write upload {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Creates an empty store and makes sure the upload directory exists.
pub async fn initialize_db(
    upload_dir: impl Into<PathBuf>,
) -> Result<(Arc<DocumentRepository>, UploadDir), StoreError> {
    let uploads = UploadDir::new(upload_dir);
    info!("Preparing upload directory {:?}", uploads.path());
    uploads.ensure().await?;
    info!("Document store initialized (in-memory, not persisted).");
    Ok((Arc::new(DocumentRepository::new()), uploads))
}
