use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::StoreError;

/// Directory uploaded files are written to. Files are never read back.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`, replacing everything else so
/// a client-supplied name cannot escape the upload directory.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates the directory if it is missing. Fails if the path exists but
    /// is not a directory.
    pub async fn ensure(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => {
                debug!("Upload directory {:?} already exists", self.root);
                return Ok(());
            }
            Ok(_) => {
                return Err(StoreError::UploadDir {
                    path: self.root.clone(),
                    source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
                });
            }
            Err(_) => {}
        }
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::UploadDir {
                path: self.root.clone(),
                source,
            })?;
        info!("Created upload directory {:?}", self.root);
        Ok(())
    }

    /// Writes `bytes` as `<prefix>-<sanitized name>` and returns the path.
    pub async fn persist(
        &self,
        prefix: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError> {
        self.ensure().await?;
        let path = self.file_path(prefix, original_name);
        fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        info!("Saved upload to {path:?} ({} bytes)", bytes.len());
        Ok(path)
    }

    /// Renames a file written by [`UploadDir::persist`] so that its prefix
    /// is the id of the document it became.
    pub async fn assign_id(
        &self,
        saved: &Path,
        id: &str,
        original_name: &str,
    ) -> Result<PathBuf, StoreError> {
        let target = self.file_path(id, original_name);
        if target == saved {
            return Ok(target);
        }
        fs::rename(saved, &target)
            .await
            .map_err(|source| StoreError::Write {
                path: target.clone(),
                source,
            })?;
        debug!("Renamed upload {saved:?} to {target:?}");
        Ok(target)
    }

    fn file_path(&self, prefix: &str, original_name: &str) -> PathBuf {
        self.root
            .join(format!("{prefix}-{}", sanitize_file_name(original_name)))
    }
}
