use anyhow::{Context, Result, anyhow};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const PATTERNS: [&str; 2] = ["*.txt", "*.md"];

#[derive(Debug)]
pub struct SeedFile {
    pub path: PathBuf,
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub document_id: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub uploaded: Vec<(String, UploadSummary)>,
    pub failed: Vec<(String, String)>,
}

impl SeedReport {
    pub fn print(&self) {
        for (name, summary) in &self.uploaded {
            println!(
                "{} {} -> {} [{}]",
                style("✔").green(),
                name,
                style(&summary.document_id).cyan(),
                summary.keywords.join(", ")
            );
        }
        for (name, reason) in &self.failed {
            println!("{} {}: {}", style("✘").red(), name, reason);
        }
        println!(
            "{} uploaded, {} failed",
            style(self.uploaded.len()).green().bold(),
            style(self.failed.len()).red().bold()
        );
    }
}

/// Non-empty `.txt` and `.md` files directly under `dir`, sorted by path.
pub fn collect_documents(dir: &str) -> Result<Vec<SeedFile>> {
    let escaped = glob::Pattern::escape(dir);
    let mut paths: Vec<PathBuf> = PATTERNS
        .iter()
        .flat_map(|pattern| {
            glob(&format!("{escaped}/{pattern}"))
                .context("Failed to read glob pattern")
                .into_iter()
                .flatten()
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect file paths")?;
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path).with_context(|| format!("Failed to read file: {path:?}"))?;
        if String::from_utf8_lossy(&bytes).trim().is_empty() {
            warn!("Skipping empty file: {path:?}");
            continue;
        }
        let name = file_name(&path);
        files.push(SeedFile { path, name, bytes });
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

pub struct Uploader {
    client: reqwest::Client,
    endpoint: String,
}

impl Uploader {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/upload", api_url.trim_end_matches('/')),
        })
    }

    pub async fn upload(&self, file: &SeedFile) -> Result<UploadSummary> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .with_context(|| format!("Failed to upload {}", file.name))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("upload of {} returned {status}", file.name));
        }
        response
            .json::<UploadSummary>()
            .await
            .context("Failed to decode upload response")
    }

    /// Uploads every document under `dir`. Individual failures are recorded
    /// in the report rather than aborting the run.
    pub async fn seed_directory(&self, dir: &str) -> Result<SeedReport> {
        let files = collect_documents(dir)?;
        let mut report = SeedReport::default();
        if files.is_empty() {
            warn!("No documents found in '{dir}'");
            return Ok(report);
        }
        info!("Found {} documents to upload.", files.len());

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .context("Invalid progress template")?,
        );

        for file in &files {
            progress.set_message(file.name.clone());
            match self.upload(file).await {
                Ok(summary) => {
                    info!("Uploaded {:?} as {}", file.path, summary.document_id);
                    report.uploaded.push((file.name.clone(), summary));
                }
                Err(e) => {
                    warn!("{e:#}");
                    report.failed.push((file.name.clone(), format!("{e:#}")));
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();
        Ok(report)
    }
}
