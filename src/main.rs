mod seed;

use anyhow::Result;
use log::{error, info};
use std::env;
use std::time::Duration;

use seed::Uploader;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let documents_dir = env::var("DOCUMENTS_DIR").unwrap_or_else(|_| "./data".to_string());

    info!("Starting docsight seeding...");

    match Uploader::new(&api_url, UPLOAD_TIMEOUT) {
        Ok(uploader) => {
            info!("Uploading documents in {documents_dir} to {api_url}");
            match uploader.seed_directory(&documents_dir).await {
                Ok(report) => report.print(),
                Err(e) => error!("Failed to seed documents: {e:#}"),
            }
        }
        Err(e) => error!("Failed to create uploader: {e:#}"),
    }

    info!("docsight seeding finished.");
    Ok(())
}
