use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::*;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;

pub struct UploadService {
    client: Client,
    config: ClientConfig,
}

impl UploadService {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub async fn upload(&self, file_path: &Path) -> Result<UploadResult> {
        let endpoint = self.config.endpoint(self.config.contract.upload_path());

        let bytes = tokio::fs::read(file_path).await.map_err(|source| ClientError::File {
            path: file_path.to_path_buf(),
            source,
        })?;
        let filename = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        log::info!("Uploading {} ({} bytes) to {}", filename, bytes.len(), endpoint);

        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename));

        let response = self
            .client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status,
                detail: None,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&endpoint, e.to_string()))?;

        if let Some(message) = &body.message {
            log::debug!("Upload message: {}", message);
        }

        match body.identifier(self.config.contract) {
            Some(identifier) => {
                log::info!("Backend assigned identifier {}", identifier);
                Ok(UploadResult { identifier })
            }
            _ => Err(ClientError::malformed(&endpoint, "no filename or file_id in response")),
        }
    }
}
