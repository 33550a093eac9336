use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::multipart::{Form, Part};
use shared::PredictionResult;
use url::Url;

use super::{Classifier, ensure_success};
use crate::error::ScanError;
use crate::upload::UploadedImage;

/// Multipart field the classifier reads the image from.
pub const IMAGE_FIELD: &str = "file";

#[derive(Clone)]
pub struct DetectionClient {
    http_client: HttpClient,
    endpoint: Url,
}

impl DetectionClient {
    pub fn new(http_client: HttpClient, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One multipart POST, no retry.
    pub async fn detect(&self, image: UploadedImage) -> Result<PredictionResult, ScanError> {
        log::debug!(
            "Sending {} ({} bytes) to {}",
            image.file_name,
            image.size(),
            self.endpoint
        );

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.media_type)
            .map_err(|e| ScanError::Network(format!("Invalid media type: {}", e)))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::error!("Detection request failed: {}", e);
                ScanError::Network(e.to_string())
            })?;
        let response = ensure_success(response, "Detection endpoint")?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ScanError::Network(e.to_string()))?;
        parse_prediction(&body)
    }
}

pub(crate) fn parse_prediction(body: &[u8]) -> Result<PredictionResult, ScanError> {
    let prediction: PredictionResult = serde_json::from_slice(body)?;
    if prediction.class.trim().is_empty() {
        return Err(ScanError::Parse("Prediction has an empty class".to_string()));
    }
    if !(0.0..=1.0).contains(&prediction.confidence) {
        return Err(ScanError::Parse(format!(
            "Prediction confidence {} is outside [0, 1]",
            prediction.confidence
        )));
    }
    Ok(prediction)
}

#[async_trait]
impl Classifier for DetectionClient {
    async fn detect(&self, image: UploadedImage) -> Result<PredictionResult, ScanError> {
        DetectionClient::detect(self, image).await
    }
}
