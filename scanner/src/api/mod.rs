mod advice;
mod detection;

pub use advice::AdviceClient;
pub use detection::DetectionClient;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use shared::{PredictionResult, TreatmentAdvice};
use std::time::Duration;

use crate::error::ScanError;
use crate::upload::UploadedImage;

/// Anything that can turn an image into a prediction.
#[async_trait]
pub trait Classifier: Send + Sync + 'static {
    async fn detect(&self, image: UploadedImage) -> Result<PredictionResult, ScanError>;
}

/// Anything that can turn a confident prediction into treatment advice.
#[async_trait]
pub trait AdviceSource: Send + Sync + 'static {
    async fn fetch_advice(&self, prediction: PredictionResult) -> Result<TreatmentAdvice, ScanError>;
}

pub fn build_http_client(timeout: Duration) -> Result<HttpClient, ScanError> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ScanError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// Any non-2xx status is a failure; the body is not read.
fn ensure_success(response: Response, endpoint: &str) -> Result<Response, ScanError> {
    let status = response.status();
    if !status.is_success() {
        log::warn!("{} responded with {}", endpoint, status);
        return Err(ScanError::Network(format!("{} responded with {}", endpoint, status)));
    }
    Ok(response)
}
