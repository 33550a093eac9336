use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use shared::{AdviceRequest, AdviceResponseMode, PredictionResult, StructuredAdvice, TreatmentAdvice};
use url::Url;

use super::{AdviceSource, ensure_success};
use crate::error::ScanError;
use crate::sanitizer::sanitize;

#[derive(Clone)]
pub struct AdviceClient {
    http_client: HttpClient,
    endpoint: Url,
    mode: AdviceResponseMode,
}

impl AdviceClient {
    pub fn new(http_client: HttpClient, endpoint: Url, mode: AdviceResponseMode) -> Self {
        Self {
            http_client,
            endpoint,
            mode,
        }
    }

    pub fn mode(&self) -> AdviceResponseMode {
        self.mode
    }

    pub async fn fetch_advice(
        &self,
        prediction: &PredictionResult,
    ) -> Result<TreatmentAdvice, ScanError> {
        log::debug!(
            "Requesting {} advice for '{}' from {}",
            self.mode,
            prediction.class,
            self.endpoint
        );

        let request = self.http_client.post(self.endpoint.clone());
        let request = match self.mode {
            AdviceResponseMode::Text => request
                .header(CONTENT_TYPE, "text/plain")
                .body(prediction.class.clone()),
            AdviceResponseMode::Structured => request.json(&AdviceRequest {
                disease: prediction.class.clone(),
            }),
        };

        let response = request.send().await.map_err(|e| {
            log::error!("Advice request failed: {}", e);
            ScanError::Network(e.to_string())
        })?;
        let response = ensure_success(response, "Advice endpoint")?;

        match self.mode {
            AdviceResponseMode::Text => {
                let raw = response
                    .text()
                    .await
                    .map_err(|e| ScanError::Network(e.to_string()))?;
                advice_from_text(&raw)
            }
            AdviceResponseMode::Structured => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| ScanError::Network(e.to_string()))?;
                let advice: StructuredAdvice = serde_json::from_slice(&body)?;
                Ok(TreatmentAdvice::Structured(advice))
            }
        }
    }
}

/// Sanitizes a free-text body; nothing left afterwards means no advice.
pub(crate) fn advice_from_text(raw: &str) -> Result<TreatmentAdvice, ScanError> {
    let cleaned = sanitize(raw);
    if cleaned.is_empty() {
        log::warn!("Advice endpoint returned no usable text");
        return Err(ScanError::EmptyAdvice);
    }
    Ok(TreatmentAdvice::text(cleaned))
}

#[async_trait]
impl AdviceSource for AdviceClient {
    async fn fetch_advice(&self, prediction: PredictionResult) -> Result<TreatmentAdvice, ScanError> {
        AdviceClient::fetch_advice(self, &prediction).await
    }
}
