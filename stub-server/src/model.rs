use sha2::{Digest, Sha256};
use shared::{PredictionResult, StructuredAdvice, UNCERTAIN_CLASS};

pub const LABELS: &[&str] = &[
    "Leaf Blight",
    "Powdery Mildew",
    "Leaf Rust",
    "Bacterial Spot",
    "Healthy",
];

/// Below this the stub answers "Uncertain".
pub const MIN_CONFIDENCE: f64 = 0.5;

pub fn calculate_image_hash(image_data: &[u8]) -> String {
    hex::encode(Sha256::digest(image_data))
}

/// Deterministic stand-in for a model: the same bytes always get the same answer.
pub fn classify(image_data: &[u8]) -> PredictionResult {
    let digest = Sha256::digest(image_data);
    let confidence = f64::from(digest[0]) / 255.0;

    if confidence < MIN_CONFIDENCE {
        return PredictionResult::new(UNCERTAIN_CLASS, confidence);
    }
    let label = LABELS[usize::from(digest[1]) % LABELS.len()];
    PredictionResult::new(label, confidence)
}

pub fn advice_text(class: &str) -> String {
    format!(
        "Sure, let's talk about {}.\n\n\nRemove and destroy the affected leaves.\n\n\
         Apply a copper-based fungicide every 7 to 10 days and avoid overhead watering.",
        class
    )
}

pub fn structured_advice(class: &str) -> StructuredAdvice {
    StructuredAdvice {
        disease: class.to_string(),
        treatment: "Remove the affected leaves and apply a copper-based fungicide every 7 to 10 days."
            .to_string(),
        prevention: "Rotate crops, space plants for airflow and water at the base.".to_string(),
    }
}
