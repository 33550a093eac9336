use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Class the classifier returns when it cannot name a disease with confidence.
pub const UNCERTAIN_CLASS: &str = "Uncertain";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub class: String,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(class: impl Into<String>, confidence: f64) -> Self {
        Self {
            class: class.into(),
            confidence,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        self.class == UNCERTAIN_CLASS
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Body of the structured advice request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub disease: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAdvice {
    pub disease: String,
    pub treatment: String,
    pub prevention: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreatmentAdvice {
    Text { advice: String },
    Structured(StructuredAdvice),
}

impl TreatmentAdvice {
    pub fn text(advice: impl Into<String>) -> Self {
        TreatmentAdvice::Text {
            advice: advice.into(),
        }
    }

    /// Advice as a single block of display text.
    pub fn render(&self) -> String {
        match self {
            TreatmentAdvice::Text { advice } => advice.clone(),
            TreatmentAdvice::Structured(s) => format!(
                "{}\n\nTreatment:\n{}\n\nPrevention:\n{}",
                s.disease, s.treatment, s.prevention
            ),
        }
    }
}

/// Which contract the advice endpoint speaks. Picked by the operator, never sniffed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AdviceResponseMode {
    #[default]
    Text,
    Structured,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Sw,
}

impl Language {
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::Sw => "Kiswahili",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Language::En => "🇬🇧",
            Language::Es => "🇪🇸",
            Language::Fr => "🇫🇷",
            Language::Sw => "🇰🇪",
        }
    }
}
