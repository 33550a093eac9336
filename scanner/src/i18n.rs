use serde_json::Value;
use shared::Language;
use std::collections::HashMap;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::error::ScanError;

/// Every user-facing string the scan workflow can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum MessageKey {
    #[strum(serialize = "selectImageFile")]
    SelectImageFile,
    #[strum(serialize = "fileSizeError")]
    FileSizeError,
    #[strum(serialize = "selectImageFirst")]
    SelectImageFirst,
    #[strum(serialize = "uploadClearerImage")]
    UploadClearerImage,
    #[strum(serialize = "detectedSuccessfully")]
    DetectedSuccessfully,
    #[strum(serialize = "backendUnavailable")]
    BackendUnavailable,
    #[strum(serialize = "invalidResponse")]
    InvalidResponse,
    #[strum(serialize = "treatmentGenerated")]
    TreatmentGenerated,
    #[strum(serialize = "noAdviceReceived")]
    NoAdviceReceived,
    #[strum(serialize = "unableToGenerateAdvice")]
    UnableToGenerateAdvice,
    #[strum(serialize = "adviceUnavailable")]
    AdviceUnavailable,
    #[strum(serialize = "requestInProgress")]
    RequestInProgress,
}

const EN: &[(MessageKey, &str)] = &[
    (MessageKey::SelectImageFile, "Please select an image file"),
    (MessageKey::FileSizeError, "File size must be less than 10MB"),
    (MessageKey::SelectImageFirst, "Please select an image first"),
    (MessageKey::UploadClearerImage, "Please upload a clearer image of the leaf"),
    (MessageKey::DetectedSuccessfully, "Disease detected successfully!"),
    (MessageKey::BackendUnavailable, "Detection service is unavailable. Please try again later."),
    (MessageKey::InvalidResponse, "The service returned an unexpected response."),
    (MessageKey::TreatmentGenerated, "Treatment advice generated!"),
    (MessageKey::NoAdviceReceived, "No advice was received. Please try again."),
    (MessageKey::UnableToGenerateAdvice, "Unable to generate treatment advice. Please try again."),
    (MessageKey::AdviceUnavailable, "Treatment advice is not available for uncertain results."),
    (MessageKey::RequestInProgress, "Please wait for the current request to finish."),
];

const ES: &[(MessageKey, &str)] = &[
    (MessageKey::SelectImageFile, "Por favor selecciona un archivo de imagen"),
    (MessageKey::FileSizeError, "El archivo debe pesar menos de 10MB"),
    (MessageKey::SelectImageFirst, "Primero selecciona una imagen"),
    (MessageKey::UploadClearerImage, "Sube una imagen más clara de la hoja"),
    (MessageKey::DetectedSuccessfully, "¡Enfermedad detectada con éxito!"),
    (MessageKey::BackendUnavailable, "El servicio de detección no está disponible. Inténtalo más tarde."),
    (MessageKey::InvalidResponse, "El servicio devolvió una respuesta inesperada."),
    (MessageKey::TreatmentGenerated, "¡Consejo de tratamiento generado!"),
    (MessageKey::NoAdviceReceived, "No se recibió ningún consejo. Inténtalo de nuevo."),
    (MessageKey::UnableToGenerateAdvice, "No se pudo generar el consejo de tratamiento. Inténtalo de nuevo."),
    (MessageKey::AdviceUnavailable, "El consejo de tratamiento no está disponible para resultados inciertos."),
    (MessageKey::RequestInProgress, "Espera a que termine la solicitud actual."),
];

const FR: &[(MessageKey, &str)] = &[
    (MessageKey::SelectImageFile, "Veuillez sélectionner un fichier image"),
    (MessageKey::FileSizeError, "Le fichier doit faire moins de 10 Mo"),
    (MessageKey::SelectImageFirst, "Veuillez d'abord sélectionner une image"),
    (MessageKey::UploadClearerImage, "Veuillez télécharger une image plus nette de la feuille"),
    (MessageKey::DetectedSuccessfully, "Maladie détectée avec succès !"),
    (MessageKey::BackendUnavailable, "Le service de détection est indisponible. Réessayez plus tard."),
    (MessageKey::InvalidResponse, "Le service a renvoyé une réponse inattendue."),
    (MessageKey::TreatmentGenerated, "Conseil de traitement généré !"),
    (MessageKey::NoAdviceReceived, "Aucun conseil reçu. Veuillez réessayer."),
    (MessageKey::UnableToGenerateAdvice, "Impossible de générer un conseil de traitement. Veuillez réessayer."),
    (MessageKey::AdviceUnavailable, "Aucun conseil de traitement pour un résultat incertain."),
    (MessageKey::RequestInProgress, "Veuillez attendre la fin de la requête en cours."),
];

const SW: &[(MessageKey, &str)] = &[
    (MessageKey::SelectImageFile, "Tafadhali chagua faili la picha"),
    (MessageKey::FileSizeError, "Ukubwa wa faili lazima uwe chini ya 10MB"),
    (MessageKey::SelectImageFirst, "Tafadhali chagua picha kwanza"),
    (MessageKey::UploadClearerImage, "Tafadhali pakia picha ya jani iliyo wazi zaidi"),
    (MessageKey::DetectedSuccessfully, "Ugonjwa umegunduliwa!"),
    (MessageKey::BackendUnavailable, "Huduma ya utambuzi haipatikani. Tafadhali jaribu tena baadaye."),
    (MessageKey::InvalidResponse, "Huduma imerudisha jibu lisilotarajiwa."),
    (MessageKey::TreatmentGenerated, "Ushauri wa matibabu umetolewa!"),
    (MessageKey::NoAdviceReceived, "Hakuna ushauri uliopokelewa. Tafadhali jaribu tena."),
    (MessageKey::UnableToGenerateAdvice, "Imeshindwa kutoa ushauri wa matibabu. Tafadhali jaribu tena."),
    (MessageKey::AdviceUnavailable, "Ushauri wa matibabu haupatikani kwa matokeo yasiyo na uhakika."),
    (MessageKey::RequestInProgress, "Tafadhali subiri ombi la sasa likamilike."),
];

fn catalog(language: Language) -> &'static [(MessageKey, &'static str)] {
    match language {
        Language::En => EN,
        Language::Es => ES,
        Language::Fr => FR,
        Language::Sw => SW,
    }
}

/// Message-key to localized-string mapping handed to a session at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn for_language(language: Language) -> Self {
        let entries = catalog(language)
            .iter()
            .map(|(key, text)| (key.as_ref().to_string(), text.to_string()))
            .collect();
        Self { entries }
    }

    /// Parses an operator-supplied `{ "messageKey": "text", ... }` object.
    /// Non-string values are skipped.
    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        let value: HashMap<String, Value> = serde_json::from_str(json)?;
        let entries = value
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect();
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up a workflow message, falling back to English and then to the key name.
    pub fn message(&self, key: MessageKey) -> String {
        if let Some(text) = self.get(key.as_ref()) {
            return text.to_string();
        }
        EN.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| text.to_string())
            .unwrap_or_else(|| key.as_ref().to_string())
    }

    pub fn missing_keys(&self) -> Vec<MessageKey> {
        MessageKey::iter()
            .filter(|key| !self.entries.contains_key(key.as_ref()))
            .collect()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::for_language(Language::En)
    }
}
