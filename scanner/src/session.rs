use shared::{PredictionResult, TreatmentAdvice};
use std::fmt;

use crate::error::{ScanError, SessionError, ValidationError};
use crate::i18n::{MessageKey, Translations};
use crate::notify::{Notification, NotificationLevel};
use crate::upload::UploadedImage;

/// Generation counter for the selected image. Every accepted selection bumps
/// it, so responses tagged with an older value are recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionToken(u64);

impl SessionToken {
    fn next(self) -> Self {
        SessionToken(self.0 + 1)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    ImageSelected,
    Detecting,
    DetectedConfident,
    DetectedUncertain,
    FetchingAdvice,
    AdviceReady,
}

/// What a caller needs to run a detection outside the session.
#[derive(Debug, Clone)]
pub struct DetectionTicket {
    pub token: SessionToken,
    pub image: UploadedImage,
}

#[derive(Debug, Clone)]
pub struct AdviceTicket {
    pub token: SessionToken,
    pub prediction: PredictionResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(ScanState),
    /// The response belonged to a superseded image and was dropped.
    Discarded,
}

/// Scan workflow state. Owned and mutated by a single event loop; network
/// calls happen outside it and report back through `finish_*`.
pub struct ScanSession {
    translations: Translations,
    image: Option<UploadedImage>,
    prediction: Option<PredictionResult>,
    advice: Option<TreatmentAdvice>,
    detecting: bool,
    fetching_advice: bool,
    token: SessionToken,
    notifications: Vec<Notification>,
}

impl ScanSession {
    pub fn new(translations: Translations) -> Self {
        Self {
            translations,
            image: None,
            prediction: None,
            advice: None,
            detecting: false,
            fetching_advice: false,
            token: SessionToken::default(),
            notifications: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        if self.image.is_none() {
            return ScanState::Idle;
        }
        if self.detecting {
            return ScanState::Detecting;
        }
        if self.fetching_advice {
            return ScanState::FetchingAdvice;
        }
        if self.advice.is_some() {
            return ScanState::AdviceReady;
        }
        match &self.prediction {
            Some(p) if p.is_uncertain() => ScanState::DetectedUncertain,
            Some(_) => ScanState::DetectedConfident,
            None => ScanState::ImageSelected,
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn advice(&self) -> Option<&TreatmentAdvice> {
        self.advice.as_ref()
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    pub fn is_fetching_advice(&self) -> bool {
        self.fetching_advice
    }

    pub fn is_busy(&self) -> bool {
        self.detecting || self.fetching_advice
    }

    /// Detection runs once per selected image.
    pub fn can_detect(&self) -> bool {
        self.state() == ScanState::ImageSelected
    }

    /// Whether the UI should offer the "get advice" action.
    pub fn can_request_advice(&self) -> bool {
        self.state() == ScanState::DetectedConfident
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn set_translations(&mut self, translations: Translations) {
        self.translations = translations;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, level: NotificationLevel, key: MessageKey) {
        let notification = Notification::new(level, key, &self.translations);
        self.notifications.push(notification);
    }

    /// Replaces the current image if it passes validation. A rejected file
    /// leaves the image and any results untouched. An accepted one discards
    /// all downstream data and abandons in-flight requests.
    pub fn select_image(&mut self, image: UploadedImage) -> Result<SessionToken, ValidationError> {
        if let Err(e) = image.check() {
            log::warn!("Rejected {}: {}", image.file_name, e);
            self.notify(NotificationLevel::Error, e.message_key());
            return Err(e);
        }

        if self.is_busy() {
            log::debug!("Abandoning in-flight request for session {}", self.token);
        }

        self.token = self.token.next();
        self.image = Some(image);
        self.prediction = None;
        self.advice = None;
        self.detecting = false;
        self.fetching_advice = false;
        Ok(self.token)
    }

    pub fn begin_detection(&mut self) -> Result<DetectionTicket, SessionError> {
        if self.image.is_none() {
            self.notify(NotificationLevel::Error, MessageKey::SelectImageFirst);
            return Err(SessionError::NoImageSelected);
        }
        if self.is_busy() {
            self.notify(NotificationLevel::Warning, MessageKey::RequestInProgress);
            return Err(SessionError::Busy);
        }
        if self.state() != ScanState::ImageSelected {
            log::debug!("Ignoring detection request in state {:?}", self.state());
            return Err(SessionError::AlreadyDetected);
        }
        let Some(image) = self.image.clone() else {
            return Err(SessionError::NoImageSelected);
        };

        self.detecting = true;
        Ok(DetectionTicket {
            token: self.token,
            image,
        })
    }

    pub fn finish_detection(
        &mut self,
        token: SessionToken,
        result: Result<PredictionResult, ScanError>,
    ) -> Outcome {
        if token != self.token || !self.detecting {
            log::debug!(
                "Discarding detection result for {} (current {})",
                token,
                self.token
            );
            return Outcome::Discarded;
        }

        self.detecting = false;
        match result {
            Ok(prediction) => {
                log::info!(
                    "Detected '{}' with confidence {:.3}",
                    prediction.class,
                    prediction.confidence
                );
                if prediction.is_uncertain() {
                    self.notify(NotificationLevel::Warning, MessageKey::UploadClearerImage);
                } else {
                    self.notify(NotificationLevel::Success, MessageKey::DetectedSuccessfully);
                }
                self.prediction = Some(prediction);
            }
            Err(e) => {
                log::error!("Detection error: {}", e);
                let key = match e {
                    ScanError::Parse(_) => MessageKey::InvalidResponse,
                    _ => MessageKey::BackendUnavailable,
                };
                self.notify(NotificationLevel::Error, key);
            }
        }
        Outcome::Applied(self.state())
    }

    pub fn begin_advice(&mut self) -> Result<AdviceTicket, SessionError> {
        match self.state() {
            ScanState::DetectedConfident => {}
            ScanState::DetectedUncertain => {
                self.notify(NotificationLevel::Warning, MessageKey::AdviceUnavailable);
                return Err(SessionError::AdviceUnavailable);
            }
            ScanState::Detecting | ScanState::FetchingAdvice => {
                self.notify(NotificationLevel::Warning, MessageKey::RequestInProgress);
                return Err(SessionError::Busy);
            }
            ScanState::AdviceReady => return Err(SessionError::AdviceAlreadyReceived),
            ScanState::Idle | ScanState::ImageSelected => return Err(SessionError::NoPrediction),
        }

        let prediction = match &self.prediction {
            Some(p) => p.clone(),
            None => return Err(SessionError::NoPrediction),
        };
        self.fetching_advice = true;
        Ok(AdviceTicket {
            token: self.token,
            prediction,
        })
    }

    pub fn finish_advice(
        &mut self,
        token: SessionToken,
        result: Result<TreatmentAdvice, ScanError>,
    ) -> Outcome {
        if token != self.token || !self.fetching_advice {
            log::debug!("Discarding advice for {} (current {})", token, self.token);
            return Outcome::Discarded;
        }

        self.fetching_advice = false;
        match result {
            Ok(advice) => {
                self.advice = Some(advice);
                self.notify(NotificationLevel::Success, MessageKey::TreatmentGenerated);
            }
            Err(e) => {
                log::error!("Advice error: {}", e);
                let key = match e {
                    ScanError::EmptyAdvice => MessageKey::NoAdviceReceived,
                    ScanError::Parse(_) => MessageKey::InvalidResponse,
                    _ => MessageKey::UnableToGenerateAdvice,
                };
                self.notify(NotificationLevel::Error, key);
            }
        }
        Outcome::Applied(self.state())
    }
}
