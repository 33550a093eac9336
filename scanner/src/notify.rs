use chrono::{DateTime, Utc};

use crate::i18n::{MessageKey, Translations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A toast-style message for the UI, already localized.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub key: MessageKey,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, key: MessageKey, translations: &Translations) -> Self {
        Self {
            level,
            key,
            message: translations.message(key),
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
