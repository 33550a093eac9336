pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod notify;
pub mod preferences;
pub mod sanitizer;
pub mod session;
pub mod upload;
pub mod validation;
pub mod workflow;

pub use api::{AdviceClient, AdviceSource, Classifier, DetectionClient};
pub use config::ScanConfig;
pub use error::{ScanError, SessionError, ValidationError};
pub use i18n::{MessageKey, Translations};
pub use session::{Outcome, ScanSession, ScanState, SessionToken};
pub use upload::UploadedImage;
pub use workflow::ScanController;
