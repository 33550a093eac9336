use shared::{AdviceResponseMode, Language};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_DETECT_URL: &str = "https://agroscan-1.onrender.com/predict";
pub const DEFAULT_ADVICE_URL: &str = "https://hook.eu2.make.com/q2a51qipwk5fqi2yr7cu3pq91jyboe46";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PREFS_PATH: &str = "agroscan-prefs.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub detection_url: Url,
    pub advice_url: Url,
    pub advice_mode: AdviceResponseMode,
    pub request_timeout: Duration,
    pub default_language: Language,
    pub preferences_path: PathBuf,
}

impl ScanConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let detection_url = parse_url(
            "AGROSCAN_DETECT_URL",
            get("AGROSCAN_DETECT_URL").as_deref().unwrap_or(DEFAULT_DETECT_URL),
        )?;
        let advice_url = parse_url(
            "AGROSCAN_ADVICE_URL",
            get("AGROSCAN_ADVICE_URL").as_deref().unwrap_or(DEFAULT_ADVICE_URL),
        )?;

        let advice_mode = match get("AGROSCAN_ADVICE_MODE") {
            Some(mode) => AdviceResponseMode::from_str(mode.trim())
                .map_err(|_| ConfigError::InvalidAdviceMode(mode))?,
            None => AdviceResponseMode::default(),
        };

        let timeout_secs = match get("AGROSCAN_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let default_language = match get("AGROSCAN_LANGUAGE") {
            Some(code) => {
                Language::from_str(code.trim()).map_err(|_| ConfigError::InvalidLanguage(code))?
            }
            None => Language::default(),
        };

        let preferences_path = PathBuf::from(
            get("AGROSCAN_PREFS_PATH").unwrap_or_else(|| DEFAULT_PREFS_PATH.to_string()),
        );

        Ok(Self {
            detection_url,
            advice_url,
            advice_mode,
            request_timeout: Duration::from_secs(timeout_secs),
            default_language,
            preferences_path,
        })
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl { var, source })
}
