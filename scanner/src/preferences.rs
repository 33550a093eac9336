use shared::Language;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PreferenceError;

pub const LANGUAGE_KEY: &str = "language";

/// Small key-value store for user preferences owned outside the scan workflow.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Saved language, or `fallback` when none is saved or the value is unknown.
pub fn load_language(store: &dyn PreferenceStore, fallback: Language) -> Language {
    store
        .get(LANGUAGE_KEY)
        .and_then(|code| Language::from_str(&code).ok())
        .unwrap_or(fallback)
}

pub fn save_language(
    store: &mut dyn PreferenceStore,
    language: Language,
) -> Result<(), PreferenceError> {
    store.set(LANGUAGE_KEY, language.as_ref())
}
