//! Runtime Configuration
//!
//! Defaults are compiled in; a JSON object stored under [`CONFIG_KEY`] in
//! local storage overrides any subset of fields.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::attachment::MAX_ATTACHMENT_BYTES;
use crate::draft::DraftBackend;
use crate::error::ConfigError;
use crate::forms::DRAFT_KEY;

/// Local storage key holding config overrides
pub const CONFIG_KEY: &str = "qualityConsoleConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Draft key for the inspection form (versioned by schema)
    pub draft_key: String,
    pub max_attachment_bytes: u64,
    /// Toast lifetime in milliseconds
    pub toast_ms: u32,
    pub log_level: String,
    /// Records kept by the rolling logger
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            draft_key: DRAFT_KEY.to_string(),
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            toast_ms: 5000,
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLevel(self.log_level.clone()))
    }

    /// Load overrides from `backend`, falling back to defaults on any problem
    pub fn load<B: DraftBackend>(backend: &B) -> Self {
        match backend.get(CONFIG_KEY) {
            None => Self::default(),
            Some(raw) => match Self::from_json(&raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("[CONFIG] Ignoring stored config: {}", e);
                    Self::default()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MemoryBackend;

    #[test]
    fn test_defaults_without_override() {
        let backend = MemoryBackend::default();
        let config = AppConfig::load(&backend);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.draft_key, "inspectionFormDraft_v6");
        assert_eq!(config.max_attachment_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_override() {
        let backend = MemoryBackend::default();
        backend.set(CONFIG_KEY, r#"{"toastMs":1500,"logLevel":"debug"}"#).unwrap();

        let config = AppConfig::load(&backend);
        assert_eq!(config.toast_ms, 1500);
        assert_eq!(config.level_filter(), Ok(LevelFilter::Debug));
        assert_eq!(config.draft_key, DRAFT_KEY);
    }

    #[test]
    fn test_bad_level_falls_back() {
        let backend = MemoryBackend::default();
        backend.set(CONFIG_KEY, r#"{"logLevel":"loud"}"#).unwrap();
        assert_eq!(AppConfig::load(&backend), AppConfig::default());
        assert!(matches!(
            AppConfig::from_json(r#"{"logLevel":"loud"}"#),
            Err(ConfigError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_garbage_falls_back() {
        let backend = MemoryBackend::default();
        backend.set(CONFIG_KEY, "{not json").unwrap();
        assert_eq!(AppConfig::load(&backend), AppConfig::default());
    }
}
