//! Organizer settings
//!
//! Persisted separately from the project in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::{EXPORT_FILENAME, EXPORT_MIME, STORAGE_KEY};
use crate::platform::KeyValueStore;

/// Console log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

/// Organizer settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the project blob is stored under
    pub storage_key: String,

    // === Export ===
    /// Suggested filename for workspace exports
    pub export_filename: String,
    /// MIME type of exported files
    pub export_mime: String,

    // === Lifecycle ===
    /// Write the project to storage when the page unloads
    pub save_on_exit: bool,

    /// Console log level
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            export_filename: EXPORT_FILENAME.to_string(),
            export_mime: EXPORT_MIME.to_string(),
            save_on_exit: true,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Storage key for the settings blob itself
    pub const STORAGE_KEY: &'static str = "minimal_organizer_settings";

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Ok(Some(json)) = store.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings (best effort)
    pub fn save(&self, store: &dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            match store.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Forget the stored settings and return the defaults
    pub fn reset(store: &dyn KeyValueStore) -> Self {
        match store.remove_item(Self::STORAGE_KEY) {
            Ok(()) => log::info!("Settings reset to defaults"),
            Err(e) => log::warn!("Stored settings not removed: {}", e),
        }
        Self::default()
    }
}
