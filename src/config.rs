//! Configuration file support for the seat plan editor.
//!
//! Settings are stored as versioned JSON: in the user config directory on
//! native builds and in `localStorage` in the browser.

use seatplan_ui::KeyCode;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BACKGROUND_PATH, DEFAULT_STORAGE_KEY};
use crate::keybindings::KeyBindings;
use crate::model::ShapeKind;
#[cfg(not(target_arch = "wasm32"))]
use crate::persistence::FileStore;
use crate::persistence::{KeyValueStore, StorageError};

/// Logger verbosity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    /// Startup, load/save summaries and background status
    #[default]
    Info,
    /// Every seat mutation and declined dialog
    Debug,
    Trace,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        use log::LevelFilter;
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Format version written by this build. Older versions load as-is.
pub const CONFIG_VERSION: u32 = 1;

/// Key (and file stem) the configuration is stored under.
pub const CONFIG_KEY: &str = "seatplan-config";

/// Settings persisted across sessions. Seats are stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

/// Editor behavior and storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Storage key holding the seat list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Floor-plan image, relative to the static assets root
    #[serde(default = "default_background_path")]
    pub background_path: String,

    /// Shape given to new seats and to stored seats without one
    #[serde(default)]
    pub default_shape: ShapeKind,

    /// Whether the side panel starts open
    #[serde(default = "default_panel_open")]
    pub panel_open: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_background_path() -> String {
    DEFAULT_BACKGROUND_PATH.to_string()
}

fn default_panel_open() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            storage_key: default_storage_key(),
            background_path: default_background_path(),
            default_shape: ShapeKind::default(),
            panel_open: default_panel_open(),
        }
    }
}

/// Serialized form of [`KeyBindings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Hotkey for showing/hiding the side panel
    #[serde(default = "default_toggle_panel")]
    pub toggle_panel: KeyCode,

    /// Hotkey for deleting the selected seat
    #[serde(default = "default_delete_selected")]
    pub delete_selected: Option<KeyCode>,
}

fn default_toggle_panel() -> KeyCode {
    KeyBindings::default().toggle_panel
}

fn default_delete_selected() -> Option<KeyCode> {
    KeyBindings::default().delete_selected
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from(&KeyBindings::default())
    }
}

impl From<&KeyBindings> for KeyBindingsConfig {
    fn from(bindings: &KeyBindings) -> Self {
        Self {
            toggle_panel: bindings.toggle_panel,
            delete_selected: bindings.delete_selected,
        }
    }
}

impl KeyBindingsConfig {
    pub fn to_keybindings(&self) -> KeyBindings {
        KeyBindings {
            toggle_panel: self.toggle_panel,
            delete_selected: self.delete_selected,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            keybindings: KeyBindingsConfig::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a stored configuration.
    ///
    /// Rejects configs written by a newer version, an empty seat storage key
    /// and shortcuts that share a key.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if config.preferences.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "storage_key must not be empty".to_string(),
            ));
        }
        config
            .keybindings
            .to_keybindings()
            .validate()
            .map_err(ConfigError::InvalidValue)?;

        Ok(config)
    }

    /// Load from a key-value store. `Ok(None)` if nothing is stored.
    pub fn load_from_store(store: &impl KeyValueStore) -> Result<Option<Self>, ConfigError> {
        match store.get(CONFIG_KEY)? {
            Some(json) => Self::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    pub fn save_to_store(&self, store: &mut impl KeyValueStore) -> Result<(), ConfigError> {
        store.set(CONFIG_KEY, &self.to_json()?)?;
        Ok(())
    }

    /// Load from a store, falling back to defaults on any problem.
    pub fn load_or_default(store: &impl KeyValueStore) -> Self {
        match Self::load_from_store(store) {
            Ok(Some(config)) => {
                log::info!("Loaded configuration");
                config
            }
            Ok(None) => {
                log::debug!("No configuration stored, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored configuration: {}", e);
                Self::default()
            }
        }
    }

    /// File name used by file-backed stores.
    pub fn default_filename() -> String {
        format!("{CONFIG_KEY}.json")
    }

    /// Directory holding the native config file: `<config dir>/seatplan`,
    /// or `~/.config/seatplan` when the platform reports no config dir.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("seatplan"))
    }

    /// Load the native config file, or defaults when it is missing or bad.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Self {
        match Self::default_dir() {
            Some(dir) => Self::load_or_default(&FileStore::new(dir)),
            None => {
                log::warn!("No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Log filter from the configured level.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.preferences.log_level.to_level_filter()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting is present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),

    /// Backing store failure (file or localStorage)
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.storage_key, "seatplan-seats");
        assert_eq!(config.preferences.background_path, "assets/floorplan.png");
        assert_eq!(config.keybindings.toggle_panel, KeyCode::P);
        assert!(config.preferences.panel_open);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AppConfig::from_json(
            r#"{"version":1,"preferences":{"log_level":"debug","default_shape":"square"}}"#,
        )
        .unwrap();

        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(config.preferences.default_shape, ShapeKind::Square);
        assert_eq!(config.preferences.storage_key, "seatplan-seats");
        assert_eq!(config.keybindings, KeyBindingsConfig::default());
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = AppConfig::from_json(r#"{"version":99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let mut config = AppConfig::new();
        config.keybindings.toggle_panel = KeyCode::H;
        config.preferences.panel_open = false;

        config.save_to_store(&mut store).unwrap();
        assert_eq!(AppConfig::load_from_store(&store).unwrap(), Some(config));
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let store = MemoryStore::new().with_entry(CONFIG_KEY, "{");
        assert_eq!(AppConfig::load_or_default(&store), AppConfig::default());
    }

    #[test]
    fn test_rejects_unusable_values() {
        let empty_key = r#"{"version":1,"preferences":{"storage_key":"  "}}"#;
        assert!(matches!(
            AppConfig::from_json(empty_key),
            Err(ConfigError::InvalidValue(_))
        ));

        let clash = r#"{"version":1,"keybindings":{"toggle_panel":"D","delete_selected":"D"}}"#;
        assert!(matches!(
            AppConfig::from_json(clash),
            Err(ConfigError::InvalidValue(_))
        ));

        let fixed_key = r#"{"version":1,"keybindings":{"toggle_panel":"Escape"}}"#;
        assert!(matches!(
            AppConfig::from_json(fixed_key),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Trace;

        config.save_to_store(&mut store).unwrap();
        assert!(dir.path().join(AppConfig::default_filename()).exists());
        assert_eq!(AppConfig::load_or_default(&store), config);
    }

    #[test]
    fn test_keybindings_conversion() {
        let bindings = KeyBindingsConfig {
            toggle_panel: KeyCode::K,
            delete_selected: None,
        }
        .to_keybindings();
        assert_eq!(bindings.toggle_panel, KeyCode::K);
        assert_eq!(KeyBindingsConfig::from(&bindings).delete_selected, None);
    }
}
