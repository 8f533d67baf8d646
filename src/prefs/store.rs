//! Key-value preference storage

use crate::{Result, WastevoxError};
use ini::Ini;
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;

/// INI section holding all preference keys
const SECTION: &str = "preferences";

/// Minimal key-value store for user preferences
pub trait PrefStore: Send {
    /// Read a preference, if one has been saved
    fn get(&self, key: &str) -> Option<String>;

    /// Save a preference for future sessions
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed preference store (~/.wastevox.cfg)
///
/// Every `set` writes through to disk immediately, so a preference saved
/// in one run is visible to the next without an explicit save step.
pub struct FilePrefs {
    ini: Ini,
    path: PathBuf,
}

impl FilePrefs {
    /// Load preferences from the default location, or start empty
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load preferences from an explicit path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading preferences from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| WastevoxError::Prefs(format!("Failed to load preferences: {}", e)))?
        } else {
            Ini::new()
        };

        Ok(Self { ini, path })
    }

    /// Preference file path (~/.wastevox.cfg)
    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wastevox.cfg")
    }

    /// Expose the preference file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PrefStore for FilePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.ini.get_from(Some(SECTION), key).map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        debug!("Saving preference {}={} to {:?}", key, value, self.path);
        self.ini.with_section(Some(SECTION)).set(key, value);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| WastevoxError::Prefs(format!("Failed to save preferences: {}", e)))
    }
}

/// In-memory preference store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
