use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UiStyle {
    Modern,
    #[default]
    Paper,
}

impl UiStyle {
    pub fn toggled(self) -> Self {
        match self {
            UiStyle::Modern => UiStyle::Paper,
            UiStyle::Paper => UiStyle::Modern,
        }
    }
}

/// Display preferences handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub ui_style: UiStyle,
}

pub trait PreferencesStore {
    /// Never fails: anything unreadable yields the defaults
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: Option<PathBuf>,
}

impl FilePreferencesStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::preferences_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: Some(p.as_ref().to_path_buf()),
        }
    }
}

impl Default for FilePreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Preferences {
        let Some(path) = &self.path else {
            return Preferences::default();
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("no preferences at {}: {}", path.display(), e);
                return Preferences::default();
            }
        };

        match serde_json::from_slice::<Preferences>(&bytes) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("failed to parse preferences {}: {}", path.display(), e);
                Preferences::default()
            }
        }
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(prefs)?;
        fs::write(path, data)?;
        debug!("saved preferences to {}", path.display());
        Ok(())
    }
}

/// Keeps preferences in memory; for headless runs and tests
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    saved: RefCell<Option<Preferences>>,
}

impl MemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<Preferences> {
        *self.saved.borrow()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn load(&self) -> Preferences {
        self.saved().unwrap_or_default()
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError> {
        *self.saved.borrow_mut() = Some(*prefs);
        Ok(())
    }
}
