//! Theme preference — the one place that decides light vs. dark.
//!
//! Resolution order at startup: saved preference → system color scheme →
//! light. Only an explicit toggle writes the preference; system changes are
//! followed until the user has chosen.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{FolioError, Result};

pub const THEME_KEY: &str = "theme";

/// How long the host keeps its theme-transition styling after a toggle.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Text of the toggle control: it names the theme a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "☀️ Light Mode",
            Theme::Light => "🌙 Dark Mode",
        }
    }

    pub fn toggle_aria_label(self) -> String {
        format!("Switch to {} mode", self.toggled())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Client-local key/value storage (`localStorage` on the web).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePreferences {
    /// Opens the file, starting empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                FolioError::InvalidContent(format!("preferences {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let current = saved_theme(&store).unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        debug!(theme = %current, "Theme resolved");
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn has_saved_preference(&self) -> bool {
        saved_theme(&self.store).is_some()
    }

    /// Flips and persists the theme. A failed write still switches the
    /// visible theme for this session.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        if let Err(err) = self.store.set(THEME_KEY, self.current.as_str()) {
            warn!("Failed to persist theme preference: {err}");
        }
        self.current
    }

    /// Follows a system color-scheme change unless the user chose a theme.
    /// Returns the new theme when it was applied.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.has_saved_preference() {
            return None;
        }
        self.current = Theme::from_system(prefers_dark);
        Some(self.current)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn saved_theme<S: PreferenceStore>(store: &S) -> Option<Theme> {
    let raw = store.get(THEME_KEY)?;
    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(err) => {
            warn!("Ignoring saved preference: {err}");
            None
        }
    }
}
