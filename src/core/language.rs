//! # Language Coordinator
//!
//! Owns the page-wide language choice: remembers the last selection in a
//! preference store and tells the widget whenever it changes. The widget side
//! is just the [`LanguageListener`] trait, which `Session` implements.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::content;
use crate::core::state::Session;

/// Receives "active language changed to X" notifications.
pub trait LanguageListener {
    fn language_changed(&mut self, code: &str);
}

impl LanguageListener for Session {
    fn language_changed(&mut self, code: &str) {
        self.set_language(code);
    }
}

/// Where the last-selected language code lives between runs.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, code: &str) -> io::Result<()>;
}

/// Keeps the code in a one-line file, `~/.recrutder/language` by default.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.recrutder/language`, or `None` without a home directory.
    pub fn in_home() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(".recrutder").join("language")))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let code = contents.trim();
        if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        }
    }

    fn save(&mut self, code: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{code}\n"))
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    pub code: Option<String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.code.clone()
    }

    fn save(&mut self, code: &str) -> io::Result<()> {
        self.code = Some(code.to_string());
        Ok(())
    }
}

pub struct LanguageCoordinator<S: PreferenceStore> {
    store: S,
    current: String,
}

impl<S: PreferenceStore> LanguageCoordinator<S> {
    /// Reads the saved language once; `fallback` applies when nothing is saved.
    pub fn new(store: S, fallback: &str) -> Self {
        let current = store.load().unwrap_or_else(|| fallback.to_string());
        debug!("Language coordinator starting with '{}'", current);
        Self { store, current }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Makes `code` the active language, persists it, and notifies `listener`.
    /// A failed write is logged and otherwise ignored.
    pub fn select(&mut self, code: &str, listener: &mut dyn LanguageListener) {
        info!("Language changed: '{}' -> '{}'", self.current, code);
        self.current = code.to_string();
        if let Err(e) = self.store.save(code) {
            warn!("Failed to save language preference: {}", e);
        }
        listener.language_changed(code);
    }

    /// Selects the language after the current one in the supported list,
    /// wrapping around. Returns the new code.
    pub fn cycle(&mut self, listener: &mut dyn LanguageListener) -> &str {
        let codes: Vec<&str> = content::supported_languages().collect();
        let current = content::lookup(&self.current).code;
        let next = codes
            .iter()
            .position(|code| *code == current)
            .map(|i| codes[(i + 1) % codes.len()])
            .unwrap_or(content::DEFAULT_LANGUAGE);
        self.select(next, listener);
        &self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
