//! Syntax-highlighting theme files.
//!
//! The theme document belongs to the highlighter; its schema is not
//! inspected beyond requiring a JSON object. It is passed through unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;

/// An opaque syntax-highlighting theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HighlightTheme(Value);

impl HighlightTheme {
    /// Reads and parses a theme file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ThemeFile`] when the file is missing, unreadable, not
    /// JSON, or not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| theme_error(path, e.to_string()))?;
        let theme = Self::from_json_str(&text).map_err(|reason| theme_error(path, reason))?;
        debug!(
            "loaded highlight theme {} from {}",
            theme.name().unwrap_or("<unnamed>"),
            path.display()
        );
        Ok(theme)
    }

    /// Parses a theme from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        Self::from_value(value)
    }

    /// Wraps an already-parsed document.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err("theme document must be a JSON object".to_string())
        }
    }

    /// The theme's `name` field, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The raw document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

fn theme_error(path: &Path, reason: String) -> ConfigError {
    ConfigError::ThemeFile {
        path: PathBuf::from(path),
        reason,
    }
}
