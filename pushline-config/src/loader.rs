// Settings file loaders

use crate::env::{DEFAULT_PREFIX, insert_path, strip_prefix};
use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    /// Detect the format of a path; `.env` files have no extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
            return Some(FileFormat::Env);
        }
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// Settings file loader
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file name
    pub fn auto(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load settings from file
    pub fn load_file(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    /// Parse settings from string
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
            FileFormat::Env => Ok(self.parse_env(content)),
        }
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }

    // KEY=value lines; an optional PUSHLINE_ prefix is dropped, `__` nests.
    fn parse_env(&self, content: &str) -> Value {
        let mut map = Map::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let key = strip_prefix(key, DEFAULT_PREFIX).unwrap_or(key);
                let value = value.trim().trim_matches('"').trim_matches('\'');
                insert_path(&mut map, key, Value::String(value.to_string()));
            }
        }

        Value::Object(map)
    }
}

/// Deep-merge `overlay` into `base`; overlay scalars win.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
