//! In-memory console variables and `.cfg` parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ds_engine::DvarLookup;
use ds_ir::{DvarValue, COM_MAXFPS, TIMESCALE};

use crate::error::ConfigError;

/// Engine default frame-rate cap.
pub const DEFAULT_MAX_FPS: i32 = 85;

/// Console variable store.
#[derive(Clone, Debug)]
pub struct DvarStore {
    values: HashMap<String, DvarValue>,
}

impl DvarStore {
    /// Store seeded with `timescale 1` and the default frame-rate cap.
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.set(TIMESCALE, DvarValue::from_float(1.0));
        store.set(COM_MAXFPS, DvarValue::from_int(DEFAULT_MAX_FPS));
        store
    }

    /// Store with no variables registered.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Dvar names are case-insensitive, like the console.
    pub fn get(&self, name: &str) -> Option<DvarValue> {
        // looked up every frame; only allocate for mixed-case names
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            return self.values.get(&name.to_ascii_lowercase()).copied();
        }
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: DvarValue) {
        self.values.insert(name.to_ascii_lowercase(), value);
    }

    /// Set from console text. Integers keep their exact integer view.
    pub fn set_str(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let parsed = parse_value(value).ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        self.set(name, parsed);
        Ok(())
    }

    /// Unregister a variable.
    pub fn remove(&mut self, name: &str) -> Option<DvarValue> {
        self.values.remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply `set`/`seta`/`sets` lines from config text on top of this store.
    ///
    /// `//` starts a comment; blank lines are skipped; values may be quoted.
    pub fn apply_cfg(&mut self, text: &str) -> Result<usize, ConfigError> {
        let mut applied = 0;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or("");
            if !matches!(command.to_ascii_lowercase().as_str(), "set" | "seta" | "sets") {
                return Err(ConfigError::UnknownCommand {
                    line: idx + 1,
                    command: command.to_string(),
                });
            }

            let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                return Err(ConfigError::MissingArgument {
                    line: idx + 1,
                    command: command.to_string(),
                });
            };
            self.set_str(name, value.trim_matches('"'))?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Defaults overlaid with a `.cfg` file.
    pub fn load_cfg(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut store = Self::new();
        let applied = store.apply_cfg(&text)?;
        tracing::info!(path = %path.as_ref().display(), applied, "loaded config");
        Ok(store)
    }
}

impl Default for DvarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DvarLookup for DvarStore {
    fn dvar(&self, name: &str) -> Option<DvarValue> {
        self.get(name)
    }
}

fn parse_value(text: &str) -> Option<DvarValue> {
    if let Ok(i) = text.parse::<i32>() {
        return Some(DvarValue::from_int(i));
    }
    text.parse::<f32>()
        .ok()
        .filter(|f| f.is_finite())
        .map(DvarValue::from_float)
}
