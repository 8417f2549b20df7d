//! Airport reference data: authoritative name, city, country and
//! coordinates for known airport codes.
//!
//! The directory is an explicit value handed to the resolver and to the
//! coordinate pass. It comes from the built-in asset, from a user file, or
//! from entries supplied in code.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reference table compiled into the binary.
const BUILTIN_AIRPORTS: &str = include_str!("../../assets/airports.yml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportInfo {
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    entries: BTreeMap<String, AirportInfo>,
}

impl AirportDirectory {
    /// Empty directory: every code resolves to a placeholder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference table shipped with the binary.
    pub fn builtin() -> AppResult<Self> {
        Self::from_yaml_str(BUILTIN_AIRPORTS)
    }

    /// Load a reference file. `.json` files are read as JSON, anything else
    /// as YAML. Both map codes to `{name, city, country, latitude, longitude}`.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Reference(format!("cannot read '{}': {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            let map: BTreeMap<String, AirportInfo> = serde_json::from_str(&content)
                .map_err(|e| AppError::Reference(format!("{}: {}", path.display(), e)))?;
            Ok(Self::from_entries(map))
        } else {
            Self::from_yaml_str(&content)
                .map_err(|e| AppError::Reference(format!("{}: {}", path.display(), e)))
        }
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let map: BTreeMap<String, AirportInfo> =
            serde_yaml::from_str(content).map_err(|e| AppError::Reference(e.to_string()))?;
        Ok(Self::from_entries(map))
    }

    /// Build a directory from in-memory entries. Codes are normalized to
    /// trimmed upper case; on duplicates the last entry wins.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, AirportInfo)>,
        K: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(code, info)| (normalize_code(code.as_ref()), info))
            .filter(|(code, _)| !code.is_empty())
            .collect();

        Self { entries }
    }

    /// Resolve the directory selected by an optional file path, falling
    /// back to the built-in table.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::builtin(),
        }
    }

    pub fn lookup(&self, code: &str) -> Option<&AirportInfo> {
        self.entries.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
