use crate::core::batch::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::errors::{AppError, AppResult};
use crate::models::flight::FlightField;
use crate::source::{ColumnMap, SourceFormat};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub source_format: SourceFormat,
    /// Worksheet to read from workbooks; first sheet when unset.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Airport reference file (YAML or JSON); built-in table when unset.
    #[serde(default)]
    pub reference_file: Option<String>,
    /// Per-field header overrides on top of `source_format`.
    #[serde(default)]
    pub columns: BTreeMap<FlightField, String>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            batch_size: default_batch_size(),
            source_format: SourceFormat::default(),
            sheet: None,
            reference_file: None,
            columns: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("flightlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".flightlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("flightlog.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("flightlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_batch_size(self.batch_size)?;

        if self.database.trim().is_empty() {
            return Err(AppError::Config("'database' must not be empty".to_string()));
        }

        Ok(())
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn reference_path(&self) -> Option<PathBuf> {
        self.reference_file.as_deref().map(expand_tilde)
    }

    /// Column mapping for `format` (or the configured one) with the
    /// configured overrides applied.
    pub fn column_map(&self, format: Option<SourceFormat>) -> ColumnMap {
        ColumnMap::preset(format.unwrap_or(self.source_format)).with_overrides(&self.columns)
    }

    /// Create the config directory, write the config file (unless `is_test`)
    /// and return the configuration now in effect.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // Same resolution as the global --db override: relative to the cwd
        let db_path = match custom_db {
            Some(name) => expand_tilde(&name),
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}

pub fn validate_batch_size(size: usize) -> AppResult<()> {
    if size == 0 || size > MAX_BATCH_SIZE {
        return Err(AppError::InvalidBatchSize(size));
    }
    Ok(())
}
