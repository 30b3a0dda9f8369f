use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub const DEFAULT_NUM_COPIES: u32 = 2;
pub const DEFAULT_DRYING_TIME: u32 = 19;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(&'static str),
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct PrinterSettings {
    pub num_copies: u32,
    /// Hours added to the start time for the FERDIG line
    pub drying_time: u32,
}

impl PrinterSettings {
    /// Both values must be at least 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_copies < 1 {
            return Err(ConfigError::Validation(
                "Number of copies must be at least 1",
            ));
        }
        if self.drying_time < 1 {
            return Err(ConfigError::Validation(
                "Drying time must be at least 1 hour",
            ));
        }
        Ok(())
    }
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            num_copies: DEFAULT_NUM_COPIES,
            drying_time: DEFAULT_DRYING_TIME,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ConfigFile {
    pub printer: PrinterSettings,
}

/// Owns the on-disk settings. Every successful setter writes the file straight away.
#[derive(Debug)]
pub struct ConfigManager {
    path: PathBuf,
    config: ConfigFile,
}

impl ConfigManager {
    /// Loads `path`, creating it with defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let manager = Self {
                path,
                config: ConfigFile::default(),
            };
            println!(
                "{} No config at {}, writing defaults",
                log::CONFIG,
                manager.path.display()
            );
            manager.save()?;
            return Ok(manager);
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: ConfigFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.printer.validate()?;

        println!(
            "{} Loaded {} copies: {}, drying time: {}h",
            log::CONFIG,
            path.display(),
            config.printer.num_copies,
            config.printer.drying_time
        );

        Ok(Self { path, config })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(&self.config).map_err(|source| {
            ConfigError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, raw).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_copies(&self) -> u32 {
        self.config.printer.num_copies
    }

    pub fn drying_time(&self) -> u32 {
        self.config.printer.drying_time
    }

    pub fn set_num_copies(&mut self, value: u32) -> Result<(), ConfigError> {
        self.update(PrinterSettings {
            num_copies: value,
            ..self.config.printer
        })
    }

    pub fn set_drying_time(&mut self, value: u32) -> Result<(), ConfigError> {
        self.update(PrinterSettings {
            drying_time: value,
            ..self.config.printer
        })
    }

    /// Rejected values leave both memory and file untouched.
    fn update(&mut self, settings: PrinterSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.config.printer = settings;
        self.save()
    }
}
