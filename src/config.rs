//! Runtime configuration
//!
//! Flags and `SALONTRACK_*` environment variables are read by clap; this
//! module fills in whatever is left unset.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::types::{Result, SalonError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DATA_FILE_NAME: &str = "salonData.json";
pub const LOG_FILE_NAME: &str = "salontrack.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn resolve(
        data_file: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Self> {
        let data_file = match data_file {
            Some(path) => path,
            None => default_data_file()?,
        };

        Ok(Self {
            data_file,
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
        })
    }

    /// Directory holding the data file
    pub fn data_dir(&self) -> &Path {
        self.data_file.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join(LOG_FILE_NAME)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `~/.salontrack/salonData.json`
pub fn default_data_file() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| SalonError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs
        .home_dir()
        .join(".salontrack")
        .join(DATA_FILE_NAME))
}
