use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use summarizer_core::{UploadLimits, DEFAULT_MAX_UPLOAD_MB, MIB};
use summarizer_engine::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
use summarizer_logging::LogDestination;
use thiserror::Error;

use crate::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "summarizer.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// On-disk configuration; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub endpoint: String,
    pub max_upload_mb: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_report_mb: u64,
    pub download_dir: PathBuf,
    pub notification_secs: u64,
    pub log_destination: String,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            max_report_mb: 50,
            download_dir: PathBuf::from("reports"),
            notification_secs: 5,
            log_destination: "file".to_string(),
            log_level: "info".to_string(),
            log_file: summarizer_logging::default_log_file(),
        }
    }
}

/// Validated settings the application runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub limits: UploadLimits,
    pub notification_timeout: Duration,
    pub client: ClientSettings,
    pub download_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Loads `path`, or the default file when it exists, or built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Command line and environment win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(max_upload_mb) = cli.max_upload_mb {
            self.max_upload_mb = max_upload_mb;
        }
        if let Some(download_dir) = &cli.download_dir {
            self.download_dir = download_dir.clone();
        }
        if let Some(destination) = cli.log {
            self.log_destination = match destination {
                LogDestination::File => "file",
                LogDestination::Terminal => "terminal",
                LogDestination::Both => "both",
                LogDestination::Off => "off",
            }
            .to_string();
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
    }

    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.max_upload_mb == 0 {
            return Err(invalid("max_upload_mb", "must be at least 1"));
        }
        if self.notification_secs == 0 {
            return Err(invalid("notification_secs", "must be at least 1"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }

        let client = ClientSettings {
            base_url: self.base_url,
            endpoint: self.endpoint,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_report_bytes: self.max_report_mb.saturating_mul(MIB),
        };
        client
            .summarize_url()
            .map_err(|err| invalid("base_url", err.detail.unwrap_or(err.message)))?;

        let log_destination = self
            .log_destination
            .parse::<LogDestination>()
            .map_err(|reason| invalid("log_destination", reason))?;
        let log_level = self
            .log_level
            .parse::<LevelFilter>()
            .map_err(|err| invalid("log_level", err.to_string()))?;

        Ok(Settings {
            limits: UploadLimits::with_max_mb(self.max_upload_mb),
            notification_timeout: Duration::from_secs(self.notification_secs),
            client,
            download_dir: self.download_dir,
            log_destination,
            log_level,
            log_file: self.log_file,
        })
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("summarizer.ron");
        fs::write(
            &path,
            r#"(base_url: "https://legal.example.com", max_upload_mb: 16)"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.base_url, "https://legal.example.com");
        assert_eq!(config.max_upload_mb, 16);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.notification_secs, 5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/summarizer.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = AppConfig {
            max_upload_mb: 16,
            ..AppConfig::default()
        };
        let cli = Cli {
            endpoint: Some("https://api.example.com/summarize".to_string()),
            max_upload_mb: Some(10),
            log: Some(LogDestination::Terminal),
            verbose: true,
            ..Cli::default()
        };

        config.apply_cli(&cli);
        let settings = config.into_settings().unwrap();

        assert_eq!(settings.limits.max_bytes, 10 * MIB);
        assert_eq!(
            settings.client.summarize_url().unwrap().as_str(),
            "https://api.example.com/summarize"
        );
        assert_eq!(settings.log_destination, LogDestination::Terminal);
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.client.request_timeout, None);
    }

    #[test]
    fn rejects_zero_limit_and_bad_url() {
        let zero = AppConfig {
            max_upload_mb: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            zero.into_settings(),
            Err(ConfigError::Invalid {
                field: "max_upload_mb",
                ..
            })
        ));

        let bad_url = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            bad_url.into_settings(),
            Err(ConfigError::Invalid {
                field: "base_url",
                ..
            })
        ));
    }
}
