//! `serverlink.toml`, the per-app settings file.
//!
//! ```toml
//! [app]
//! name = "orders"
//!
//! [logging.lambda]          # shared default for the adapter
//! level = "debug"
//!
//! [adapters.lambda.logging] # takes precedence when present
//! echo_stdout = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed manifest: {0}")]
    Syntax(#[from] toml::de::Error),
    #[error("invalid manifest: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// A parsed and validated manifest. Cloning shares the parsed data.
#[derive(Clone, Debug)]
pub struct ManifestLoader {
    manifest: Arc<Manifest>,
}

impl ManifestLoader {
    pub fn load_from_str(source: &str) -> Result<Self, ManifestError> {
        Self::parse(source, None)
    }

    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read manifest {}", path.display());
        Self::parse(&source, path.parent().map(Path::to_path_buf))
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    fn parse(source: &str, root: Option<PathBuf>) -> Result<Self, ManifestError> {
        let mut manifest: Manifest = toml::from_str(source)?;
        manifest.validate()?;
        manifest.root = root;
        Ok(Self {
            manifest: Arc::new(manifest),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct Manifest {
    #[serde(default)]
    #[validate(nested)]
    pub app: AppSection,
    #[serde(default)]
    pub adapters: BTreeMap<String, AdapterSection>,
    #[serde(default)]
    pub logging: BTreeMap<String, LoggingSection>,
    #[serde(skip)]
    root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AppSection {
    #[validate(length(min = 1))]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdapterSection {
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoggingSection {
    pub level: Option<LogLevel>,
    pub echo_stdout: Option<bool>,
}

impl Manifest {
    /// Directory the manifest was read from; `None` for in-memory sources.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Logging settings for `adapter`, matched case-insensitively.
    pub fn logging_or_default(&self, adapter: &str) -> LoggingConfig {
        let dedicated = lookup(&self.adapters, adapter)
            .map(|section| &section.logging)
            .filter(|logging| logging.level.is_some() || logging.echo_stdout.is_some());
        dedicated
            .or_else(|| lookup(&self.logging, adapter))
            .map(LoggingConfig::from)
            .unwrap_or_default()
    }
}

fn lookup<'a, T>(sections: &'a BTreeMap<String, T>, adapter: &str) -> Option<&'a T> {
    sections
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(adapter))
        .map(|(_, section)| section)
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub echo_stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            echo_stdout: true,
        }
    }
}

impl From<&LoggingSection> for LoggingConfig {
    fn from(section: &LoggingSection) -> Self {
        Self {
            level: section.level.unwrap_or_default(),
            echo_stdout: section.echo_stdout.unwrap_or(true),
        }
    }
}

impl LoggingConfig {
    /// Filter to install; disabling stdout echo silences everything.
    pub fn level_filter(&self) -> LevelFilter {
        if self.echo_stdout {
            self.level.into()
        } else {
            LevelFilter::Off
        }
    }
}
