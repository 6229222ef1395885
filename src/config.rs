use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::collector::ResultCollecter;
use crate::error::{Error, Result};
use crate::handler::{
    QuietTestResultHandler, StandardTestResultHandler, VerboseTestResultHandler,
};
use crate::loader::DEFAULT_METHOD_PREFIX;

pub const CONFIG_FILE: &str = "trellis.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Controls which members are collected as tests.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Name prefix marking a test method.
    #[serde(default = "default_method_prefix")]
    pub method_prefix: String,
    /// Glob patterns over `Container.method` of tests to leave out.
    /// Example: ["Slow*.test_*", "Network.test_live_*"]
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            method_prefix: default_method_prefix(),
            ignore: Vec::new(),
        }
    }
}

fn default_method_prefix() -> String {
    DEFAULT_METHOD_PREFIX.to_string()
}

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Stop scheduling tests after the first failure.
    #[serde(default)]
    pub failfast: bool,
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl RunnerConfig {
    /// A collector with failfast applied and the stderr handler matching
    /// the verbosity already registered.
    pub fn collector(&self, test_count: usize) -> ResultCollecter {
        let mut collector = ResultCollecter::new().with_failfast(self.failfast);
        match self.verbosity {
            Verbosity::Quiet => {
                collector.add_result_handler(QuietTestResultHandler::new(test_count))
            }
            Verbosity::Normal => {
                collector.add_result_handler(StandardTestResultHandler::new(test_count))
            }
            Verbosity::Verbose => {
                collector.add_result_handler(VerboseTestResultHandler::new(test_count))
            }
        }
        collector
    }
}

impl Config {
    /// Load `trellis.toml` from `dir`, falling back to defaults if absent or
    /// unusable. Anything other than a missing file is logged.
    pub fn load(dir: &Path) -> Self {
        match Self::from_file(&dir.join(CONFIG_FILE)) {
            Ok(config) => config,
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                message,
                path: Some(path.to_path_buf()),
            },
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            message: e.to_string(),
            path: None,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
