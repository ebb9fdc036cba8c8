//! # Repository Config File
//!
//! Tools built on the request builder usually need to know which component
//! repository they talk to and how to authenticate. This module reads that
//! information from a small YAML file:
//!
//! ```yaml
//! username: alice
//! password: s3cret
//! component: github.com/acme/service
//! repository: ghcr.io/acme
//! version: 1.2.0
//! ```
//!
//! All keys are optional and default to empty strings. The credentials part
//! is exposed as a [`Credentials`] map. When no path is given, tools look
//! for the file at [`default_config_path`].

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Credential attribute holding the user name
pub const ATTR_USERNAME: &str = "username";

/// Credential attribute holding the password
pub const ATTR_PASSWORD: &str = "password";

/// Contents of a repository config file
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub component: String,
    pub repository: String,
    pub version: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("component", &self.component)
            .field("repository", &self.repository)
            .field("version", &self.version)
            .finish()
    }
}

impl Config {
    /// The username/password pair as a credentials map
    pub fn credentials(&self) -> Credentials {
        let mut credentials = Credentials::new();
        credentials.set(ATTR_USERNAME, self.username.clone());
        credentials.set(ATTR_PASSWORD, self.password.clone());
        credentials
    }
}

/// Read and parse a config file.
///
/// Read failures and parse failures are both reported as [`Error::Config`]
/// carrying the path.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::Config {
        path: path.display().to_string(),
        message: "cannot read config file".to_string(),
        source: Box::new(e),
    })?;
    let config = serde_yaml::from_slice(&data).map_err(|e| Error::Config {
        path: path.display().to_string(),
        message: "cannot parse config file".to_string(),
        source: Box::new(e),
    })?;
    debug!("read config file {}", path.display());
    Ok(config)
}

/// Default location of the config file: `<config dir>/spiff-request/config.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spiff-request")
        .join("config.yaml")
}

/// Credential attributes keyed by name
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    properties: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.get(ATTR_USERNAME)
    }

    pub fn password(&self) -> Option<&str> {
        self.get(ATTR_PASSWORD)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only attribute names, never values.
        f.debug_set().entries(self.properties.keys()).finish()
    }
}
