//! Deployment configuration loading and credential presence checks.

use std::io::Read;

use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

use crate::env::Environment;
use crate::error::ConfigError;
use crate::options::taskcluster_options;
use crate::secrets::{SecretsClient, SecretsFetcher};

const DOCKER_AUTH_KEYS: &[&str] = &["registry", "username", "password"];
const AWS_AUTH_KEYS: &[&str] = &["access_key_id", "secret_access_key"];
const PYPI_AUTH_KEYS: &[&str] = &["username", "password"];
const GIT_AUTH_KEYS: &[&str] = &["token"];
const CARGO_AUTH_KEYS: &[&str] = &["token"];

/// Immutable deployment configuration document.
///
/// Loaded once at construction from a Taskcluster secret or a local YAML
/// file, then only queried. Values are never validated beyond key presence.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    config: Mapping,
}

impl Configuration {
    /// Load configuration, choosing the source by priority: a named
    /// Taskcluster secret first, a local YAML reader second, nothing third.
    ///
    /// Having no source at all is tolerated: the document stays empty and a
    /// warning is logged. A malformed document from either source is fatal.
    pub fn load<R: Read>(
        secret: Option<&str>,
        config: Option<R>,
        env: &impl Environment,
    ) -> Result<Self, ConfigError> {
        if let Some(name) = secret {
            let client = SecretsClient::new(&taskcluster_options(env))?;
            Self::from_secret(&client, name)
        } else if let Some(reader) = config {
            Self::from_reader(reader)
        } else {
            warn!("No configuration available");
            Ok(Self::default())
        }
    }

    /// Load from a secret payload fetched by `fetcher`.
    ///
    /// The payload must carry a `secret` member whose body is a mapping.
    pub fn from_secret(fetcher: &impl SecretsFetcher, name: &str) -> Result<Self, ConfigError> {
        info!("Loading Taskcluster secret {}", name);
        let payload = fetcher.fetch(name)?;
        let secret = payload.secret.ok_or(ConfigError::MissingField("Missing secret value"))?;

        match serde_yaml::to_value(secret)? {
            Value::Mapping(config) => Ok(Self { config }),
            _ => Err(ConfigError::MissingField("Invalid secret structure")),
        }
    }

    /// Load from a YAML reader. The top level must parse to a mapping.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        match serde_yaml::from_reader(reader)? {
            Value::Mapping(config) => Ok(Self { config }),
            _ => Err(ConfigError::MissingField("Invalid YAML structure")),
        }
    }

    /// Value of `key`, failing when the document has no such key.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.config.get(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// True when the document carries no keys at all.
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    /// True when `docker` holds `registry`, `username`, and `password`.
    pub fn has_docker_auth(&self) -> bool {
        self.has_auth("docker", DOCKER_AUTH_KEYS)
    }

    /// True when `aws` holds `access_key_id` and `secret_access_key`.
    pub fn has_aws_auth(&self) -> bool {
        self.has_auth("aws", AWS_AUTH_KEYS)
    }

    /// True when `pypi` holds `username` and `password`.
    pub fn has_pypi_auth(&self) -> bool {
        self.has_auth("pypi", PYPI_AUTH_KEYS)
    }

    /// True when `git` holds `token`.
    pub fn has_git_auth(&self) -> bool {
        self.has_auth("git", GIT_AUTH_KEYS)
    }

    /// True when `cargo` holds `token`.
    pub fn has_cargo_auth(&self) -> bool {
        self.has_auth("cargo", CARGO_AUTH_KEYS)
    }

    fn has_auth(&self, section: &str, required: &[&str]) -> bool {
        match self.config.get(section) {
            Some(Value::Mapping(section)) => required.iter().all(|key| section.contains_key(*key)),
            _ => false,
        }
    }
}
