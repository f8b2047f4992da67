//! taskboot-config: deployment secrets and configuration loading.
//!
//! Loads a key-value configuration document from a Taskcluster secret or a
//! local YAML file, exactly once per process, and answers
//! credential-presence queries for the docker, aws, pypi, git, and cargo
//! subsections. Values are never inspected, only key presence.

pub mod config;
pub mod env;
pub mod error;
pub mod options;
pub mod secrets;

pub use config::Configuration;
pub use env::{Environment, ProcessEnv, SnapshotEnv};
pub use error::ConfigError;
pub use options::{TASKCLUSTER_DEFAULT_URL, TaskclusterOptions, root_url, taskcluster_options};
pub use secrets::{SecretPayload, SecretsClient, SecretsFetcher};
