//! Secret retrieval from the Taskcluster secrets service.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::options::TaskclusterOptions;

const TASKCLUSTER_CLIENT_ID_HEADER: &str = "Taskcluster-Client-Id";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Wire shape of a secret payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretPayload {
    /// Actual secret content; absence is a loader-level failure.
    #[serde(default)]
    pub secret: Option<serde_json::Value>,
    /// Expiry timestamp, reported by the service but unused here.
    #[serde(default)]
    pub expires: Option<String>,
}

/// Retrieval seam for the secrets service.
///
/// The configuration loader only needs "give me the payload for this name";
/// everything else about the service stays behind this trait.
pub trait SecretsFetcher {
    /// Fetch the named secret's full payload.
    fn fetch(&self, name: &str) -> Result<SecretPayload, ConfigError>;
}

/// Blocking HTTP client for the secrets service.
#[derive(Clone)]
pub struct SecretsClient {
    root_url: Url,
    client_id: Option<String>,
    access_token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for SecretsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsClient")
            .field("root_url", &self.root_url)
            .field("client_id", &self.client_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl SecretsClient {
    /// Create a client from resolved connection options.
    pub fn new(options: &TaskclusterOptions) -> Result<Self, ConfigError> {
        let root_url = Url::parse(&options.root_url).map_err(|e| {
            ConfigError::config_error(format!("Invalid root URL '{}': {}", options.root_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            root_url,
            client_id: options.client_id.clone(),
            access_token: options.access_token.clone(),
            client,
        })
    }

    fn secret_url(&self, name: &str) -> Result<Url, ConfigError> {
        self.root_url
            .join(&format!("api/secrets/v1/secret/{}", name))
            .map_err(|e| ConfigError::config_error(format!("Invalid secret name '{}': {}", name, e)))
    }
}

impl SecretsFetcher for SecretsClient {
    fn fetch(&self, name: &str) -> Result<SecretPayload, ConfigError> {
        let url = self.secret_url(name)?;

        let mut request = self.client.get(url);
        if let Some(client_id) = &self.client_id {
            request = request.header(TASKCLUSTER_CLIENT_ID_HEADER, client_id.as_str());
        }
        if let Some(access_token) = &self.access_token {
            request = request.bearer_auth(access_token);
        }

        let response = request
            .send()
            .map_err(|e| ConfigError::Fetch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "<no body>".to_string());
            return Err(ConfigError::Fetch(format!(
                "Secret service returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .map_err(|e| ConfigError::Fetch(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> SecretsClient {
        let options = TaskclusterOptions { root_url: server.url(), ..Default::default() };
        SecretsClient::new(&options).unwrap()
    }

    #[test]
    fn fetch_returns_payload_on_success() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/secrets/v1/secret/project/taskboot/deploy")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"secret": {"git": {"token": "gh"}}}"#)
            .create();

        let payload = client_for(&server).fetch("project/taskboot/deploy").unwrap();
        let secret = payload.secret.expect("payload carries a secret");
        assert_eq!(secret["git"]["token"], "gh");
    }

    #[test]
    fn fetch_fails_on_not_found() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/secrets/v1/secret/project/missing")
            .with_status(404)
            .with_body(r#"{"code": "ResourceNotFound"}"#)
            .expect(1)
            .create();

        let result = client_for(&server).fetch("project/missing");
        assert!(matches!(result, Err(ConfigError::Fetch(_))));
        mock.assert();
    }

    #[test]
    fn fetch_fails_on_invalid_json_body() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/secrets/v1/secret/project/bad")
            .with_status(200)
            .with_body("not json")
            .create();

        let result = client_for(&server).fetch("project/bad");
        assert!(matches!(result, Err(ConfigError::Fetch(_))));
    }

    #[test]
    fn fetch_forwards_credentials_as_headers() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/secrets/v1/secret/project/auth")
            .match_header("Taskcluster-Client-Id", "deploy/taskboot")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"secret": {}}"#)
            .expect(1)
            .create();

        let options = TaskclusterOptions {
            root_url: server.url(),
            client_id: Some("deploy/taskboot".to_string()),
            access_token: Some("tok".to_string()),
            certificate: None,
        };
        let client = SecretsClient::new(&options).unwrap();

        client.fetch("project/auth").unwrap();
        mock.assert();
    }

    #[test]
    fn new_rejects_unparseable_root_url() {
        let options =
            TaskclusterOptions { root_url: "not a url".to_string(), ..Default::default() };
        let result = SecretsClient::new(&options);
        assert!(matches!(result, Err(ConfigError::Configuration(_))));
    }

    #[test]
    fn debug_never_prints_the_access_token() {
        let options = TaskclusterOptions {
            root_url: "https://taskcluster.net".to_string(),
            client_id: Some("deploy/taskboot".to_string()),
            access_token: Some("super-secret".to_string()),
            certificate: None,
        };
        let client = SecretsClient::new(&options).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret"));
    }
}
