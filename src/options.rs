//! Taskcluster endpoint and connection-options resolution.

use crate::env::Environment;

/// Default Taskcluster root endpoint, used when nothing in the environment
/// names one.
pub const TASKCLUSTER_DEFAULT_URL: &str = "https://taskcluster.net";

const ROOT_URL_VAR: &str = "TASKCLUSTER_ROOT_URL";
const PROXY_URL_VAR: &str = "TASKCLUSTER_PROXY_URL";
const CLIENT_ID_VAR: &str = "TASKCLUSTER_CLIENT_ID";
const ACCESS_TOKEN_VAR: &str = "TASKCLUSTER_ACCESS_TOKEN";
const CERTIFICATE_VAR: &str = "TASKCLUSTER_CERTIFICATE";

/// Root endpoint for the current environment: the `TASKCLUSTER_ROOT_URL`
/// override when set, the fixed default otherwise.
pub fn root_url(env: &impl Environment) -> String {
    env.var(ROOT_URL_VAR).unwrap_or_else(|| TASKCLUSTER_DEFAULT_URL.to_string())
}

/// Connection options for the secrets service.
///
/// The credential fields are consumed opaquely by the retrieval client; this
/// crate never inspects them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TaskclusterOptions {
    pub root_url: String,
    pub client_id: Option<String>,
    pub access_token: Option<String>,
    pub certificate: Option<String>,
}

impl std::fmt::Debug for TaskclusterOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskclusterOptions")
            .field("root_url", &self.root_url)
            .field("client_id", &self.client_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("certificate", &self.certificate.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Resolve connection options for the current environment (local or inside a
/// Taskcluster task).
///
/// Ambient `TASKCLUSTER_*` defaults are applied first, then the proxy
/// endpoint overrides the root when present, then the fixed default fills a
/// root left empty by both prior steps.
pub fn taskcluster_options(env: &impl Environment) -> TaskclusterOptions {
    let mut options = TaskclusterOptions {
        root_url: env.var(ROOT_URL_VAR).unwrap_or_default(),
        client_id: env.var(CLIENT_ID_VAR),
        access_token: env.var(ACCESS_TOKEN_VAR),
        certificate: env.var(CERTIFICATE_VAR),
    };

    if let Some(proxy_url) = env.var(PROXY_URL_VAR) {
        // Always use the proxy url when available.
        options.root_url = proxy_url;
    }

    if options.root_url.is_empty() {
        // Always have a value in the root url.
        options.root_url = TASKCLUSTER_DEFAULT_URL.to_string();
    }

    options
}
