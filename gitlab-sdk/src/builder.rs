// ABOUTME: Builder pattern implementation for GitlabClient configuration
// ABOUTME: Provides type-safe connection setup with sensible defaults

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use typed_builder::TypedBuilder;

use crate::GitlabClient;
use crate::constants;
use crate::error::GitlabError;

/// Connection context for one command invocation. Constructed once from
/// resolved configuration and immutable thereafter.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<GitlabClient, GitlabError>))]
pub struct ConnectionConfig {
    /// Base API URL, e.g. `https://gitlab.example.com/api/v3`
    #[builder(setter(into))]
    pub base_url: String,

    /// Project slug in `owner/name` form
    #[builder(setter(into))]
    pub project: String,

    /// Username the client acts as (used for the `mine` listing)
    #[builder(setter(into))]
    pub username: String,

    pub token: SecretString,

    #[builder(default = true)]
    pub verify_tls: bool,

    /// Custom CA bundle file or directory of certificates
    #[builder(default = None)]
    pub ca_path: Option<PathBuf>,

    #[builder(default = constants::timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,
}

impl From<ConnectionConfig> for Result<GitlabClient, GitlabError> {
    fn from(config: ConnectionConfig) -> Self {
        GitlabClient::from_config(config)
    }
}

impl GitlabClient {
    pub fn builder() -> ConnectionConfigBuilder<((), (), (), (), (), (), ())> {
        ConnectionConfig::builder()
    }
}
