// ABOUTME: GitLab SDK library providing a typed blocking client for the v3 issues API
// ABOUTME: Includes connection setup, TLS trust configuration, and endpoint plumbing

use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub mod builder;
pub mod constants;
pub mod error;
mod issues;
mod models;
mod request;
mod response;
mod tls;

pub use builder::ConnectionConfig;
pub use error::{GitlabError, Result};
pub use models::{
    CreateIssue, Issue, IssueFilters, IssueState, Milestone, Note, StateEvent, UpdateIssue, User,
};
pub use secrecy::SecretString;

use crate::request::Method;

/// Blocking client for one GitLab project's issues and notes endpoints.
///
/// All I/O is synchronous; each call blocks until the response is fully
/// received.
pub struct GitlabClient {
    http: reqwest::blocking::Client,
    base_url: Url,
    project: String,
    username: String,
}

impl GitlabClient {
    pub fn from_config(config: ConnectionConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| {
            GitlabError::Configuration(format!(
                "issue.url is not a valid URL ({}): {err}",
                config.base_url
            ))
        })?;

        let mut token = HeaderValue::from_str(config.token.expose_secret()).map_err(|_| {
            GitlabError::Configuration(
                "issue.token contains characters not allowed in an HTTP header".to_string(),
            )
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(constants::api::PRIVATE_TOKEN_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::api::USER_AGENT));

        let mut builder = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);

        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        } else if let Some(ca_path) = &config.ca_path {
            for certificate in tls::load_ca_certificates(ca_path)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        let http = builder.build().map_err(GitlabError::from)?;

        Ok(Self {
            http,
            base_url,
            project: config.project,
            username: config.username,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Browser-facing URL for an issue, derived from the API base URL.
    pub fn issue_web_url(&self, iid: u64) -> String {
        format!(
            "{}://{}/{}/issues/{}",
            self.base_url.scheme(),
            self.base_url.host_str().unwrap_or_default(),
            self.project,
            iid
        )
    }

    /// Path segments under the project, with the slug path-encoded.
    fn project_segments(&self, tail: &[&str]) -> Vec<String> {
        let mut segments = vec!["projects".to_string(), self.project.replace('/', "%2F")];
        segments.extend(tail.iter().map(|s| s.to_string()));
        segments
    }

    fn request_for(&self, method: Method, url: &str) -> reqwest::blocking::RequestBuilder {
        debug!("{method:?} {url}");
        match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
        }
    }

    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        tail: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = request::build_url(self.base_url.as_str(), &self.project_segments(tail), query);
        let response = self.request_for(Method::Get, &url).send()?;
        response::decode(response)
    }

    pub(crate) fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        tail: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = request::build_url(self.base_url.as_str(), &self.project_segments(tail), &[]);
        let response = self.request_for(Method::Post, &url).json(body).send()?;
        response::decode(response)
    }

    pub(crate) fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        tail: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = request::build_url(self.base_url.as_str(), &self.project_segments(tail), &[]);
        let response = self.request_for(Method::Put, &url).json(body).send()?;
        response::decode(response)
    }
}
