// ABOUTME: Request construction for the GitLab REST endpoints
// ABOUTME: Joins path segments onto the base URL and percent-encodes query strings

use url::form_urlencoded;

/// HTTP verbs used against the issues and notes endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// Build a request URL from the configured base, path segments, and query
/// parameters.
///
/// Segments are caller-encoded (the project slug must already have `/`
/// replaced by `%2F`). Query parameter order follows the caller's insertion
/// order, with keys and values percent-encoded.
pub fn build_url(base_url: &str, segments: &[String], query: &[(&str, String)]) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }

    if !query.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())))
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }

    url
}
