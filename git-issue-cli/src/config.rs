// ABOUTME: Connection settings resolution from CLI flags and git configuration
// ABOUTME: Fails fast with the exact git config command that fixes a missing setting

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;

use gitlab_sdk::{GitlabError, SecretString};

/// Connection values supplied on the command line; each one takes precedence
/// over the corresponding git configuration entry.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub repo: Option<String>,
    pub url: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
}

/// Fully resolved connection settings, constructed once at startup and
/// passed into the client. Business logic never reads git config directly.
#[derive(Debug)]
pub struct ConnectionSettings {
    pub repo: String,
    pub url: String,
    pub user: String,
    pub token: SecretString,
    pub verify_tls: bool,
    pub ca_path: Option<PathBuf>,
}

/// Source of git configuration values. The seam exists so resolution logic
/// can be tested without a git checkout.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
    fn get_global(&self, key: &str) -> Option<String>;
}

/// Reads configuration by shelling out to `git config`.
pub struct GitConfig;

impl ConfigSource for GitConfig {
    fn get(&self, key: &str) -> Option<String> {
        git_config_value(&["config", "--get", key])
    }

    fn get_global(&self, key: &str) -> Option<String> {
        git_config_value(&["config", "--global", "--get", key])
    }
}

fn git_config_value(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
}

static REMOTE_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^/:]+/[^/]+)\.git").expect("remote slug pattern is valid"));

/// Extract the `owner/name` slug from a git remote URL (SSH or HTTPS form).
pub fn parse_remote_slug(url: &str) -> Option<String> {
    REMOTE_SLUG
        .captures(url)
        .map(|captures| captures[1].to_string())
}

impl ConnectionSettings {
    pub fn resolve(overrides: &ConnectionOverrides) -> Result<Self, GitlabError> {
        Self::resolve_from(overrides, &GitConfig)
    }

    pub fn resolve_from(
        overrides: &ConnectionOverrides,
        config: &impl ConfigSource,
    ) -> Result<Self, GitlabError> {
        let repo = overrides
            .repo
            .clone()
            .or_else(|| config.get("issue.repo"))
            .or_else(|| config.get("remote.origin.url").and_then(|url| parse_remote_slug(&url)))
            .ok_or_else(|| {
                missing(
                    "issue.repo",
                    "git remote add origin git@gitlab.example.com:username/repo_name.git",
                )
            })?;

        let url = overrides
            .url
            .clone()
            .or_else(|| config.get("issue.url"))
            .ok_or_else(|| {
                missing("issue.url", "git config issue.url https://gitlab.example.com/api/v3")
            })?;

        let user = overrides
            .user
            .clone()
            .or_else(|| config.get("issue.user"))
            .or_else(|| config.get_global("gitlab.user"))
            .ok_or_else(|| missing("issue.user", "git config issue.user <username>"))?;

        let token = overrides
            .token
            .clone()
            .or_else(|| config.get("issue.token"))
            .ok_or_else(|| missing("issue.token", "git config issue.token <private-token>"))?;

        let verify_tls = config
            .get("http.sslVerify")
            .map(|value| value != "false")
            .unwrap_or(true);
        let ca_path = config.get("http.sslCert").map(PathBuf::from);

        Ok(Self {
            repo,
            url,
            user,
            token: SecretString::from(token),
            verify_tls,
            ca_path,
        })
    }
}

fn missing(setting: &str, remedy: &str) -> GitlabError {
    GitlabError::Configuration(format!("{setting} is not configured. Set it with:\n\n\t{remedy}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeConfig {
        local: HashMap<&'static str, &'static str>,
        global: HashMap<&'static str, &'static str>,
    }

    impl ConfigSource for FakeConfig {
        fn get(&self, key: &str) -> Option<String> {
            self.local.get(key).map(|v| v.to_string())
        }

        fn get_global(&self, key: &str) -> Option<String> {
            self.global.get(key).map(|v| v.to_string())
        }
    }

    fn complete_config() -> FakeConfig {
        FakeConfig {
            local: HashMap::from([
                ("issue.repo", "yuroyoro/gitterb"),
                ("issue.url", "http://gitlab.example.com/api/v3"),
                ("issue.user", "yuroyoro"),
                ("issue.token", "MAwbtYEG6Pz5WJNB7jZb"),
            ]),
            global: HashMap::new(),
        }
    }

    #[test]
    fn test_resolves_from_git_config() {
        let settings =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &complete_config())
                .unwrap();
        assert_eq!(settings.repo, "yuroyoro/gitterb");
        assert_eq!(settings.url, "http://gitlab.example.com/api/v3");
        assert_eq!(settings.user, "yuroyoro");
        assert!(settings.verify_tls);
        assert!(settings.ca_path.is_none());
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let overrides = ConnectionOverrides {
            repo: Some("other/project".to_string()),
            user: Some("alice".to_string()),
            ..Default::default()
        };
        let settings =
            ConnectionSettings::resolve_from(&overrides, &complete_config()).unwrap();
        assert_eq!(settings.repo, "other/project");
        assert_eq!(settings.user, "alice");
    }

    #[test]
    fn test_repo_falls_back_to_remote_origin() {
        let mut config = complete_config();
        config.local.remove("issue.repo");
        config
            .local
            .insert("remote.origin.url", "git@gitlab.example.com:yuroyoro/gitterb.git");
        let settings =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &config).unwrap();
        assert_eq!(settings.repo, "yuroyoro/gitterb");
    }

    #[test]
    fn test_user_falls_back_to_global() {
        let mut config = complete_config();
        config.local.remove("issue.user");
        config.global.insert("gitlab.user", "global-user");
        let settings =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &config).unwrap();
        assert_eq!(settings.user, "global-user");
    }

    #[test]
    fn test_missing_token_names_the_setting() {
        let mut config = complete_config();
        config.local.remove("issue.token");
        let err =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &config).unwrap_err();
        assert!(matches!(err, GitlabError::Configuration(_)));
        let message = err.to_string();
        assert!(message.contains("issue.token"));
        assert!(message.contains("git config issue.token"));
    }

    #[test]
    fn test_missing_url_names_the_setting() {
        let mut config = complete_config();
        config.local.remove("issue.url");
        let err =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &config).unwrap_err();
        assert!(err.to_string().contains("git config issue.url"));
    }

    #[test]
    fn test_tls_settings() {
        let mut config = complete_config();
        config.local.insert("http.sslVerify", "false");
        config.local.insert("http.sslCert", "/etc/gitlab/ca.pem");
        let settings =
            ConnectionSettings::resolve_from(&ConnectionOverrides::default(), &config).unwrap();
        assert!(!settings.verify_tls);
        assert_eq!(settings.ca_path, Some(PathBuf::from("/etc/gitlab/ca.pem")));
    }

    #[test]
    fn test_parse_remote_slug() {
        assert_eq!(
            parse_remote_slug("git@gitlab.example.com:yuroyoro/gitterb.git"),
            Some("yuroyoro/gitterb".to_string())
        );
        assert_eq!(
            parse_remote_slug("https://gitlab.example.com/yuroyoro/gitterb.git"),
            Some("yuroyoro/gitterb".to_string())
        );
        assert_eq!(parse_remote_slug("not a remote"), None);
    }
}
