use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `http(s)://<host containing "github">/<user>/<project>`, optional trailing slash
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]*github[^/]*/([^/]+)/([^/]+?)/?$")
        .expect("URL_PATTERN is a valid regex literal")
});

/// `http(s)://<host containing "github">`, anything after the host
static HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/?#]*github[^/?#]*([/?#]|$)")
        .expect("HOST_PATTERN is a valid regex literal")
});

/// Loose pre-check used while the user is still typing a repository URL
pub fn is_valid_url(url: &str) -> bool {
    HOST_PATTERN.is_match(url.trim())
}

/// Owner and project parsed from a repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepositoryUrl {
    pub user: String,
    pub project: String,
}

impl GitHubRepositoryUrl {
    /// Parse a full repository URL, `None` if it does not match the expected pattern
    pub fn parse(url: &str) -> Option<Self> {
        let captures = URL_PATTERN.captures(url.trim())?;
        Some(Self {
            user: captures[1].to_string(),
            project: captures[2].to_string(),
        })
    }

    pub fn new(user: &str, project: &str) -> Self {
        Self {
            user: user.to_string(),
            project: project.to_string(),
        }
    }

    /// Canonical repository URL for `user/project`
    pub fn build_url(user: &str, project: &str) -> String {
        format!("https://github.com/{}/{}", user, project)
    }
}

impl fmt::Display for GitHubRepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.project)
    }
}
