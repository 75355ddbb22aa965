use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use github_connector::client::DEFAULT_API_URL;
use github_connector::{DateConverter, GitHubClient, GitHubTaskDataHandler, CONNECTOR_KIND};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use task_core::{Credentials, TaskRepository};

/// Connector configuration: repository, account and presentation settings
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Repository URL (https://github.com/user/project)
    pub url: Option<String>,
    /// GitHub user name
    pub user: Option<String>,
    /// GitHub API token
    pub token: Option<String>,
    /// REST API base URL
    pub api_url: String,
    /// chrono pattern used to display dates
    pub date_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            date_format: None,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("GHTASK_").only(&[
            "url",
            "user",
            "token",
            "api_url",
            "date_format",
        ]));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(
        &mut self,
        cli_url: Option<String>,
        cli_user: Option<String>,
        cli_token: Option<String>,
        cli_api_url: Option<String>,
    ) {
        if let Some(url) = cli_url {
            self.url = Some(url);
        }
        if let Some(user) = cli_user {
            self.user = Some(user);
        }
        if let Some(token) = cli_token {
            self.token = Some(token);
        }
        if let Some(api_url) = cli_api_url {
            self.api_url = api_url;
        }
    }

    /// Credentials are only usable when both user and token are set
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => Some(Credentials::new(user, token)),
            _ => None,
        }
    }

    /// The configured task repository; the URL is mandatory
    pub fn repository(&self) -> Result<TaskRepository> {
        let url = self.url.as_deref().ok_or_else(|| {
            anyhow!("Repository URL not configured. Set via --url, GHTASK_URL env var, or config file")
        })?;

        let mut repository = TaskRepository::new(CONNECTOR_KIND, url);
        repository.set_credentials(self.credentials());
        Ok(repository)
    }

    /// Like [`Config::repository`] but also requires credentials
    pub fn authenticated_repository(&self) -> Result<TaskRepository> {
        if self.user.is_none() {
            return Err(anyhow!(
                "GitHub user not configured. Set via --user, GHTASK_USER env var, or config file"
            ));
        }
        if self.token.is_none() {
            return Err(anyhow!(
                "GitHub token not configured. Set via --token, GHTASK_TOKEN env var, or config file"
            ));
        }
        self.repository()
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_base_url(&self.api_url)
    }

    pub fn handler(&self) -> GitHubTaskDataHandler {
        match &self.date_format {
            Some(format) => {
                GitHubTaskDataHandler::with_dates(DateConverter::local().with_display_format(format))
            }
            None => GitHubTaskDataHandler::new(),
        }
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ghtask").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("ghtask").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("ghtask")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join("ghtask.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_core::CredentialSource;

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        config.merge_with_cli(
            Some("https://github.com/octo/demo".to_string()),
            Some("octo".to_string()),
            Some("t0ken".to_string()),
            None,
        );

        assert_eq!(config.api_url, DEFAULT_API_URL);
        let repository = config.authenticated_repository().unwrap();
        assert_eq!(repository.url, "https://github.com/octo/demo");
        assert_eq!(repository.credentials().unwrap().password, "t0ken");
    }

    #[test]
    fn test_credentials_need_user_and_token() {
        let config = Config {
            token: Some("t0ken".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_missing_url_is_reported() {
        let err = Config::default().repository().unwrap_err();
        assert!(err.to_string().contains("Repository URL not configured"));
    }

    #[test]
    fn test_missing_token_is_reported() {
        let config = Config {
            url: Some("https://github.com/octo/demo".to_string()),
            user: Some("octo".to_string()),
            ..Default::default()
        };
        let err = config.authenticated_repository().unwrap_err();
        assert!(err.to_string().contains("token not configured"));
    }
}
