use serde::{Deserialize, Serialize};

/// Username and API token for a repository
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: &str, password: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Something that can hand out repository credentials
pub trait CredentialSource {
    /// The credentials to use, or `None` if none are configured
    fn credentials(&self) -> Option<Credentials>;
}

/// A configured task repository: connector, URL and optional credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRepository {
    pub connector_kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

impl TaskRepository {
    pub fn new(connector_kind: &str, url: &str) -> Self {
        Self {
            connector_kind: connector_kind.to_string(),
            url: url.to_string(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn set_credentials(&mut self, credentials: Option<Credentials>) {
        self.credentials = credentials;
    }
}

impl CredentialSource for TaskRepository {
    fn credentials(&self) -> Option<Credentials> {
        self.credentials.clone()
    }
}
