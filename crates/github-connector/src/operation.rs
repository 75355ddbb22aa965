use std::fmt;

/// State transitions offered on an existing GitHub issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubTaskOperation {
    Leave,
    Reopen,
    Close,
}

impl GitHubTaskOperation {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Reopen => "reopen",
            Self::Close => "close",
        }
    }

    pub const fn label(self) -> &'static str {
        self.id()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "leave" => Some(Self::Leave),
            "reopen" => Some(Self::Reopen),
            "close" => Some(Self::Close),
            _ => None,
        }
    }

    /// Label shown for this operation on an issue in `state`
    pub fn label_for(self, state: &str) -> String {
        match self {
            Self::Leave => format!("{}{}", self.label(), state),
            _ => self.label().to_string(),
        }
    }
}

impl fmt::Display for GitHubTaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
