use serde::{Deserialize, Serialize};

/// State string GitHub reports for open issues
pub const STATE_OPEN: &str = "open";

/// State string GitHub reports for closed issues
pub const STATE_CLOSED: &str = "closed";

/// An issue as the connector sees it.
///
/// Timestamps are kept in the connector wire format (`2010/02/02 22:58:39 -0800`),
/// see [`crate::dates::WIRE_FORMAT`]. Everything is optional because an issue
/// built from local edits only carries what the user filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Assigned by GitHub; `None` until the issue is created
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    /// `None` leaves the labels on GitHub untouched; an empty list clears them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub reporter: Option<String>,
    pub votes: Option<u32>,
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.state.as_deref() == Some(STATE_OPEN)
    }

    pub fn is_closed(&self) -> bool {
        self.state.as_deref() == Some(STATE_CLOSED)
    }
}
