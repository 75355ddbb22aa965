//! Conversions between GitHub REST models and the connector's [`Issue`]

use chrono::DateTime;

use crate::dates::WIRE_FORMAT;
use crate::issue::{Issue, STATE_CLOSED, STATE_OPEN};
use crate::models::*;

/// Convert a REST issue into the connector representation.
///
/// The REST API reports RFC 3339 timestamps; they are normalised to the
/// connector wire format so the task-data mapper only deals with one format.
pub fn github_issue_to_issue(issue: GitHubIssue) -> Issue {
    Issue {
        number: Some(issue.number),
        title: Some(issue.title),
        body: issue.body,
        state: Some(issue.state),
        created_at: Some(to_wire_timestamp(&issue.created_at)),
        updated_at: Some(to_wire_timestamp(&issue.updated_at)),
        closed_at: issue.closed_at.as_deref().map(to_wire_timestamp),
        labels: Some(issue.labels.into_iter().map(|l| l.name).collect()),
        reporter: issue.user.map(|u| u.login),
        votes: issue.reactions.map(|r| r.plus_one),
    }
}

/// Request body for creating `issue`
pub fn create_issue_payload(issue: &Issue) -> CreateGitHubIssue {
    CreateGitHubIssue {
        title: issue.title.clone().unwrap_or_default(),
        body: issue.body.clone(),
        labels: issue.labels.clone().filter(|labels| !labels.is_empty()),
    }
}

/// Request body for editing the content of `issue`.
///
/// The state is left alone, and so are the labels unless `issue` carries them.
pub fn edit_issue_payload(issue: &Issue) -> UpdateGitHubIssue {
    UpdateGitHubIssue {
        title: issue.title.clone(),
        body: issue.body.clone(),
        state: None,
        labels: issue.labels.clone(),
    }
}

/// Request body that only moves an issue to `open` or `closed`
pub fn state_payload(close: bool) -> UpdateGitHubIssue {
    UpdateGitHubIssue {
        state: Some(if close { STATE_CLOSED } else { STATE_OPEN }.to_string()),
        ..Default::default()
    }
}

fn to_wire_timestamp(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.format(WIRE_FORMAT).to_string())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_issue() -> GitHubIssue {
        serde_json::from_value(serde_json::json!({
            "id": 1042,
            "number": 42,
            "title": "Bug",
            "body": null,
            "state": "closed",
            "labels": [
                {"id": 1, "name": "bug", "color": "fc2929", "description": null},
                {"id": 2, "name": "ui", "color": "84b6eb", "description": null}
            ],
            "created_at": "2010-02-03T06:58:39Z",
            "updated_at": "2010-02-04T08:00:00Z",
            "closed_at": "not a date",
            "user": {"login": "reporter", "id": 2},
            "reactions": {"total_count": 5, "+1": 3},
            "pull_request": null
        }))
        .unwrap()
    }

    #[test]
    fn test_github_issue_to_issue() {
        let issue = github_issue_to_issue(rest_issue());

        assert_eq!(issue.number, Some(42));
        assert_eq!(issue.title.as_deref(), Some("Bug"));
        assert_eq!(issue.body, None);
        assert!(issue.is_closed());
        assert_eq!(issue.created_at.as_deref(), Some("2010/02/03 06:58:39 +0000"));
        assert_eq!(issue.updated_at.as_deref(), Some("2010/02/04 08:00:00 +0000"));
        assert_eq!(issue.closed_at.as_deref(), Some("not a date"));
        assert_eq!(issue.labels, Some(vec!["bug".to_string(), "ui".to_string()]));
        assert_eq!(issue.reporter.as_deref(), Some("reporter"));
        assert_eq!(issue.votes, Some(3));
    }

    #[test]
    fn test_create_payload_omits_empty_labels() {
        let issue = Issue {
            title: Some("New".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(create_issue_payload(&issue)).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }

    #[test]
    fn test_edit_payload_never_touches_state() {
        let issue = Issue {
            number: Some(3),
            title: Some("Edited".to_string()),
            state: Some("closed".to_string()),
            labels: Some(vec!["bug".to_string()]),
            ..Default::default()
        };
        let payload = edit_issue_payload(&issue);
        assert_eq!(payload.state, None);
        assert_eq!(payload.labels, Some(vec!["bug".to_string()]));
    }

    #[test]
    fn test_edit_payload_leaves_unknown_labels_alone() {
        let issue = Issue {
            title: Some("Bug".to_string()),
            body: Some("It breaks".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(edit_issue_payload(&issue)).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Bug", "body": "It breaks"}));

        let cleared = Issue {
            labels: Some(Vec::new()),
            ..issue
        };
        let json = serde_json::to_value(edit_issue_payload(&cleared)).unwrap();
        assert_eq!(json["labels"], serde_json::json!([]));
    }

    #[test]
    fn test_state_payload() {
        let json = serde_json::to_value(state_payload(true)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "closed"}));
        let json = serde_json::to_value(state_payload(false)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "open"}));
    }
}
