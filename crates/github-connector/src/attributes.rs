//! The fixed attribute table of the GitHub connector

use task_core::{AttributeDescriptor, AttributeKind, AttributeSchema, AttributeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHubTaskAttribute {
    Key,
    Title,
    Body,
    Status,
    CreationDate,
    ModificationDate,
    ClosedDate,
    Label,
    Votes,
    ReportedBy,
}

const fn descriptor(
    id: &'static str,
    label: &'static str,
    attribute_type: AttributeType,
    kind: Option<AttributeKind>,
    read_only: bool,
    init_task: bool,
    required_for_full_data: bool,
) -> AttributeDescriptor {
    AttributeDescriptor {
        id,
        label,
        attribute_type,
        kind,
        read_only,
        init_task,
        required_for_full_data,
    }
}

impl GitHubTaskAttribute {
    pub const ALL: [GitHubTaskAttribute; 10] = [
        Self::Key,
        Self::Title,
        Self::Body,
        Self::Status,
        Self::CreationDate,
        Self::ModificationDate,
        Self::ClosedDate,
        Self::Label,
        Self::Votes,
        Self::ReportedBy,
    ];

    #[rustfmt::skip]
    pub const fn descriptor(self) -> AttributeDescriptor {
        use AttributeKind::{Default, People};
        use AttributeType::*;

        match self {
            Self::Key => descriptor("task.common.key", "Key:", ShortText, None, true, false, false),
            Self::Title => descriptor("task.common.summary", "Summary:", ShortText, None, false, true, true),
            Self::Body => descriptor("task.common.description", "Description:", LongRichText, None, false, true, true),
            Self::Status => descriptor("task.common.status", "Status:", ShortText, Some(Default), true, false, true),
            Self::CreationDate => descriptor("task.common.date.created", "Created:", DateTime, Some(Default), true, false, false),
            Self::ModificationDate => descriptor("task.common.date.modified", "Modified:", DateTime, Some(Default), true, false, false),
            Self::ClosedDate => descriptor("task.common.date.completed", "Closed:", DateTime, Some(Default), true, false, false),
            Self::Label => descriptor("github.issue.labels", "Labels:", MultiSelect, Some(Default), false, true, false),
            Self::Votes => descriptor("github.issue.votes", "Votes:", Integer, Some(Default), true, false, false),
            Self::ReportedBy => descriptor("task.common.user.reporter", "Reported by:", Person, Some(People), true, false, false),
        }
    }

    pub const fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

impl AttributeSchema for GitHubTaskAttribute {
    fn descriptors() -> Vec<AttributeDescriptor> {
        Self::ALL.iter().map(|a| a.descriptor()).collect()
    }
}
