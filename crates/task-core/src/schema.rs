//! Declarative attribute schemas and the generic checks built on them

use crate::models::{AttributeKind, AttributeType, TaskAttribute, TaskData};

/// Static description of one task attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub attribute_type: AttributeType,
    pub kind: Option<AttributeKind>,
    pub read_only: bool,
    /// Created when a new task is initialised
    pub init_task: bool,
    /// Must carry a value for the task data to be complete
    pub required_for_full_data: bool,
}

impl AttributeDescriptor {
    /// Create the attribute on `data` with this descriptor's metadata and no values
    pub fn create<'a>(&self, data: &'a mut TaskData) -> &'a mut TaskAttribute {
        let attr = data.create_attribute(self.id);
        attr.meta_data.attribute_type = self.attribute_type;
        attr.meta_data.kind = self.kind;
        attr.meta_data.label = self.label.to_string();
        attr.meta_data.read_only = self.read_only;
        attr
    }
}

/// A connector's fixed attribute table
pub trait AttributeSchema {
    fn descriptors() -> Vec<AttributeDescriptor>;

    /// Create every init-flagged attribute on `data`, leaving values empty
    fn initialize(data: &mut TaskData) {
        for descriptor in Self::descriptors().iter().filter(|d| d.init_task) {
            descriptor.create(data);
        }
    }

    /// Ids of required attributes that are missing or carry no value
    fn missing_required(data: &TaskData) -> Vec<&'static str> {
        Self::descriptors()
            .into_iter()
            .filter(|d| d.required_for_full_data)
            .filter(|d| !data.attribute(d.id).is_some_and(TaskAttribute::has_value))
            .map(|d| d.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoFields;

    impl AttributeSchema for TwoFields {
        fn descriptors() -> Vec<AttributeDescriptor> {
            vec![
                AttributeDescriptor {
                    id: "summary",
                    label: "Summary:",
                    attribute_type: AttributeType::ShortText,
                    kind: None,
                    read_only: false,
                    init_task: true,
                    required_for_full_data: true,
                },
                AttributeDescriptor {
                    id: "key",
                    label: "Key:",
                    attribute_type: AttributeType::ShortText,
                    kind: Some(AttributeKind::Default),
                    read_only: true,
                    init_task: false,
                    required_for_full_data: false,
                },
            ]
        }
    }

    #[test]
    fn test_initialize_only_creates_init_attributes() {
        let mut data = TaskData::new("test", "url", "");
        TwoFields::initialize(&mut data);

        assert_eq!(data.attributes().len(), 1);
        let attr = data.attribute("summary").unwrap();
        assert!(!attr.has_value());
        assert_eq!(attr.meta_data.label, "Summary:");
    }

    #[test]
    fn test_missing_required_treats_empty_as_absent() {
        let mut data = TaskData::new("test", "url", "1");
        assert_eq!(TwoFields::missing_required(&data), vec!["summary"]);

        data.create_attribute("summary");
        assert_eq!(TwoFields::missing_required(&data), vec!["summary"]);

        data.create_attribute("summary").set_value("Bug");
        assert!(TwoFields::missing_required(&data).is_empty());
    }
}
