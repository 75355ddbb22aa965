use serde::{Deserialize, Serialize};

/// Attribute holding the operation selected for submission
pub const OPERATION: &str = "task.common.operation";

/// Prefix of the attributes describing each offered operation
pub const PREFIX_OPERATION: &str = "task.common.operation-";

/// Value type of a task attribute, used by the host to pick an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    ShortText,
    LongRichText,
    DateTime,
    Integer,
    Person,
    MultiSelect,
    Operation,
}

/// Where the host renders an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Default,
    People,
}

/// Presentation metadata attached to every attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAttributeMetaData {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttributeKind>,
    pub label: String,
    pub read_only: bool,
}

impl Default for TaskAttributeMetaData {
    fn default() -> Self {
        Self {
            attribute_type: AttributeType::ShortText,
            kind: None,
            label: String::new(),
            read_only: false,
        }
    }
}

/// A user-selectable state transition offered on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOperation {
    pub operation_id: String,
    pub label: String,
}

impl TaskOperation {
    /// Turn `attribute` into an operation attribute for `operation_id`
    pub fn apply_to(attribute: &mut TaskAttribute, operation_id: &str, label: &str) {
        attribute.meta_data.attribute_type = AttributeType::Operation;
        attribute.meta_data.label = label.to_string();
        attribute.set_value(operation_id);
        attribute.operation = Some(TaskOperation {
            operation_id: operation_id.to_string(),
            label: label.to_string(),
        });
    }
}

/// A single field of a task: id, zero or more values, metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAttribute {
    pub id: String,
    #[serde(default)]
    pub values: Vec<String>,
    pub meta_data: TaskAttributeMetaData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<TaskOperation>,
}

impl TaskAttribute {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            values: Vec::new(),
            meta_data: TaskAttributeMetaData::default(),
            operation: None,
        }
    }

    /// First value, if any
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn set_value(&mut self, value: &str) {
        self.values = vec![value.to_string()];
    }

    pub fn add_value(&mut self, value: &str) {
        self.values.push(value.to_string());
    }

    pub fn set_values(&mut self, values: Vec<String>) {
        self.values = values;
    }

    pub fn has_value(&self) -> bool {
        !self.values.is_empty()
    }
}

/// The attribute bag the host uses to represent one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskData {
    pub connector_kind: String,
    pub repository_url: String,
    /// Empty for tasks not yet created remotely
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub partial: bool,
    attributes: Vec<TaskAttribute>,
}

impl TaskData {
    pub fn new(connector_kind: &str, repository_url: &str, task_id: &str) -> Self {
        Self {
            connector_kind: connector_kind.to_string(),
            repository_url: repository_url.to_string(),
            task_id: task_id.to_string(),
            version: None,
            partial: false,
            attributes: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.task_id.is_empty()
    }

    pub fn set_version(&mut self, version: &str) {
        self.version = Some(version.to_string());
    }

    pub fn set_partial(&mut self, partial: bool) {
        self.partial = partial;
    }

    /// All root attributes in creation order
    pub fn attributes(&self) -> &[TaskAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, id: &str) -> Option<&TaskAttribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn attribute_mut(&mut self, id: &str) -> Option<&mut TaskAttribute> {
        self.attributes.iter_mut().find(|a| a.id == id)
    }

    /// Create a root attribute, replacing any existing attribute with the same id
    pub fn create_attribute(&mut self, id: &str) -> &mut TaskAttribute {
        let index = match self.attributes.iter().position(|a| a.id == id) {
            Some(index) => {
                self.attributes[index] = TaskAttribute::new(id);
                index
            }
            None => {
                self.attributes.push(TaskAttribute::new(id));
                self.attributes.len() - 1
            }
        };
        &mut self.attributes[index]
    }

    /// The attribute `id`, created without metadata if missing
    pub fn ensure_attribute(&mut self, id: &str) -> &mut TaskAttribute {
        let index = match self.attributes.iter().position(|a| a.id == id) {
            Some(index) => index,
            None => {
                self.attributes.push(TaskAttribute::new(id));
                self.attributes.len() - 1
            }
        };
        &mut self.attributes[index]
    }

    /// First value of the attribute `id`
    pub fn value(&self, id: &str) -> Option<&str> {
        self.attribute(id).and_then(TaskAttribute::value)
    }

    /// Operations offered on this task, in creation order
    pub fn operations(&self) -> Vec<&TaskOperation> {
        self.attributes
            .iter()
            .filter(|a| a.id.starts_with(PREFIX_OPERATION))
            .filter_map(|a| a.operation.as_ref())
            .collect()
    }

    /// Id of the operation currently selected for submission
    pub fn selected_operation_id(&self) -> Option<&str> {
        self.value(OPERATION)
    }

    /// Select the operation to apply on the next submission
    pub fn select_operation(&mut self, operation_id: &str) {
        let attr = self.ensure_attribute(OPERATION);
        attr.meta_data.attribute_type = AttributeType::Operation;
        attr.set_value(operation_id);
    }
}

/// Outcome of posting task data to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    TaskCreated,
    TaskUpdated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResponse {
    pub kind: ResponseKind,
    pub task_id: String,
}

impl RepositoryResponse {
    pub fn new(kind: ResponseKind, task_id: &str) -> Self {
        Self {
            kind,
            task_id: task_id.to_string(),
        }
    }
}
