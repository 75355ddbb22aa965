pub mod error;
pub mod models;
pub mod progress;
pub mod repository;
pub mod schema;

pub use error::{Result, Severity, Status, TaskError};
pub use models::*;
pub use progress::{NullProgressMonitor, ProgressMonitor};
pub use repository::{CredentialSource, Credentials, TaskRepository};
pub use schema::{AttributeDescriptor, AttributeSchema};
