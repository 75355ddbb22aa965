pub mod issue;
pub mod validate;
