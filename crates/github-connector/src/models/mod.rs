pub mod issue;
pub mod label;
pub mod user;

pub use issue::*;
pub use label::*;
pub use user::*;
