pub mod draft;
pub mod queries;
pub mod types;

pub use queries::*;
pub use types::*;
