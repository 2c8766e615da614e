pub mod crud;
pub mod editor;
pub mod forms;
pub mod publish;

pub use crud::{confirm_delete, create, delete, list};
pub use editor::{edit_form, edit_submit};
pub use publish::publish_submit;
