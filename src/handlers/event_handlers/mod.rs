pub mod crud;

pub use crud::{confirm_delete, create, delete, edit_form, list, new_form, update};
