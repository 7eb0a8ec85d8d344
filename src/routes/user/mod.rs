mod handler;
pub mod model;

pub use handler::{email_unique, get_all, get_by_id, register, remove, update};
