//! Comment commands

mod add;

pub use add::{AddComment, PLACEHOLDER_USER_ID, PLACEHOLDER_USER_NAME};
