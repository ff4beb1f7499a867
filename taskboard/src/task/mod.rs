//! Task commands

mod add;
mod mv;
mod update;

pub use add::AddTask;
pub use mv::MoveTask;
pub use update::UpdateTask;
