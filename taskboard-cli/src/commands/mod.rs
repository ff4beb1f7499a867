//! Command implementations

pub mod board;
pub mod labels;
pub mod session;
