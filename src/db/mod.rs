//! Database access layer

pub mod accounts;
pub mod attendance;
pub mod profiles;
pub mod tasks;
