//! Sessions, role checks, and one-shot flash notices

pub mod flash;
pub mod middleware;
pub mod session;

pub use middleware::{CurrentUser, require_admin, require_employee, session_account};
