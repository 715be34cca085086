//! staff-hub — employee management web service
//!
//! Employees sign up, log in, edit a profile, mark daily attendance, and
//! complete assigned tasks; administrators log in separately for an
//! aggregate dashboard with bulk task assignment, employee search, and
//! deletion. All state lives in PostgreSQL; sessions are signed cookies;
//! pages are plain server-rendered HTML forms.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── config.rs    # env-driven configuration
//! ├── state.rs     # shared AppState (pool, secrets, media dir)
//! ├── error.rs     # ErrorCode + AppError
//! ├── auth/        # session cookies, role middleware, flash notices
//! ├── db/          # one module per entity, free functions over &PgPool
//! ├── api/         # routers and handlers
//! └── pages.rs     # minimal HTML rendering
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod pages;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
