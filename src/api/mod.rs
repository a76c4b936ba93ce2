//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and handlers
//! that can be used by any HTTP server implementation (`tiny_http`, axum,
//! etc.) or directly by clients such as the CLI.
//!
//! ## Design
//!
//! - **Handlers are plain functions**: Take the site and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorCode};
pub use handlers::{
    begin_edit, begin_new, cancel_form, delete_entry, get_dashboard, get_form, get_session,
    list_section, login, logout, require_admin, send_contact, set_draft, submit_form,
};
pub use types::{
    ApiResponse, CategoryData, DashboardData, DeleteData, DeleteRequest, FormData, ListData,
    LogoutData, SessionData, SubmitData,
};
