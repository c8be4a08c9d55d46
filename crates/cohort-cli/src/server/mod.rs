//! Web server: upload-and-analyze API plus the embedded dashboard.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
