//! # Mentorship Hub
//!
//! Drives the Mentorship Hub page: talks to the HR backend, loads and
//! enriches mentor data, and handles user actions on top of the pure
//! view-state in `mentorship-core`.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod notify;
pub mod page;

pub use api::{HttpMentorshipApi, MentorshipApi};
pub use error::ApiError;
pub use page::MentorshipPage;

// Re-export mentorship_core for convenience
pub use mentorship_core;
