//! # Mentorship Core
//!
//! The deterministic logic behind the Mentorship Hub page.
//!
//! This crate owns everything that does not touch the network:
//! - The data model exchanged with the backend ([`MentorMatch`], [`EmployeeRecord`])
//! - Tenure computation ([`tenure::compute_years`])
//! - The name-keyed employee directory join ([`DirectoryIndex`])
//! - The view-state store and tab router ([`UiState`], [`Tab`])
//! - Guard rendering and the page view model ([`PageView`])
//! - The authentication capability ([`AuthContext`])
//!
//! Async loading, the HTTP client and user notifications live in the app
//! layer (`apps/mentorship-hub`).
//!
//! ```text
//! auth context ─► API client ─► data loader ─► UiState ─► tab router ─► PageView
//!   (core)          (app)          (app)        (core)      (core)        (core)
//! ```

pub mod auth;
pub mod directory;
pub mod error;
pub mod model;
pub mod state;
pub mod tenure;
pub mod view;

pub use auth::{AuthContext, StaticAuth};
pub use directory::DirectoryIndex;
pub use error::StateError;
pub use model::{AuthenticatedUser, EmployeeId, EmployeeRecord, MentorMatch, RequestForm};
pub use state::{Tab, UiState, UserRole};
pub use view::{HubView, MentorCard, PageView, TabBody, TabButton};
