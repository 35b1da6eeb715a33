//! # Auth Module
//!
//! The authentication capability the page depends on.
//!
//! Authentication itself happens elsewhere. The page only asks who is logged
//! in and whether the session is authenticated, through [`AuthContext`],
//! which is passed in rather than read from ambient state.

use crate::model::{AuthenticatedUser, EmployeeId};

/// Read-only view of the current session.
pub trait AuthContext {
    /// The logged-in user, if any.
    fn current_user(&self) -> Option<AuthenticatedUser>;

    /// Whether the session is authenticated.
    fn is_authenticated(&self) -> bool;

    /// The employee identifier of the logged-in user, if it resolves.
    fn employee_id(&self) -> Option<EmployeeId> {
        self.current_user()
            .and_then(|user| user.employee_id().cloned())
    }
}

/// An auth context fixed at construction time.
///
/// Authenticated exactly when a user is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAuth {
    user: Option<AuthenticatedUser>,
}

impl StaticAuth {
    /// A logged-in session.
    #[must_use]
    pub fn logged_in(user: AuthenticatedUser) -> Self {
        Self { user: Some(user) }
    }

    /// No session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthContext for StaticAuth {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.user.clone()
    }

    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
