//! # Error Module
//!
//! Errors raised by view-state transitions.

use crate::state::Tab;
use thiserror::Error;

/// A view-state transition that the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The tab has no button in the current tab bar.
    #[error("tab '{0}' is not available for the current role")]
    TabUnavailable(Tab),

    /// No mentor card exists at the requested position.
    #[error("no mentor at position {index} (list has {len})")]
    NoMentorAt { index: usize, len: usize },

    /// Unknown tab identifier.
    #[error("unknown tab '{0}'")]
    UnknownTab(String),
}
