//! # View-State Module
//!
//! The page's in-memory state and the tab router.
//!
//! Invariants held by every transition:
//! - `show_request_modal` implies `selected_mentor.is_some()`
//! - `user_role == Both` implies `is_mentor`
//!
//! Fields are private so the invariants cannot be broken from outside; reads
//! go through accessors and writes through the transition methods.

use crate::error::StateError;
use crate::model::MentorMatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// TAB
// =============================================================================

/// The five views of the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Discover,
    MyRequests,
    MyMentors,
    MentorDashboard,
    Register,
}

impl Tab {
    /// Every tab in tab-bar order.
    pub const ALL: [Tab; 5] = [
        Tab::Discover,
        Tab::MyRequests,
        Tab::MyMentors,
        Tab::MentorDashboard,
        Tab::Register,
    ];

    /// Stable identifier (`discover`, `my-requests`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Discover => "discover",
            Tab::MyRequests => "my-requests",
            Tab::MyMentors => "my-mentors",
            Tab::MentorDashboard => "mentor-dashboard",
            Tab::Register => "register",
        }
    }

    /// Button label in the tab bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tab::Discover => "Find Mentors",
            Tab::MyRequests => "My Requests",
            Tab::MyMentors => "My Mentors",
            Tab::MentorDashboard => "My Mentees",
            Tab::Register => "Become a Mentor",
        }
    }

    /// Whether the tab bar shows this tab for the given mentor flag.
    #[must_use]
    pub fn is_offered(self, is_mentor: bool) -> bool {
        match self {
            Tab::Discover | Tab::MyRequests | Tab::MyMentors => true,
            Tab::MentorDashboard => is_mentor,
            Tab::Register => !is_mentor,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| StateError::UnknownTab(s.to_string()))
    }
}

// =============================================================================
// USER ROLE
// =============================================================================

/// Role of the viewer on the hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Can request mentorship only.
    #[default]
    Mentee,
    /// Registered mentor who can also request mentorship.
    Both,
}

impl UserRole {
    fn for_mentor_flag(is_mentor: bool) -> Self {
        if is_mentor { Self::Both } else { Self::Mentee }
    }
}

// =============================================================================
// UI STATE
// =============================================================================

/// View-state of the Mentorship Hub page.
///
/// Created fresh on mount, mutated by handlers and the loader, dropped on
/// unmount. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    mentors: Vec<MentorMatch>,
    selected_mentor: Option<MentorMatch>,
    show_request_modal: bool,
    loading: bool,
    active_tab: Tab,
    is_mentor: bool,
    user_role: UserRole,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Initial state: loading, on the discover tab, as a mentee.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mentors: Vec::new(),
            selected_mentor: None,
            show_request_modal: false,
            loading: true,
            active_tab: Tab::Discover,
            is_mentor: false,
            user_role: UserRole::Mentee,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn mentors(&self) -> &[MentorMatch] {
        &self.mentors
    }

    #[must_use]
    pub fn selected_mentor(&self) -> Option<&MentorMatch> {
        self.selected_mentor.as_ref()
    }

    #[must_use]
    pub fn show_request_modal(&self) -> bool {
        self.show_request_modal
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    #[must_use]
    pub fn is_mentor(&self) -> bool {
        self.is_mentor
    }

    #[must_use]
    pub fn user_role(&self) -> UserRole {
        self.user_role
    }

    /// Tabs currently offered in the tab bar, in order.
    #[must_use]
    pub fn visible_tabs(&self) -> Vec<Tab> {
        Tab::ALL
            .into_iter()
            .filter(|tab| tab.is_offered(self.is_mentor))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Loader transitions
    // -------------------------------------------------------------------------

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Apply the result of the mentor-flag check.
    pub fn apply_mentor_flag(&mut self, is_mentor: bool) {
        self.is_mentor = is_mentor;
        self.user_role = UserRole::for_mentor_flag(is_mentor);
    }

    /// Replace the mentor list.
    ///
    /// An open modal keeps its own copy of the selected mentor.
    pub fn set_mentors(&mut self, mentors: Vec<MentorMatch>) {
        self.mentors = mentors;
    }

    // -------------------------------------------------------------------------
    // Tab router
    // -------------------------------------------------------------------------

    /// A click on a tab button. Only tabs in the tab bar can be clicked.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), StateError> {
        if !tab.is_offered(self.is_mentor) {
            return Err(StateError::TabUnavailable(tab));
        }
        self.active_tab = tab;
        Ok(())
    }

    /// "Become a Mentor" button: jump to the registration form.
    pub fn become_mentor(&mut self) {
        self.active_tab = Tab::Register;
    }

    /// Registration finished: the viewer is now a mentor.
    pub fn registration_succeeded(&mut self) {
        self.apply_mentor_flag(true);
        self.active_tab = Tab::MentorDashboard;
    }

    // -------------------------------------------------------------------------
    // Request modal
    // -------------------------------------------------------------------------

    /// Select the mentor at `index` of the discover list and open the modal.
    pub fn open_request(&mut self, index: usize) -> Result<&MentorMatch, StateError> {
        let mentor = self
            .mentors
            .get(index)
            .cloned()
            .ok_or(StateError::NoMentorAt {
                index,
                len: self.mentors.len(),
            })?;
        self.show_request_modal = true;
        Ok(self.selected_mentor.insert(mentor))
    }

    /// Close the modal and clear the selection.
    pub fn close_request_modal(&mut self) {
        self.show_request_modal = false;
        self.selected_mentor = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
