//! # View Module
//!
//! Guard rendering and the page view model.
//!
//! [`PageView::render`] turns the view-state plus the auth context into one of
//! four mutually exclusive views, checked in order:
//! 1. loading -> spinner
//! 2. not authenticated -> login prompt
//! 3. no resolvable employee id -> contact-support message
//! 4. the tabbed hub
//!
//! The view model carries structure only. [`PageView::to_text`] is a plain
//! text rendering used by the CLI.

use crate::auth::AuthContext;
use crate::model::{EmployeeId, MentorMatch};
use crate::state::{Tab, UiState};
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const LOGIN_MESSAGE: &str = "Please log in to access the Mentorship Hub";
pub const MISSING_ID_MESSAGE: &str = "Employee ID not found. Please contact support.";
pub const EMPTY_DISCOVER_MESSAGE: &str = "No mentors available";
pub const TITLE: &str = "Mentorship Hub";

// =============================================================================
// VIEW MODEL
// =============================================================================

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    LoginRequired,
    MissingEmployeeId,
    Hub(HubView),
}

/// The main tabbed interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubView {
    pub employee_id: EmployeeId,
    /// "Logged in as" text: name, else email.
    pub logged_in_as: Option<String>,
    /// The header's "Become a Mentor" button.
    pub show_become_mentor: bool,
    pub tabs: Vec<TabButton>,
    pub body: TabBody,
    /// Mentor shown in the request modal, when open.
    pub request_modal: Option<MentorMatch>,
}

/// One button of the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabButton {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

/// Content of the active tab.
///
/// Every tab other than discover is a child view parameterised solely by
/// the employee id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "kebab-case")]
pub enum TabBody {
    Discover { cards: Vec<MentorCard> },
    MyRequests { employee_id: EmployeeId },
    MyMentors { employee_id: EmployeeId },
    MentorDashboard { employee_id: EmployeeId },
    Register { employee_id: EmployeeId },
}

/// A mentor card on the discover tab. `index` is what a request click reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentorCard {
    pub index: usize,
    pub mentor: MentorMatch,
}

impl PageView {
    /// Render the page for the given state and session.
    pub fn render<A: AuthContext + ?Sized>(state: &UiState, auth: &A) -> Self {
        if state.loading() {
            return Self::Loading;
        }
        if !auth.is_authenticated() {
            return Self::LoginRequired;
        }
        let Some(employee_id) = auth.employee_id() else {
            return Self::MissingEmployeeId;
        };

        let active = state.active_tab();
        let tabs = state
            .visible_tabs()
            .into_iter()
            .map(|tab| TabButton {
                tab,
                label: tab.label(),
                active: tab == active,
            })
            .collect();

        let body = match active {
            Tab::Discover => TabBody::Discover {
                cards: state
                    .mentors()
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(index, mentor)| MentorCard { index, mentor })
                    .collect(),
            },
            Tab::MyRequests => TabBody::MyRequests {
                employee_id: employee_id.clone(),
            },
            Tab::MyMentors => TabBody::MyMentors {
                employee_id: employee_id.clone(),
            },
            Tab::MentorDashboard => TabBody::MentorDashboard {
                employee_id: employee_id.clone(),
            },
            Tab::Register => TabBody::Register {
                employee_id: employee_id.clone(),
            },
        };

        let request_modal = if state.show_request_modal() {
            state.selected_mentor().cloned()
        } else {
            None
        };

        Self::Hub(HubView {
            employee_id,
            logged_in_as: auth
                .current_user()
                .and_then(|u| u.display_name().map(str::to_string)),
            show_become_mentor: !state.is_mentor(),
            tabs,
            body,
            request_modal,
        })
    }

    /// Format as plain text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Loading => format!("{LOADING_MESSAGE}\n"),
            Self::LoginRequired => format!("{LOGIN_MESSAGE}\n"),
            Self::MissingEmployeeId => format!("{MISSING_ID_MESSAGE}\n"),
            Self::Hub(hub) => hub.to_text(),
        }
    }
}

impl HubView {
    /// The active tab button, if any.
    #[must_use]
    pub fn active_tab(&self) -> Option<Tab> {
        self.tabs.iter().find(|b| b.active).map(|b| b.tab)
    }

    fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str(&format!("│ {TITLE}\n"));
        output.push_str(&format!(
            "│ Logged in as: {}\n",
            self.logged_in_as.as_deref().unwrap_or("")
        ));
        if self.show_become_mentor {
            output.push_str("│ [Become a Mentor]\n");
        }
        output.push_str("├─────────────────────────────────────┤\n");

        let bar = self
            .tabs
            .iter()
            .map(|b| {
                if b.active {
                    format!("*{}*", b.label)
                } else {
                    b.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        output.push_str(&format!("│ {bar}\n"));
        output.push_str("├─────────────────────────────────────┤\n");

        match &self.body {
            TabBody::Discover { cards } if cards.is_empty() => {
                output.push_str(&format!("│ {EMPTY_DISCOVER_MESSAGE}\n"));
            }
            TabBody::Discover { cards } => {
                for card in cards {
                    let years = match card.mentor.years_label() {
                        Some(years) => format!("{years} yrs experience"),
                        None => String::from("experience unknown"),
                    };
                    output.push_str(&format!(
                        "│ [{}] {} ({}), {} [Request Mentorship]\n",
                        card.index, card.mentor.mentor_name, card.mentor.mentor_id, years
                    ));
                }
            }
            TabBody::MyRequests { employee_id } => {
                output.push_str(&format!("│ Pending mentorship requests for {employee_id}\n"));
            }
            TabBody::MyMentors { employee_id } => {
                output.push_str(&format!("│ Active mentorships for {employee_id}\n"));
            }
            TabBody::MentorDashboard { employee_id } => {
                output.push_str(&format!("│ Mentor dashboard for {employee_id}\n"));
            }
            TabBody::Register { employee_id } => {
                output.push_str(&format!("│ Mentor registration form for {employee_id}\n"));
            }
        }

        if let Some(mentor) = &self.request_modal {
            output.push_str("├─────────────────────────────────────┤\n");
            output.push_str(&format!(
                "│ Request mentorship from {} ({})\n",
                mentor.mentor_name, mentor.mentor_id
            ));
        }

        output.push_str("└─────────────────────────────────────┘\n");
        output
    }
}

// =============================================================================
// TESTS
// =============================================================================
