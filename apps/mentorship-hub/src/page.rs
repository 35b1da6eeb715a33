//! # Mentorship Page
//!
//! The page controller: owns the view-state, runs the loader, and handles
//! user actions.
//!
//! Everything runs on one task and mutates state through `&mut self`, so no
//! locking is involved. Loads are tagged with a generation number: starting
//! a load or switching identity bumps it, and an outcome carrying an older
//! generation is dropped instead of applied.

use crate::api::{MentorshipApi, MentorshipRequest};
use crate::loader::{load_initial_data, LoadOutcome};
use crate::notify::{Notice, Notifier};
use chrono::{DateTime, Utc};
use mentorship_core::{
    AuthContext, EmployeeId, MentorMatch, PageView, RequestForm, StateError, Tab, UiState,
};
use tracing::{debug, info, warn};

/// Source of the current time for tenure computation.
pub type Clock = fn() -> DateTime<Utc>;

/// Handle for one in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    employee_id: EmployeeId,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }
}

/// The Mentorship Hub page.
pub struct MentorshipPage<A, U, N> {
    api: A,
    auth: U,
    notifier: N,
    state: UiState,
    generation: u64,
    clock: Clock,
}

impl<A, U, N> MentorshipPage<A, U, N>
where
    A: MentorshipApi,
    U: AuthContext,
    N: Notifier,
{
    /// A freshly mounted page in its initial (loading) state.
    pub fn new(api: A, auth: U, notifier: N) -> Self {
        Self {
            api,
            auth,
            notifier,
            state: UiState::new(),
            generation: 0,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Generation of the most recent load or identity switch.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The viewer's employee id, if the auth context resolves one.
    #[must_use]
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.auth.employee_id()
    }

    /// Render the current view.
    #[must_use]
    pub fn view(&self) -> PageView {
        PageView::render(&self.state, &self.auth)
    }

    // =========================================================================
    // LOADING
    // =========================================================================

    /// Mount: load when authenticated with an employee id, otherwise just
    /// stop loading without touching the network.
    pub async fn mount(&mut self) {
        if self.auth.is_authenticated() && self.employee_id().is_some() {
            self.reload().await;
        } else {
            debug!("No authenticated employee; skipping initial load");
            self.state.finish_loading();
        }
    }

    /// Run the loader for the current identity and apply its outcome.
    pub async fn reload(&mut self) {
        let Some(ticket) = self.begin_load() else {
            self.state.finish_loading();
            return;
        };
        let now = (self.clock)();
        let outcome = load_initial_data(&self.api, ticket.employee_id(), now).await;
        self.finish_load(ticket, outcome);
    }

    /// Start a load: bump the generation and set `loading`.
    ///
    /// Returns `None` when no employee id resolves.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let employee_id = self.employee_id()?;
        self.generation += 1;
        self.state.begin_loading();
        Some(LoadTicket {
            generation: self.generation,
            employee_id,
        })
    }

    /// Apply a load outcome unless a newer load or identity switch happened
    /// since `ticket` was issued. Returns whether it was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                employee_id = %ticket.employee_id,
                "Dropping stale load outcome"
            );
            return false;
        }
        if let Some(is_mentor) = outcome.is_mentor {
            self.state.apply_mentor_flag(is_mentor);
        }
        if let Some(mentors) = outcome.mentors {
            self.state.set_mentors(mentors);
        }
        self.state.finish_loading();
        true
    }

    /// The auth context changed (login, logout, different user).
    ///
    /// The page remounts from the initial state, so nothing loaded or
    /// selected for the previous identity survives, and any load still in
    /// flight for it is invalidated.
    pub async fn switch_identity(&mut self, auth: U) {
        self.auth = auth;
        self.generation += 1;
        self.state = UiState::new();
        self.mount().await;
    }

    // =========================================================================
    // HANDLERS
    // =========================================================================

    /// A tab-bar click.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), StateError> {
        self.state.select_tab(tab)
    }

    /// "Become a Mentor" button.
    pub fn handle_become_mentor(&mut self) {
        self.state.become_mentor();
    }

    /// The registration form reported success: promote and reload.
    pub async fn handle_registration_success(&mut self) {
        info!("Mentor registration succeeded");
        self.state.registration_succeeded();
        self.reload().await;
    }

    /// "Request Mentorship" on the card at `index`: select it and open the modal.
    pub fn open_request(&mut self, index: usize) -> Result<&MentorMatch, StateError> {
        self.state.open_request(index)
    }

    /// The modal's close button.
    pub fn close_request_modal(&mut self) {
        self.state.close_request_modal();
    }

    /// Submit the request modal for the selected mentor.
    ///
    /// On success the user is notified and the modal closes. On failure the
    /// user is notified and the modal stays open with its selection, ready
    /// for another attempt. Returns whether the request was sent.
    pub async fn handle_request_mentorship(&mut self, form: RequestForm) -> bool {
        let request = match (self.employee_id(), self.state.selected_mentor()) {
            (Some(employee_id), Some(mentor)) => {
                MentorshipRequest::new(employee_id, mentor.mentor_id.clone(), form)
            }
            _ => {
                warn!("Mentorship request submitted without employee id or selected mentor");
                self.notifier.notify(Notice::RequestFailed);
                return false;
            }
        };

        match self.api.request_mentorship(&request).await {
            Ok(()) => {
                info!(mentor_id = %request.mentor_id, "Mentorship request sent");
                self.notifier.notify(Notice::RequestSent);
                self.state.close_request_modal();
                true
            }
            Err(err) => {
                warn!(mentor_id = %request.mentor_id, error = %err, "Mentorship request failed");
                self.notifier.notify(Notice::RequestFailed);
                false
            }
        }
    }
}
