//! Integration tests for the Mentorship Hub page controller.
//!
//! Uses an in-memory backend and a recording notifier.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mentorship_hub::api::{
    EmployeeDetail, EmployeeList, MentorCheck, MentorMatches, MentorshipApi, MentorshipRequest,
};
use mentorship_hub::loader::{enrich_matches, LoadOutcome};
use mentorship_hub::notify::{Notice, Notifier};
use mentorship_hub::{ApiError, MentorshipPage};
use mentorship_core::{
    tenure, AuthenticatedUser, EmployeeId, EmployeeRecord, MentorMatch, PageView, RequestForm,
    StaticAuth, Tab, TabBody, UserRole,
};
use serde_json::json;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Barrier;

// =============================================================================
// HELPERS
// =============================================================================

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

fn failure(what: &str) -> ApiError {
    ApiError::Server {
        status: 500,
        message: format!("{what} unavailable"),
    }
}

/// In-memory backend. `None` responses fail with a server error.
#[derive(Default)]
struct FakeApi {
    is_mentor: Mutex<Option<bool>>,
    matches: Option<Vec<MentorMatch>>,
    directory: Option<Vec<EmployeeRecord>>,
    details: BTreeMap<String, EmployeeRecord>,
    reject_requests: bool,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<MentorshipRequest>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            is_mentor: Mutex::new(Some(false)),
            matches: Some(Vec::new()),
            directory: Some(Vec::new()),
            ..Self::default()
        }
    }

    fn with_matches(mut self, matches: Vec<MentorMatch>) -> Self {
        self.matches = Some(matches);
        self
    }

    fn with_directory(mut self, directory: Vec<EmployeeRecord>) -> Self {
        self.directory = Some(directory);
        self
    }

    fn with_detail(mut self, id: &str, hire_date: &str) -> Self {
        let mut record = EmployeeRecord::new(id, "");
        record.hire_date = Some(hire_date.to_string());
        self.details.insert(id.to_string(), record);
        self
    }

    fn set_mentor_flag(&self, flag: Option<bool>) {
        *self.is_mentor.lock().unwrap() = flag;
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl MentorshipApi for FakeApi {
    async fn check_if_mentor(&self, employee_id: &EmployeeId) -> Result<MentorCheck, ApiError> {
        self.log(format!("check_if_mentor:{employee_id}"));
        let flag = *self.is_mentor.lock().unwrap();
        flag.map(|is_mentor| MentorCheck { is_mentor })
            .ok_or_else(|| failure("mentor check"))
    }

    async fn get_mentor_matches(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<MentorMatches, ApiError> {
        self.log(format!("get_mentor_matches:{employee_id}"));
        self.matches
            .clone()
            .map(|mentor_matches| MentorMatches { mentor_matches })
            .ok_or_else(|| failure("matches"))
    }

    async fn request_mentorship(&self, request: &MentorshipRequest) -> Result<(), ApiError> {
        self.log(format!("request_mentorship:{}", request.mentor_id));
        if self.reject_requests {
            return Err(failure("requests"));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn list_employees(&self) -> Result<EmployeeList, ApiError> {
        self.log("list_employees".to_string());
        self.directory
            .clone()
            .map(|data| EmployeeList { data })
            .ok_or_else(|| failure("directory"))
    }

    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeDetail, ApiError> {
        self.log(format!("get_employee:{employee_id}"));
        self.details
            .get(employee_id.as_str())
            .cloned()
            .map(|data| EmployeeDetail { data })
            .ok_or_else(|| failure("employee detail"))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

type TestPage = MentorshipPage<FakeApi, StaticAuth, RecordingNotifier>;

fn e100() -> StaticAuth {
    StaticAuth::logged_in(AuthenticatedUser::new("E100").with_name("Erin"))
}

fn page(api: FakeApi, auth: StaticAuth) -> TestPage {
    MentorshipPage::new(api, auth, RecordingNotifier::default()).with_clock(fixed_now)
}

fn form() -> RequestForm {
    RequestForm {
        goals: "Grow into tech lead".into(),
        message: "Hi!".into(),
        frequency: "biweekly".into(),
        preferred_time: "mornings".into(),
    }
}

fn two_mentors() -> FakeApi {
    FakeApi::new().with_matches(vec![
        MentorMatch::new("M1", "Alice").with_years(8),
        MentorMatch::new("M2", "Bob").with_years(3),
    ])
}

// =============================================================================
// GUARD TESTS
// =============================================================================

#[tokio::test]
async fn test_page_starts_loading() {
    let page = page(FakeApi::new(), e100());
    assert!(page.state().loading());
    assert_eq!(page.view(), PageView::Loading);
}

#[tokio::test]
async fn test_unauthenticated_shows_login_and_makes_no_calls() {
    let mut page = page(two_mentors(), StaticAuth::anonymous());
    page.mount().await;

    assert!(!page.state().loading());
    assert_eq!(page.view(), PageView::LoginRequired);
    assert!(page.api().calls().is_empty());
}

#[tokio::test]
async fn test_missing_employee_id_shows_support_message() {
    let auth = StaticAuth::logged_in(AuthenticatedUser::without_employee_id().with_name("Erin"));
    let mut page = page(two_mentors(), auth);
    page.mount().await;

    assert_eq!(page.view(), PageView::MissingEmployeeId);
    assert!(page.api().calls().is_empty());
}

// =============================================================================
// LOADER TESTS
// =============================================================================

#[tokio::test]
async fn test_enrichment_scenario() {
    let api = FakeApi::new()
        .with_matches(vec![MentorMatch::new("M1", "Alice").with_years(0)])
        .with_directory(vec![EmployeeRecord::new("X1", "Alice")])
        .with_detail("X1", "2015-01-01");
    let mut page = page(api, e100());
    page.mount().await;

    let expected = tenure::compute_years(Some("2015-01-01"), fixed_now());
    assert_eq!(expected, 11);

    let state = page.state();
    assert!(!state.loading());
    assert_eq!(state.mentors().len(), 1);
    assert_eq!(state.mentors()[0].years_experience, Some(json!(expected)));
    assert_eq!(state.active_tab(), Tab::Discover);
    assert!(!state.is_mentor());
    assert_eq!(state.user_role(), UserRole::Mentee);

    assert_eq!(
        page.api().calls(),
        vec![
            "check_if_mentor:E100",
            "get_mentor_matches:E100",
            "list_employees",
            "get_employee:X1",
        ]
    );
}

#[tokio::test]
async fn test_enrichment_never_lowers_positive_years() {
    let api = FakeApi::new()
        .with_matches(vec![
            MentorMatch::new("M1", "Alice").with_years(20),
            MentorMatch::new("M2", "Bob"),
        ])
        .with_directory(vec![
            EmployeeRecord::new("X1", "Alice"),
            EmployeeRecord::new("X2", "Bob"),
        ])
        .with_detail("X1", "2025-01-01")
        .with_detail("X2", "2020-01-01");
    let mut page = page(api, e100());
    page.mount().await;

    let mentors = page.state().mentors();
    assert_eq!(mentors[0].years_experience, Some(json!(20)));
    assert_eq!(mentors[1].years_experience, Some(json!(6)));
    assert_eq!(page.api().count("get_employee:X1"), 0);
}

#[tokio::test]
async fn test_fractional_years_survive_enrichment() {
    let api = FakeApi::new()
        .with_matches(vec![
            MentorMatch::new("M1", "Alice").with_years(0.5),
            MentorMatch::new("M2", "Bob").with_years(7.9),
            MentorMatch::new("M3", "Carol"),
        ])
        .with_directory(vec![
            EmployeeRecord::new("X1", "Alice"),
            EmployeeRecord::new("X2", "Bob"),
            EmployeeRecord::new("X3", "Carol"),
        ])
        .with_detail("X1", "2020-01-01")
        .with_detail("X2", "2020-01-01")
        .with_detail("X3", "2020-01-01");
    let mut page = page(api, e100());
    page.mount().await;

    let mentors = page.state().mentors();
    assert_eq!(mentors[0].years_experience, Some(json!(0.5)));
    assert_eq!(mentors[1].years_experience, Some(json!(7.9)));
    assert_eq!(mentors[2].years_experience, Some(json!(6)));
    assert_eq!(page.api().count("get_employee"), 1);

    let wire = serde_json::to_value(&mentors[1]).unwrap();
    assert_eq!(wire["years_experience"], json!(7.9));
}

#[tokio::test]
async fn test_directory_failure_keeps_original_matches() {
    let original = vec![
        MentorMatch::new("M1", "Alice").with_years(0),
        MentorMatch::new("M2", "Bob"),
    ];
    let mut api = FakeApi::new().with_matches(original.clone());
    api.directory = None;
    let mut page = page(api, e100());
    page.mount().await;

    assert!(!page.state().loading());
    assert_eq!(page.state().mentors(), original.as_slice());
    assert_eq!(page.api().count("get_employee"), 0);
}

#[tokio::test]
async fn test_detail_failure_leaves_only_that_match_unchanged() {
    let api = FakeApi::new()
        .with_matches(vec![
            MentorMatch::new("M1", "Alice").with_years(0),
            MentorMatch::new("M2", "Bob"),
            MentorMatch::new("M3", "Carol"),
        ])
        .with_directory(vec![
            EmployeeRecord::new("X1", "Alice"),
            EmployeeRecord::new("X2", "Bob"),
        ])
        .with_detail("X2", "2018-06-01");
    let mut page = page(api, e100());
    page.mount().await;

    let mentors = page.state().mentors();
    // X1 detail fails: original zero preserved, not replaced
    assert_eq!(mentors[0].years_experience, Some(json!(0)));
    assert_eq!(mentors[1].years_experience, Some(json!(8)));
    // Carol is not in the directory
    assert_eq!(mentors[2].years_experience, None);
    assert_eq!(page.api().count("get_employee"), 2);
}

#[tokio::test]
async fn test_detail_without_dates_yields_zero() {
    let mut api = FakeApi::new()
        .with_matches(vec![MentorMatch::new("M1", "Alice")])
        .with_directory(vec![EmployeeRecord::new("X1", "Alice")]);
    api.details
        .insert("X1".into(), EmployeeRecord::new("X1", "Alice"));
    let mut page = page(api, e100());
    page.mount().await;

    assert_eq!(page.state().mentors()[0].years_experience, Some(json!(0)));
}

#[tokio::test]
async fn test_duplicate_directory_names_last_write_wins() {
    let api = FakeApi::new()
        .with_matches(vec![MentorMatch::new("M1", "Alice")])
        .with_directory(vec![
            EmployeeRecord::new("X1", "Alice"),
            EmployeeRecord::new("X9", "Alice"),
        ])
        .with_detail("X1", "2001-01-01")
        .with_detail("X9", "2021-01-01");
    let mut page = page(api, e100());
    page.mount().await;

    assert_eq!(page.api().count("get_employee:X9"), 1);
    assert_eq!(page.api().count("get_employee:X1"), 0);
    assert_eq!(page.state().mentors()[0].years_experience, Some(json!(5)));
}

#[tokio::test]
async fn test_mentor_check_failure_stops_load() {
    let api = two_mentors();
    api.set_mentor_flag(None);
    let mut page = page(api, e100());
    page.mount().await;

    assert!(!page.state().loading());
    assert!(page.state().mentors().is_empty());
    assert_eq!(page.api().count("get_mentor_matches"), 0);
    assert!(matches!(page.view(), PageView::Hub(_)));
}

#[tokio::test]
async fn test_match_failure_keeps_mentor_flag() {
    let mut api = FakeApi::new();
    api.set_mentor_flag(Some(true));
    api.matches = None;
    let mut page = page(api, e100());
    page.mount().await;

    assert!(!page.state().loading());
    assert!(page.state().is_mentor());
    assert_eq!(page.state().user_role(), UserRole::Both);
    assert!(page.state().mentors().is_empty());
}

#[tokio::test]
async fn test_empty_match_list_renders_empty_state() {
    let mut page = page(FakeApi::new(), e100());
    page.mount().await;

    let view = page.view();
    assert!(view.to_text().contains("No mentors available"));
    let PageView::Hub(hub) = view else {
        panic!("expected hub");
    };
    assert_eq!(hub.body, TabBody::Discover { cards: Vec::new() });
}

#[tokio::test]
async fn test_enrich_matches_skips_directory_when_nothing_to_enrich() {
    let api = two_mentors();
    let matches = api.matches.clone().unwrap();
    let enriched = enrich_matches(&api, matches.clone(), fixed_now()).await;

    assert_eq!(enriched, matches);
    assert_eq!(api.count("list_employees"), 0);
}

/// Backend whose detail lookups only complete once every one of them has
/// started.
struct RendezvousApi {
    directory: Vec<EmployeeRecord>,
    barrier: Barrier,
}

#[async_trait]
impl MentorshipApi for RendezvousApi {
    async fn check_if_mentor(&self, _: &EmployeeId) -> Result<MentorCheck, ApiError> {
        Ok(MentorCheck::default())
    }

    async fn get_mentor_matches(&self, _: &EmployeeId) -> Result<MentorMatches, ApiError> {
        Ok(MentorMatches::default())
    }

    async fn request_mentorship(&self, _: &MentorshipRequest) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_employees(&self) -> Result<EmployeeList, ApiError> {
        Ok(EmployeeList {
            data: self.directory.clone(),
        })
    }

    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeDetail, ApiError> {
        self.barrier.wait().await;
        let mut record = EmployeeRecord::new(employee_id.as_str(), "");
        record.hire_date = Some("2015-01-01".into());
        Ok(EmployeeDetail { data: record })
    }
}

#[tokio::test]
async fn test_detail_lookups_run_concurrently() {
    let names = ["Alice", "Bob", "Carol"];
    let api = RendezvousApi {
        directory: names
            .iter()
            .enumerate()
            .map(|(i, name)| EmployeeRecord::new(format!("X{i}"), *name))
            .collect(),
        barrier: Barrier::new(names.len()),
    };
    let matches = names
        .iter()
        .enumerate()
        .map(|(i, name)| MentorMatch::new(format!("M{i}"), *name))
        .collect();

    let enriched = tokio::time::timeout(
        Duration::from_secs(5),
        enrich_matches(&api, matches, fixed_now()),
    )
    .await
    .expect("detail lookups were awaited one at a time");

    assert!(enriched.iter().all(|m| m.years_experience == Some(json!(11))));
}

// =============================================================================
// HANDLER TESTS
// =============================================================================

#[tokio::test]
async fn test_request_success_closes_modal_and_notifies_once() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    page.open_request(1).unwrap();
    assert!(page.state().show_request_modal());

    let sent = page.handle_request_mentorship(form()).await;

    assert!(sent);
    assert!(!page.state().show_request_modal());
    assert!(page.state().selected_mentor().is_none());
    assert_eq!(page.notifier().notices(), vec![Notice::RequestSent]);

    let requests = page.api().requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![MentorshipRequest {
            employee_id: EmployeeId::new("E100"),
            mentor_id: EmployeeId::new("M2"),
            goals: "Grow into tech lead".into(),
            message: "Hi!".into(),
            frequency: "biweekly".into(),
            preferred_time: "mornings".into(),
        }]
    );
}

#[tokio::test]
async fn test_request_failure_keeps_modal_open_for_retry() {
    let mut api = two_mentors();
    api.reject_requests = true;
    let mut page = page(api, e100());
    page.mount().await;

    page.open_request(0).unwrap();
    let sent = page.handle_request_mentorship(form()).await;

    assert!(!sent);
    assert!(page.state().show_request_modal());
    assert_eq!(
        page.state().selected_mentor().map(|m| m.mentor_id.as_str()),
        Some("M1")
    );
    assert_eq!(page.notifier().notices(), vec![Notice::RequestFailed]);
    assert_eq!(page.api().count("request_mentorship"), 1);
}

#[tokio::test]
async fn test_request_without_selection_fails_without_calling_backend() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    let sent = page.handle_request_mentorship(form()).await;

    assert!(!sent);
    assert_eq!(page.notifier().notices(), vec![Notice::RequestFailed]);
    assert_eq!(page.api().count("request_mentorship"), 0);
}

#[tokio::test]
async fn test_close_modal_clears_selection() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    page.open_request(0).unwrap();
    page.close_request_modal();

    assert!(!page.state().show_request_modal());
    assert!(page.state().selected_mentor().is_none());
    assert!(page.notifier().notices().is_empty());
}

#[tokio::test]
async fn test_become_mentor_opens_registration() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    page.handle_become_mentor();

    let PageView::Hub(hub) = page.view() else {
        panic!("expected hub");
    };
    assert_eq!(hub.active_tab(), Some(Tab::Register));
    assert_eq!(
        hub.body,
        TabBody::Register {
            employee_id: EmployeeId::new("E100")
        }
    );
}

#[tokio::test]
async fn test_registration_success_promotes_and_reloads() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;
    page.handle_become_mentor();

    page.api().set_mentor_flag(Some(true));
    page.handle_registration_success().await;

    let state = page.state();
    assert!(state.is_mentor());
    assert_eq!(state.user_role(), UserRole::Both);
    assert_eq!(state.active_tab(), Tab::MentorDashboard);
    assert!(!state.loading());
    assert_eq!(page.api().count("check_if_mentor"), 2);
    assert!(state.visible_tabs().contains(&Tab::MentorDashboard));
}

#[tokio::test]
async fn test_dashboard_tab_requires_mentor_flag() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    assert!(page.select_tab(Tab::MentorDashboard).is_err());
    page.select_tab(Tab::MyMentors).unwrap();
    assert_eq!(page.state().active_tab(), Tab::MyMentors);
}

// =============================================================================
// GENERATION GUARD TESTS
// =============================================================================

#[tokio::test]
async fn test_stale_load_outcome_is_dropped_after_identity_switch() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;

    let stale = page.begin_load().unwrap();
    assert_eq!(stale.employee_id().as_str(), "E100");

    let other = StaticAuth::logged_in(AuthenticatedUser::new("E200"));
    page.switch_identity(other).await;
    assert_eq!(page.api().count("check_if_mentor:E200"), 1);

    let applied = page.finish_load(
        stale,
        LoadOutcome {
            is_mentor: Some(true),
            mentors: Some(vec![MentorMatch::new("M9", "Mallory")]),
        },
    );

    assert!(!applied);
    assert!(!page.state().is_mentor());
    assert!(
        page.state()
            .mentors()
            .iter()
            .all(|m| m.mentor_name != "Mallory")
    );
}

#[tokio::test]
async fn test_newer_load_supersedes_older_ticket() {
    let mut page = page(FakeApi::new(), e100());
    page.mount().await;

    let first = page.begin_load().unwrap();
    let second = page.begin_load().unwrap();
    assert!(second.generation() > first.generation());

    assert!(!page.finish_load(first, LoadOutcome::default()));
    assert!(page.state().loading());
    assert!(page.finish_load(second, LoadOutcome::default()));
    assert!(!page.state().loading());
}

#[tokio::test]
async fn test_identity_switch_discards_previous_user_state() {
    let api = FakeApi::new().with_matches(vec![MentorMatch::new("M1", "Alice").with_years(4)]);
    api.set_mentor_flag(Some(true));
    let mut page = page(api, e100());
    page.mount().await;
    page.select_tab(Tab::MentorDashboard).unwrap();
    page.open_request(0).unwrap();

    page.api().set_mentor_flag(None);
    page.switch_identity(StaticAuth::logged_in(AuthenticatedUser::new("E200")))
        .await;

    let state = page.state();
    assert!(!state.loading());
    assert!(!state.is_mentor());
    assert_eq!(state.user_role(), UserRole::Mentee);
    assert_eq!(state.active_tab(), Tab::Discover);
    assert!(state.mentors().is_empty());
    assert!(!state.show_request_modal());
    assert!(state.selected_mentor().is_none());

    let sent = page.handle_request_mentorship(form()).await;
    assert!(!sent);
    assert_eq!(page.api().count("request_mentorship"), 0);
    assert!(page.api().requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_shows_login_prompt() {
    let mut page = page(two_mentors(), e100());
    page.mount().await;
    let calls_before = page.api().calls().len();

    page.switch_identity(StaticAuth::anonymous()).await;

    assert_eq!(page.view(), PageView::LoginRequired);
    assert_eq!(page.api().calls().len(), calls_before);
}
