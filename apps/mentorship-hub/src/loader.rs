//! # Data Loader
//!
//! Initial data for the page: the mentor flag, the mentor matches, and a
//! best-effort tenure enrichment of those matches.
//!
//! The loader never fails. Every error is logged and turned into a partial
//! [`LoadOutcome`], so the page stays usable with whatever data arrived.
//!
//! Enrichment:
//! 1. Fetch the employee directory once.
//! 2. Index it by display name (last write wins on duplicates).
//! 3. For every match without a positive `years_experience` whose name
//!    resolves, fetch the employee detail record. All detail fetches run
//!    concurrently and are awaited jointly.
//! 4. A failed detail fetch leaves its match untouched; a failed directory
//!    fetch leaves every match untouched.

use crate::api::MentorshipApi;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use mentorship_core::{tenure, DirectoryIndex, EmployeeId, MentorMatch};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// What a load produced. `None` fields were not obtained and must not
/// overwrite existing state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub is_mentor: Option<bool>,
    pub mentors: Option<Vec<MentorMatch>>,
}

/// Fetch the mentor flag, then the matches, then enrich the matches.
///
/// A failed flag check stops the load before matches are fetched; a failed
/// match fetch keeps the flag that was already obtained.
pub async fn load_initial_data<A: MentorshipApi + ?Sized>(
    api: &A,
    employee_id: &EmployeeId,
    now: DateTime<Utc>,
) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    match api.check_if_mentor(employee_id).await {
        Ok(check) => outcome.is_mentor = Some(check.is_mentor),
        Err(err) => {
            error!(%employee_id, error = %err, "Error loading data: mentor check failed");
            return outcome;
        }
    }

    let matches = match api.get_mentor_matches(employee_id).await {
        Ok(resp) => resp.mentor_matches,
        Err(err) => {
            error!(%employee_id, error = %err, "Error loading data: match fetch failed");
            return outcome;
        }
    };

    let enriched = enrich_matches(api, matches, now).await;
    info!(
        %employee_id,
        is_mentor = ?outcome.is_mentor,
        mentors = enriched.len(),
        "Loaded mentorship data"
    );
    outcome.mentors = Some(enriched);
    outcome
}

/// Fill in `years_experience` from the employee directory where missing.
///
/// Returns the matches in their original order. Matches that already carry
/// a positive value are never touched.
pub async fn enrich_matches<A: MentorshipApi + ?Sized>(
    api: &A,
    mut matches: Vec<MentorMatch>,
    now: DateTime<Utc>,
) -> Vec<MentorMatch> {
    if !matches.iter().any(MentorMatch::needs_enrichment) {
        return matches;
    }

    let directory = match api.list_employees().await {
        Ok(list) => list.data,
        Err(err) => {
            warn!(error = %err, "Directory fetch failed; mentors left unenriched");
            return matches;
        }
    };

    let index = DirectoryIndex::from_records(directory);
    let targets = index.enrichment_targets(&matches);
    debug!(
        directory = index.len(),
        targets = targets.len(),
        "Enriching mentor matches"
    );

    let lookups = targets.into_iter().map(|(pos, employee_id)| async move {
        match api.get_employee(&employee_id).await {
            Ok(detail) => {
                let years = tenure::compute_years(detail.data.reference_date(), now);
                Some((pos, years))
            }
            Err(err) => {
                warn!(%employee_id, error = %err, "Employee detail fetch failed; match left as is");
                None
            }
        }
    });

    for (pos, years) in join_all(lookups).await.into_iter().flatten() {
        if let Some(m) = matches.get_mut(pos) {
            m.years_experience = Some(Value::from(years));
        }
    }

    matches
}
