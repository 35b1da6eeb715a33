//! # Directory Module
//!
//! Name-keyed lookup over the employee directory, used to join mentor
//! matches (which only carry a display name) to employee records.
//!
//! The join is by display name only. When two employees share a name the
//! record listed last wins; nothing disambiguates them, so a mentor may be
//! enriched from the wrong employee. This mirrors the backend contract as it
//! stands and is not a guaranteed-correct join.

use crate::model::{EmployeeId, EmployeeRecord, MentorMatch};
use std::collections::BTreeMap;

/// Display name -> employee record.
///
/// Uses `BTreeMap` for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    by_name: BTreeMap<String, EmployeeRecord>,
}

impl DirectoryIndex {
    /// Build the index from a directory listing (last write wins on duplicate names).
    pub fn from_records(records: impl IntoIterator<Item = EmployeeRecord>) -> Self {
        let mut by_name = BTreeMap::new();
        for record in records {
            let Some(name) = record.name.clone() else {
                continue;
            };
            by_name.insert(name, record);
        }
        Self { by_name }
    }

    /// Look up an employee by exact display name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&EmployeeRecord> {
        self.by_name.get(name)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Positions of the matches to enrich, paired with the employee id to fetch.
    ///
    /// A match is a target when it lacks a positive `years_experience` and its
    /// `mentor_name` resolves to a directory entry with a non-empty id.
    #[must_use]
    pub fn enrichment_targets(&self, matches: &[MentorMatch]) -> Vec<(usize, EmployeeId)> {
        matches
            .iter()
            .enumerate()
            .filter(|(_, m)| m.needs_enrichment())
            .filter_map(|(pos, m)| {
                self.lookup(&m.mentor_name)
                    .and_then(EmployeeRecord::resolved_id)
                    .map(|id| (pos, id.clone()))
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
