//! # Data Model
//!
//! Records exchanged with the backend and the authenticated identity.
//!
//! Backend payloads are loosely typed: identifiers may arrive as strings or
//! numbers, list envelopes may be missing, and mentor profiles carry fields
//! this page never interprets. The types here accept all of that and keep
//! the unknown profile fields untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an employee (and of a mentor, who is an employee).
///
/// Deserializes from either a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Create a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier never resolves to an employee.
    ///
    /// Only the empty string counts; whitespace is a valid, if odd, id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

// =============================================================================
// MENTOR MATCH
// =============================================================================

/// A candidate mentor returned by the backend matching service.
///
/// Only `years_experience` is ever changed locally (by enrichment); the
/// change is never written back to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorMatch {
    pub mentor_id: EmployeeId,

    #[serde(default)]
    pub mentor_name: String,

    /// Experience as the backend sent it. Kept verbatim so a fractional or
    /// string value survives untouched; `None` and anything that does not
    /// read as a positive number are candidates for enrichment.
    #[serde(default)]
    pub years_experience: Option<Value>,

    /// Remaining profile fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MentorMatch {
    /// Create a match with no profile fields beyond id and name.
    pub fn new(mentor_id: impl Into<String>, mentor_name: impl Into<String>) -> Self {
        Self {
            mentor_id: EmployeeId::new(mentor_id),
            mentor_name: mentor_name.into(),
            years_experience: None,
            extra: Map::new(),
        }
    }

    /// Builder-style setter for `years_experience`.
    #[must_use]
    pub fn with_years(mut self, years: impl Into<Value>) -> Self {
        self.years_experience = Some(years.into());
        self
    }

    /// True unless the match already carries a positive experience value.
    #[must_use]
    pub fn needs_enrichment(&self) -> bool {
        !self.years_experience.as_ref().is_some_and(is_positive)
    }

    /// Experience for display, if the backend sent a number or a string.
    #[must_use]
    pub fn years_label(&self) -> Option<String> {
        match self.years_experience.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// Numbers above zero, and strings holding one, are positive.
fn is_positive(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|f| f > 0.0),
        _ => false,
    }
}

// =============================================================================
// EMPLOYEE RECORD
// =============================================================================

/// One row of the employee directory, or an employee detail record.
///
/// Used transiently as a join table during enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub in_role_since: Option<String>,
}

impl EmployeeRecord {
    /// Create a directory entry with id and name.
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            employee_id: Some(EmployeeId::new(employee_id)),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The identifier, if present and non-empty.
    #[must_use]
    pub fn resolved_id(&self) -> Option<&EmployeeId> {
        self.employee_id.as_ref().filter(|id| !id.is_empty())
    }

    /// The date tenure is measured from: `hire_date`, else `in_role_since`.
    ///
    /// Empty strings are skipped.
    #[must_use]
    pub fn reference_date(&self) -> Option<&str> {
        non_empty(self.hire_date.as_deref()).or_else(|| non_empty(self.in_role_since.as_deref()))
    }
}

// =============================================================================
// AUTHENTICATED USER
// =============================================================================

/// The identity exposed by the authentication context. Read-only here.
///
/// The backend has used both `employeeId` and `employee_id`; the camelCase
/// form wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(default, rename = "employeeId", skip_serializing_if = "Option::is_none")]
    pub employee_id_camel: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Create a user with an employee identifier.
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(EmployeeId::new(employee_id)),
            ..Self::default()
        }
    }

    /// A user the auth context knows about but who has no employee record.
    #[must_use]
    pub fn without_employee_id() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Resolve the employee identifier (`employeeId`, then `employee_id`).
    #[must_use]
    pub fn employee_id(&self) -> Option<&EmployeeId> {
        self.employee_id_camel
            .as_ref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.employee_id.as_ref().filter(|id| !id.is_empty()))
    }

    /// Name shown in the header: `name`, else `email`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.email.as_deref()))
    }
}

// =============================================================================
// REQUEST FORM
// =============================================================================

/// Payload of the mentorship request modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestForm {
    pub goals: String,
    pub message: String,
    pub frequency: String,
    pub preferred_time: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// TESTS
// =============================================================================
