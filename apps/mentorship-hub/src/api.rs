//! # Backend API
//!
//! The collaborator endpoints the page consumes, behind [`MentorshipApi`],
//! plus [`HttpMentorshipApi`], the reqwest implementation.
//!
//! ```text
//! GET  {base}/mentors/check/{employee_id}     -> {"is_mentor": bool}
//! GET  {base}/mentors/matches/{employee_id}   -> {"mentor_matches": [...]}
//! POST {base}/mentorship/requests             <- MentorshipRequest
//! GET  {base}/employees                       -> {"data": [...]}
//! GET  {base}/employees/{employee_id}         -> {"data": {...}}
//! ```
//!
//! Identifiers are percent-encoded as a single path segment, so `/`, `?`
//! and `#` inside an id never reach another route.

use crate::config::ClientConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use mentorship_core::{EmployeeId, EmployeeRecord, MentorMatch, RequestForm};
use serde::de::DeserializeOwned;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Response of the mentor-flag check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorCheck {
    #[serde(default)]
    pub is_mentor: bool,
}

/// Response of the match service. A missing list means no matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorMatches {
    #[serde(default)]
    pub mentor_matches: Vec<MentorMatch>,
}

/// Response of the directory listing. A missing list means an empty directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeList {
    #[serde(default)]
    pub data: Vec<EmployeeRecord>,
}

/// Response of the employee detail lookup. A missing record reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetail {
    #[serde(default)]
    pub data: EmployeeRecord,
}

/// Body of a mentorship request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorshipRequest {
    pub employee_id: EmployeeId,
    pub mentor_id: EmployeeId,
    pub goals: String,
    pub message: String,
    pub frequency: String,
    pub preferred_time: String,
}

impl MentorshipRequest {
    /// Combine the requester, the chosen mentor and the modal form.
    pub fn new(employee_id: EmployeeId, mentor_id: EmployeeId, form: RequestForm) -> Self {
        Self {
            employee_id,
            mentor_id,
            goals: form.goals,
            message: form.message,
            frequency: form.frequency,
            preferred_time: form.preferred_time,
        }
    }
}

// =============================================================================
// CLIENT TRAIT
// =============================================================================

/// The backend operations the page depends on.
#[async_trait]
pub trait MentorshipApi: Send + Sync {
    /// Whether the employee is a registered mentor.
    async fn check_if_mentor(&self, employee_id: &EmployeeId) -> Result<MentorCheck, ApiError>;

    /// Candidate mentors for the employee.
    async fn get_mentor_matches(&self, employee_id: &EmployeeId)
    -> Result<MentorMatches, ApiError>;

    /// Create a mentorship request.
    async fn request_mentorship(&self, request: &MentorshipRequest) -> Result<(), ApiError>;

    /// The full employee directory.
    async fn list_employees(&self) -> Result<EmployeeList, ApiError>;

    /// One employee's detail record.
    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeDetail, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// HTTP client for the HR backend.
#[derive(Debug, Clone)]
pub struct HttpMentorshipApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpMentorshipApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL does not parse or the API
    /// key contains invalid header characters, or [`ApiError::Http`] if the
    /// HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ApiError::Config(format!("Invalid API key header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Config(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Route under `prefix` addressed by an identifier.
    fn id_endpoint(&self, prefix: &[&str], id: &EmployeeId) -> Result<Url, ApiError> {
        // Dot segments are dropped during path normalization.
        if id.is_empty() || matches!(id.as_str(), "." | "..") {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        let mut segments = prefix.to_vec();
        segments.push(id.as_str());
        self.endpoint(&segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }
}

/// Check the status, then decode the body as JSON.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl MentorshipApi for HttpMentorshipApi {
    async fn check_if_mentor(&self, employee_id: &EmployeeId) -> Result<MentorCheck, ApiError> {
        let url = self.id_endpoint(&["mentors", "check"], employee_id)?;
        self.get_json(url).await
    }

    async fn get_mentor_matches(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<MentorMatches, ApiError> {
        let url = self.id_endpoint(&["mentors", "matches"], employee_id)?;
        self.get_json(url).await
    }

    async fn request_mentorship(&self, request: &MentorshipRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["mentorship", "requests"])?;
        debug!(%url, mentor_id = %request.mentor_id, "POST");
        let resp = self.client.post(url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: resp.text().await?,
            });
        }
        Ok(())
    }

    async fn list_employees(&self) -> Result<EmployeeList, ApiError> {
        let url = self.endpoint(&["employees"])?;
        self.get_json(url).await
    }

    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeDetail, ApiError> {
        let url = self.id_endpoint(&["employees"], employee_id)?;
        self.get_json(url).await
    }
}
