//! Types for the helpdesk API seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem ticket as returned by the vendor API.
///
/// Every field the vendor is allowed to omit is an `Option`; normalization
/// into a classifiable view happens in the triage module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    /// Ticket identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// One-line subject, used for logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Numeric status code (0/1 = open, 2+ = other).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Creation timestamp, ISO-8601 (e.g. "2021-05-01T09:30:00Z").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Client department id; absent when the department was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    /// Free-text category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A client department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

/// One page of problems plus the pagination-continuation signal.
#[derive(Debug, Clone)]
pub struct ProblemPage {
    /// Problems in the order the API returned them.
    pub problems: Vec<Problem>,
    /// Whether the response carried a `Link` header pointing at another page.
    pub has_more: bool,
}

/// Partial-update payload for resolving a problem ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemUpdate {
    /// Target status code ("Resolved" in the default vendor mapping).
    pub status: i64,
    /// Known-error flag, set when formally closing out the record.
    pub known_error: bool,
    /// RCA-completed flag.
    pub rca_complete: bool,
    pub resolution_summary: String,
    pub problem_cause: String,
    pub problem_impact: String,
    pub problem_symptom: String,
}

/// Echo of an update response, used to verify the vendor applied the
/// change to the ticket we asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedProblem {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

/// Errors that can occur talking to the helpdesk API.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("Helpdesk connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Helpdesk API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse helpdesk response: {0}")]
    Parse(String),

    #[error("Helpdesk client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for the vendor's problem/department endpoints.
#[async_trait]
pub trait HelpdeskClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// List up to `per_page` departments (single call, no pagination).
    async fn list_departments(&self, per_page: u32) -> Result<Vec<Department>, HelpdeskError>;

    /// List one page of problem tickets. Pages start at 1.
    async fn list_problems(&self, page: u32, per_page: u32)
        -> Result<ProblemPage, HelpdeskError>;

    /// Apply a partial update to one problem ticket.
    async fn update_problem(
        &self,
        id: u64,
        update: &ProblemUpdate,
    ) -> Result<UpdatedProblem, HelpdeskError>;
}
