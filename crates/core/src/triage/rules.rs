//! Classification rules.

use serde::{Deserialize, Serialize};

use crate::config::TriageConfig;
use crate::helpdesk::Problem;

use super::TriageError;

/// Department id sentinel meaning "department no longer exists".
pub const MISSING_DEPARTMENT: u64 = 0;

/// The four disposition buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Created before the cutoff year.
    Old,
    /// Department is offboarded or missing.
    Offboarded,
    /// Category text mentions patching.
    Patching,
    /// None of the above; left untouched.
    Keep,
}

impl Disposition {
    /// Short reason string for per-ticket logging.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Old => "created before cutoff year",
            Self::Offboarded => "department offboarded or missing",
            Self::Patching => "patching-related category",
            Self::Keep => "no disposition rule matched",
        }
    }
}

/// A problem record with the vendor's optional fields normalized.
///
/// Missing department becomes the 0 sentinel and missing category/subject
/// the literal "None"; those never block classification. A record missing
/// `id`, `status` or `created_at` cannot be normalized at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedProblem {
    pub id: u64,
    pub subject: String,
    pub status: i64,
    pub created_at: String,
    pub department_id: u64,
    pub category: String,
}

impl NormalizedProblem {
    /// Whether this ticket counts as open under the configured threshold.
    pub fn is_open(&self, open_status_max: i64) -> bool {
        self.status <= open_status_max
    }
}

/// Normalize a raw problem record into a classifiable view.
pub fn normalize(problem: &Problem) -> Result<NormalizedProblem, TriageError> {
    let id = problem.id.ok_or(TriageError::MissingField {
        field: "id",
        id: None,
    })?;
    let status = problem.status.ok_or(TriageError::MissingField {
        field: "status",
        id: Some(id),
    })?;
    let created_at = problem
        .created_at
        .clone()
        .ok_or(TriageError::MissingField {
            field: "created_at",
            id: Some(id),
        })?;

    Ok(NormalizedProblem {
        id,
        subject: problem
            .subject
            .clone()
            .unwrap_or_else(|| "None".to_string()),
        status,
        created_at,
        department_id: problem.department_id.unwrap_or(MISSING_DEPARTMENT),
        category: problem
            .category
            .clone()
            .unwrap_or_else(|| "None".to_string()),
    })
}

/// Classify one open ticket. First-match-wins, fixed rule order:
/// old, then offboarded, then patching, then keep.
pub fn classify(ticket: &NormalizedProblem, config: &TriageConfig) -> Disposition {
    // The creation year is the leading 4 characters of the ISO-8601
    // timestamp, compared lexically against the cutoff year.
    let cutoff = format!("{:04}", config.cutoff_year);
    let year = ticket.created_at.get(..4).unwrap_or(&ticket.created_at);
    if year < cutoff.as_str() {
        return Disposition::Old;
    }

    if ticket.department_id == MISSING_DEPARTMENT
        || config.offboarded_departments.contains(&ticket.department_id)
    {
        return Disposition::Offboarded;
    }

    if ticket.category.contains("Patching") {
        return Disposition::Patching;
    }

    Disposition::Keep
}
