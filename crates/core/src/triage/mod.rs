//! Open-problem classification.
//!
//! This module walks every open problem ticket and assigns it to exactly
//! one disposition bucket using fixed, first-match-wins field rules.

mod collector;
mod rules;

pub use collector::{collect_buckets, Buckets};
pub use rules::{classify, normalize, Disposition, NormalizedProblem, MISSING_DEPARTMENT};

use thiserror::Error;

use crate::helpdesk::HelpdeskError;

/// Errors that can occur while collecting and classifying tickets.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A problem record is missing a field classification cannot do
    /// without. Treated as a data-integrity condition; the configured
    /// policy decides whether it aborts the run or skips the record.
    #[error("Problem record (id: {id:?}) is missing required field `{field}`")]
    MissingField {
        field: &'static str,
        id: Option<u64>,
    },

    #[error(transparent)]
    Helpdesk(#[from] HelpdeskError),
}
