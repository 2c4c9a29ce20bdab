//! Sequential resolution of collected tickets.
//!
//! Each ticket drawn from the three actionable buckets gets an update
//! payload chosen by its source bucket, issued one at a time. Every
//! attempt is recorded with an explicit outcome; nothing is silently
//! dropped.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DisposalConfig;
use crate::helpdesk::{HelpdeskClient, ProblemUpdate};
use crate::triage::{Buckets, Disposition};

/// Errors that abort the disposal stage.
#[derive(Debug, Error)]
pub enum DisposeError {
    /// A ticket drawn from the resolve set matched no actionable bucket.
    /// Buckets are disjoint by construction, so this is unreachable short
    /// of a data-integrity bug, and the run must not continue past it.
    #[error("Ticket {id} not found in any actionable disposition bucket")]
    BucketIntegrity { id: u64 },
}

/// Outcome of one disposal attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisposalOutcome {
    /// Update succeeded and the response echoed the requested ticket id.
    Closed,
    /// Update succeeded but the response echoed a different ticket id.
    EchoMismatch { echoed: u64 },
    /// Update request failed.
    Failed { error: String },
}

/// Exhaustive record of every disposal attempt, in attempt order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisposalReport {
    pub outcomes: Vec<(u64, DisposalOutcome)>,
}

impl DisposalReport {
    /// Number of tickets successfully closed.
    pub fn closed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == DisposalOutcome::Closed)
            .count()
    }

    /// Ids of tickets that were attempted but not closed.
    pub fn not_closed(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != DisposalOutcome::Closed)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of attempts made.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}

/// Build the resolution payload for one actionable disposition.
/// Returns `None` for `Keep`, which the disposer never resolves.
pub fn resolution_update(
    disposition: Disposition,
    config: &DisposalConfig,
    cutoff_year: u16,
) -> Option<ProblemUpdate> {
    let (resolution_summary, problem_cause, problem_impact, problem_symptom) = match disposition {
        Disposition::Old => (
            format!("PRB created prior to {}", cutoff_year),
            "Unable to determine".to_string(),
            format!("PRB created prior to {}", cutoff_year),
            "See description".to_string(),
        ),
        Disposition::Offboarded => (
            "Client offboarded".to_string(),
            "Unable to determine".to_string(),
            "Not applicable - client offboarded".to_string(),
            "Unable to determine".to_string(),
        ),
        Disposition::Patching => (
            "Patching PRB addressed via another platform".to_string(),
            "Likely SSM- or Infraguard-related".to_string(),
            "Patching event impeded".to_string(),
            "Patching failed or not 100% successful".to_string(),
        ),
        Disposition::Keep => return None,
    };

    Some(ProblemUpdate {
        status: config.resolved_status,
        known_error: true,
        rca_complete: true,
        resolution_summary,
        problem_cause,
        problem_impact,
        problem_symptom,
    })
}

/// Resolve every ticket in the old, offboarded and patching buckets,
/// strictly one update at a time.
pub async fn dispose(
    client: &dyn HelpdeskClient,
    buckets: &Buckets,
    config: &DisposalConfig,
    cutoff_year: u16,
) -> Result<DisposalReport, DisposeError> {
    let mut report = DisposalReport::default();

    for id in buckets.to_resolve() {
        let update = buckets
            .disposition_of(id)
            .and_then(|disposition| resolution_update(disposition, config, cutoff_year));

        let Some(update) = update else {
            warn!(id = id, "Ticket missing from actionable buckets, aborting run");
            return Err(DisposeError::BucketIntegrity { id });
        };

        match client.update_problem(id, &update).await {
            Ok(echoed) if echoed.id == id => {
                info!(id = id, "Resolved problem ticket");
                report.outcomes.push((id, DisposalOutcome::Closed));
            }
            Ok(echoed) => {
                warn!(
                    id = id,
                    echoed = echoed.id,
                    "Update response echoed a different ticket id"
                );
                report
                    .outcomes
                    .push((id, DisposalOutcome::EchoMismatch { echoed: echoed.id }));
            }
            Err(e) => {
                warn!(id = id, error = %e, "Failed to resolve problem ticket");
                report.outcomes.push((
                    id,
                    DisposalOutcome::Failed {
                        error: e.to_string(),
                    },
                ));
            }
        }
    }

    info!(
        attempted = report.attempted(),
        closed = report.closed(),
        not_closed = report.not_closed().len(),
        "Disposal complete"
    );

    Ok(report)
}
