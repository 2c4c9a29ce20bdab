//! The full sweep: directory fetch, collection, disposal.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::directory::fetch_directory;
use crate::disposer::{dispose, DisposalReport, DisposeError};
use crate::helpdesk::HelpdeskClient;
use crate::triage::{collect_buckets, Buckets, TriageError};

/// Errors that abort a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error(transparent)]
    Dispose(#[from] DisposeError),
}

/// Result of one sweep run. Nothing is persisted between runs.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub buckets: Buckets,
    pub disposal: DisposalReport,
}

/// Run the three stages in order. The department directory only enriches
/// log text; collection and disposal are strictly sequential with no
/// feedback loops.
pub async fn run_sweep(
    client: &dyn HelpdeskClient,
    config: &Config,
) -> Result<SweepReport, SweepError> {
    let page_size = config.helpdesk.page_size;

    let directory = fetch_directory(client, page_size).await;

    let buckets = collect_buckets(client, &config.triage, page_size, &directory).await?;
    info!(
        to_resolve = buckets.to_resolve().count(),
        keep = buckets.keep.len(),
        "Collected open problems"
    );

    let disposal = dispose(
        client,
        &buckets,
        &config.disposal,
        config.triage.cutoff_year,
    )
    .await?;

    info!(
        closed = disposal.closed(),
        not_closed = ?disposal.not_closed(),
        "Sweep complete"
    );

    Ok(SweepReport { buckets, disposal })
}
