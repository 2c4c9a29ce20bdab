//! Paginated collection of open problems into disposition buckets.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{MissingFieldPolicy, TriageConfig};
use crate::helpdesk::HelpdeskClient;

use super::rules::{classify, normalize, Disposition};
use super::TriageError;

/// The four disposition buckets, ids in traversal order
/// (oldest page first, API order within a page).
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Buckets {
    pub old: Vec<u64>,
    pub offboarded: Vec<u64>,
    pub patching: Vec<u64>,
    pub keep: Vec<u64>,
}

impl Buckets {
    /// Append a ticket id to the bucket for the given disposition.
    pub fn push(&mut self, disposition: Disposition, id: u64) {
        match disposition {
            Disposition::Old => self.old.push(id),
            Disposition::Offboarded => self.offboarded.push(id),
            Disposition::Patching => self.patching.push(id),
            Disposition::Keep => self.keep.push(id),
        }
    }

    /// Total number of collected tickets across all four buckets.
    pub fn total(&self) -> usize {
        self.old.len() + self.offboarded.len() + self.patching.len() + self.keep.len()
    }

    /// Ids of the tickets to resolve: old, then offboarded, then patching.
    pub fn to_resolve(&self) -> impl Iterator<Item = u64> + '_ {
        self.old
            .iter()
            .chain(self.offboarded.iter())
            .chain(self.patching.iter())
            .copied()
    }

    /// Which bucket holds the given ticket id, if any.
    pub fn disposition_of(&self, id: u64) -> Option<Disposition> {
        if self.old.contains(&id) {
            Some(Disposition::Old)
        } else if self.offboarded.contains(&id) {
            Some(Disposition::Offboarded)
        } else if self.patching.contains(&id) {
            Some(Disposition::Patching)
        } else if self.keep.contains(&id) {
            Some(Disposition::Keep)
        } else {
            None
        }
    }
}

/// Paginate through all open problems and classify each into a bucket.
///
/// Pagination starts at page 1 and continues while the response carries
/// the continuation signal. Any non-success read response is returned as
/// an error; halting loudly beats the silent infinite loop a swallowed
/// status would cause here.
///
/// The department directory is used for log text only.
pub async fn collect_buckets(
    client: &dyn HelpdeskClient,
    config: &TriageConfig,
    page_size: u32,
    directory: &HashMap<u64, String>,
) -> Result<Buckets, TriageError> {
    let mut buckets = Buckets::default();
    let mut page: u32 = 1;

    loop {
        let result = client.list_problems(page, page_size).await?;
        info!(
            page = page,
            results = result.problems.len(),
            "Fetched problems page"
        );

        for problem in &result.problems {
            let ticket = match normalize(problem) {
                Ok(ticket) => ticket,
                Err(e) => match config.missing_field_policy {
                    MissingFieldPolicy::Abort => {
                        warn!(error = %e, "Unclassifiable problem record, aborting run");
                        return Err(e);
                    }
                    MissingFieldPolicy::Skip => {
                        warn!(error = %e, "Unclassifiable problem record, skipping");
                        continue;
                    }
                },
            };

            if !ticket.is_open(config.open_status_max) {
                debug!(id = ticket.id, status = ticket.status, "Skipping non-open problem");
                continue;
            }

            let disposition = classify(&ticket, config);
            let department = directory
                .get(&ticket.department_id)
                .map_or("<unknown>", String::as_str);
            info!(
                id = ticket.id,
                subject = %ticket.subject,
                department = department,
                disposition = ?disposition,
                reason = disposition.reason(),
                "Classified problem"
            );
            buckets.push(disposition, ticket.id);
        }

        if result.has_more {
            page += 1;
        } else {
            break;
        }
    }

    info!(
        old = buckets.old.len(),
        offboarded = buckets.offboarded.len(),
        patching = buckets.patching.len(),
        keep = buckets.keep.len(),
        "Collection complete"
    );

    Ok(buckets)
}
