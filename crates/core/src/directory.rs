//! Department directory fetch.
//!
//! The directory maps department ids to display names and is used only to
//! enrich log text; a failed fetch degrades to the sentinel entry alone
//! and never aborts a run.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::helpdesk::HelpdeskClient;
use crate::triage::MISSING_DEPARTMENT;

/// Display name for the missing-department sentinel.
pub const MISSING_DEPARTMENT_NAME: &str = "<no longer exists>";

/// Fetch the department directory, seeded with the sentinel entry.
pub async fn fetch_directory(
    client: &dyn HelpdeskClient,
    page_size: u32,
) -> HashMap<u64, String> {
    let mut directory = HashMap::from([(MISSING_DEPARTMENT, MISSING_DEPARTMENT_NAME.to_string())]);

    match client.list_departments(page_size).await {
        Ok(departments) => {
            info!(count = departments.len(), "Fetched department directory");
            for department in departments {
                directory.insert(department.id, department.name);
            }
        }
        Err(e) => {
            warn!(
                error = %e,
                "Failed to fetch department directory, proceeding without names"
            );
        }
    }

    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpdesk::HelpdeskError;
    use crate::testing::{fixtures, MockHelpdesk};

    #[tokio::test]
    async fn test_directory_includes_sentinel() {
        let mock = MockHelpdesk::new();
        mock.set_departments(vec![
            fixtures::department(100, "Acme Corp"),
            fixtures::department(200, "Globex"),
        ])
        .await;

        let directory = fetch_directory(&mock, 100).await;

        assert_eq!(directory.len(), 3);
        assert_eq!(directory[&0], MISSING_DEPARTMENT_NAME);
        assert_eq!(directory[&100], "Acme Corp");
        assert_eq!(directory[&200], "Globex");
    }

    #[tokio::test]
    async fn test_directory_fetch_failure_degrades_to_sentinel() {
        let mock = MockHelpdesk::new();
        mock.set_next_departments_error(HelpdeskError::ConnectionFailed(
            "dns failure".to_string(),
        ))
        .await;

        let directory = fetch_directory(&mock, 100).await;

        assert_eq!(directory.len(), 1);
        assert_eq!(directory[&0], MISSING_DEPARTMENT_NAME);
    }
}
