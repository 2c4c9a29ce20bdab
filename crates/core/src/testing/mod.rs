//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the helpdesk client trait,
//! allowing sweep tests without real vendor infrastructure.

mod mock_helpdesk;

pub use mock_helpdesk::{MockHelpdesk, UpdateBehavior};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::helpdesk::{Department, Problem};

    /// Build a problem ticket with all classification-relevant fields set.
    pub fn problem(
        id: u64,
        status: i64,
        created_at: &str,
        department_id: u64,
        category: &str,
    ) -> Problem {
        Problem {
            id: Some(id),
            subject: Some(format!("PRB #{}", id)),
            status: Some(status),
            created_at: Some(created_at.to_string()),
            department_id: Some(department_id),
            category: Some(category.to_string()),
        }
    }

    /// Build an open problem ticket with no department and no category.
    pub fn sparse_problem(id: u64, created_at: &str) -> Problem {
        Problem {
            id: Some(id),
            subject: None,
            status: Some(1),
            created_at: Some(created_at.to_string()),
            department_id: None,
            category: None,
        }
    }

    pub fn department(id: u64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
        }
    }
}
