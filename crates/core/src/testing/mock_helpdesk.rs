//! Mock helpdesk client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::helpdesk::{
    Department, HelpdeskClient, HelpdeskError, Problem, ProblemPage, ProblemUpdate, UpdatedProblem,
};

/// Controls what the mock does when a given ticket id is updated.
#[derive(Debug, Clone)]
pub enum UpdateBehavior {
    /// Echo back a different ticket id than the one requested.
    EchoMismatch(u64),
    /// Fail the update with an API error.
    FailStatus(u16, String),
    /// Fail the update with a connection error.
    FailConnection(String),
}

/// Mock implementation of the `HelpdeskClient` trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable department lists and problem pages
/// - Track update calls for assertions
/// - Simulate failures and echo mismatches per ticket id
pub struct MockHelpdesk {
    /// Configured departments.
    departments: Arc<RwLock<Vec<Department>>>,
    /// Configured problem pages, in page order (page 1 first).
    pages: Arc<RwLock<Vec<Vec<Problem>>>>,
    /// If set, the next departments call fails with this error.
    next_departments_error: Arc<RwLock<Option<HelpdeskError>>>,
    /// If set, the next problems call fails with this error.
    next_problems_error: Arc<RwLock<Option<HelpdeskError>>>,
    /// Per-ticket update behavior overrides (default: echo the request id).
    update_behaviors: Arc<RwLock<HashMap<u64, UpdateBehavior>>>,
    /// Recorded update calls.
    updates: Arc<RwLock<Vec<(u64, ProblemUpdate)>>>,
    /// Recorded problem page requests.
    page_requests: Arc<RwLock<Vec<u32>>>,
}

impl std::fmt::Debug for MockHelpdesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHelpdesk").finish_non_exhaustive()
    }
}

impl Default for MockHelpdesk {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHelpdesk {
    /// Create a new mock with no departments and no problems.
    pub fn new() -> Self {
        Self {
            departments: Arc::new(RwLock::new(Vec::new())),
            pages: Arc::new(RwLock::new(Vec::new())),
            next_departments_error: Arc::new(RwLock::new(None)),
            next_problems_error: Arc::new(RwLock::new(None)),
            update_behaviors: Arc::new(RwLock::new(HashMap::new())),
            updates: Arc::new(RwLock::new(Vec::new())),
            page_requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the departments to return.
    pub async fn set_departments(&self, departments: Vec<Department>) {
        *self.departments.write().await = departments;
    }

    /// Set the problem pages to return. Page 1 is the first element;
    /// `has_more` is derived from whether a later page exists.
    pub async fn set_problem_pages(&self, pages: Vec<Vec<Problem>>) {
        *self.pages.write().await = pages;
    }

    /// Configure the next departments call to fail with the given error.
    pub async fn set_next_departments_error(&self, error: HelpdeskError) {
        *self.next_departments_error.write().await = Some(error);
    }

    /// Configure the next problems call to fail with the given error.
    pub async fn set_next_problems_error(&self, error: HelpdeskError) {
        *self.next_problems_error.write().await = Some(error);
    }

    /// Override update behavior for one ticket id.
    pub async fn set_update_behavior(&self, id: u64, behavior: UpdateBehavior) {
        self.update_behaviors.write().await.insert(id, behavior);
    }

    /// Get recorded update calls in order.
    pub async fn recorded_updates(&self) -> Vec<(u64, ProblemUpdate)> {
        self.updates.read().await.clone()
    }

    /// Get the number of update calls performed.
    pub async fn update_count(&self) -> usize {
        self.updates.read().await.len()
    }

    /// Get the problem page numbers that were requested, in order.
    pub async fn requested_pages(&self) -> Vec<u32> {
        self.page_requests.read().await.clone()
    }
}

#[async_trait]
impl HelpdeskClient for MockHelpdesk {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_departments(&self, _per_page: u32) -> Result<Vec<Department>, HelpdeskError> {
        if let Some(err) = self.next_departments_error.write().await.take() {
            return Err(err);
        }
        Ok(self.departments.read().await.clone())
    }

    async fn list_problems(
        &self,
        page: u32,
        _per_page: u32,
    ) -> Result<ProblemPage, HelpdeskError> {
        if let Some(err) = self.next_problems_error.write().await.take() {
            return Err(err);
        }

        self.page_requests.write().await.push(page);

        let pages = self.pages.read().await;
        let index = page.saturating_sub(1) as usize;
        let problems = pages.get(index).cloned().unwrap_or_default();
        let has_more = (index + 1) < pages.len();

        Ok(ProblemPage { problems, has_more })
    }

    async fn update_problem(
        &self,
        id: u64,
        update: &ProblemUpdate,
    ) -> Result<UpdatedProblem, HelpdeskError> {
        let behavior = self.update_behaviors.read().await.get(&id).cloned();

        match behavior {
            Some(UpdateBehavior::FailStatus(status, body)) => {
                return Err(HelpdeskError::Api { status, body });
            }
            Some(UpdateBehavior::FailConnection(message)) => {
                return Err(HelpdeskError::ConnectionFailed(message));
            }
            Some(UpdateBehavior::EchoMismatch(echoed)) => {
                self.updates.write().await.push((id, update.clone()));
                return Ok(UpdatedProblem {
                    id: echoed,
                    status: Some(update.status),
                });
            }
            None => {}
        }

        self.updates.write().await.push((id, update.clone()));
        Ok(UpdatedProblem {
            id,
            status: Some(update.status),
        })
    }
}
