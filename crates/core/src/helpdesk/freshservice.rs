//! Freshservice API client.
//!
//! Authenticates with a Basic authorization header carrying the API key.
//! List endpoints are page-based; the presence of a `Link` response header
//! is the signal that another page exists.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::HelpdeskConfig;

use super::types::{
    Department, HelpdeskClient, HelpdeskError, Problem, ProblemPage, ProblemUpdate, UpdatedProblem,
};

/// Freshservice implementation of the helpdesk API.
pub struct FreshserviceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FreshserviceClient {
    /// Create a new Freshservice client from configuration.
    pub fn new(config: &HelpdeskConfig) -> Result<Self, HelpdeskError> {
        if config.api_key.is_empty() {
            return Err(HelpdeskError::NotConfigured(
                "Freshservice API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| HelpdeskError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Basic {}", self.api_key)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, HelpdeskError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HelpdeskError::Api {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(response)
    }
}

fn map_send_error(e: reqwest::Error) -> HelpdeskError {
    if e.is_timeout() {
        HelpdeskError::Timeout
    } else {
        HelpdeskError::ConnectionFailed(e.to_string())
    }
}

#[async_trait::async_trait]
impl HelpdeskClient for FreshserviceClient {
    fn name(&self) -> &str {
        "freshservice"
    }

    async fn list_departments(&self, per_page: u32) -> Result<Vec<Department>, HelpdeskError> {
        let url = format!("{}/api/v2/departments", self.base_url);

        debug!(per_page = per_page, "Fetching departments");

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .query(&[("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(map_send_error)?;

        let response = Self::check_status(response).await?;

        let envelope: DepartmentsResponse = response.json().await.map_err(|e| {
            HelpdeskError::Parse(format!("Failed to parse departments response: {}", e))
        })?;

        Ok(envelope.departments)
    }

    async fn list_problems(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<ProblemPage, HelpdeskError> {
        let url = format!("{}/api/v2/problems", self.base_url);

        debug!(page = page, per_page = per_page, "Fetching problems page");

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .query(&[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(map_send_error)?;

        let response = Self::check_status(response).await?;

        // Freshservice signals a further page via a Link header.
        let has_more = response.headers().contains_key("link");

        let envelope: ProblemsResponse = response.json().await.map_err(|e| {
            HelpdeskError::Parse(format!("Failed to parse problems response: {}", e))
        })?;

        debug!(
            page = page,
            results = envelope.problems.len(),
            has_more = has_more,
            "Problems page fetched"
        );

        Ok(ProblemPage {
            problems: envelope.problems,
            has_more,
        })
    }

    async fn update_problem(
        &self,
        id: u64,
        update: &ProblemUpdate,
    ) -> Result<UpdatedProblem, HelpdeskError> {
        let url = format!("{}/api/v2/problems/{}", self.base_url, id);

        debug!(id = id, status = update.status, "Updating problem");

        let response = self
            .client
            .put(&url)
            .header("Authorization", self.auth_header())
            .json(update)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = Self::check_status(response).await?;

        let envelope: ProblemEnvelope = response.json().await.map_err(|e| {
            HelpdeskError::Parse(format!("Failed to parse update response: {}", e))
        })?;

        Ok(envelope.problem)
    }
}

// Freshservice API response envelopes
#[derive(Debug, Deserialize)]
struct DepartmentsResponse {
    departments: Vec<Department>,
}

#[derive(Debug, Deserialize)]
struct ProblemsResponse {
    problems: Vec<Problem>,
}

#[derive(Debug, Deserialize)]
struct ProblemEnvelope {
    problem: UpdatedProblem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HelpdeskConfig;

    fn test_config() -> HelpdeskConfig {
        HelpdeskConfig {
            base_url: "https://example.freshservice.com/".to_string(),
            api_key: "abc123".to_string(),
            timeout_secs: 30,
            page_size: 100,
        }
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = FreshserviceClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url, "https://example.freshservice.com");
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = test_config();
        config.api_key = String::new();
        let result = FreshserviceClient::new(&config);
        assert!(matches!(result, Err(HelpdeskError::NotConfigured(_))));
    }

    #[test]
    fn test_auth_header() {
        let client = FreshserviceClient::new(&test_config()).unwrap();
        assert_eq!(client.auth_header(), "Basic abc123");
    }

    #[test]
    fn test_problems_envelope_parsing() {
        let json = r#"{"problems": [{"id": 1, "status": 1, "created_at": "2023-01-01T00:00:00Z"}]}"#;
        let envelope: ProblemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.problems.len(), 1);
        assert_eq!(envelope.problems[0].id, Some(1));
    }

    #[test]
    fn test_problem_envelope_parsing() {
        let json = r#"{"problem": {"id": 42, "status": 6}}"#;
        let envelope: ProblemEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.problem.id, 42);
        assert_eq!(envelope.problem.status, Some(6));
    }
}
