use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub helpdesk: HelpdeskConfig,
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub disposal: DisposalConfig,
}

/// Helpdesk API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HelpdeskConfig {
    /// Helpdesk base URL (e.g., "https://example.freshservice.com")
    pub base_url: String,
    /// API key, sent as a Basic authorization header.
    /// Injected via config/env, never embedded in code.
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Page size for list endpoints (default: 100, vendor max)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout() -> u32 {
    30
}

fn default_page_size() -> u32 {
    100
}

/// Classification rule configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriageConfig {
    /// Tickets created before this year are classified as old (default: 2022)
    #[serde(default = "default_cutoff_year")]
    pub cutoff_year: u16,
    /// Department ids of offboarded clients
    #[serde(default)]
    pub offboarded_departments: Vec<u64>,
    /// Tickets with status above this value are not open (default: 1)
    #[serde(default = "default_open_status_max")]
    pub open_status_max: i64,
    /// What to do when a ticket is missing a field required for
    /// classification (default: abort)
    #[serde(default)]
    pub missing_field_policy: MissingFieldPolicy,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            cutoff_year: default_cutoff_year(),
            offboarded_departments: Vec::new(),
            open_status_max: default_open_status_max(),
            missing_field_policy: MissingFieldPolicy::default(),
        }
    }
}

fn default_cutoff_year() -> u16 {
    2022
}

fn default_open_status_max() -> i64 {
    1
}

/// Policy for tickets that cannot be classified.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Abort the whole run (all-or-nothing, matches the vendor's
    /// data-integrity expectations)
    #[default]
    Abort,
    /// Log a warning and skip the one ticket
    Skip,
}

/// Disposal configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisposalConfig {
    /// Numeric status code meaning "Resolved" (default: 6)
    #[serde(default = "default_resolved_status")]
    pub resolved_status: i64,
}

impl Default for DisposalConfig {
    fn default() -> Self {
        Self {
            resolved_status: default_resolved_status(),
        }
    }
}

fn default_resolved_status() -> i64 {
    6
}

/// Sanitized config for startup logging (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub helpdesk: SanitizedHelpdeskConfig,
    pub triage: TriageConfig,
    pub disposal: DisposalConfig,
}

/// Sanitized helpdesk config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedHelpdeskConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub page_size: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            helpdesk: SanitizedHelpdeskConfig {
                base_url: config.helpdesk.base_url.clone(),
                api_key_configured: !config.helpdesk.api_key.is_empty(),
                timeout_secs: config.helpdesk.timeout_secs,
                page_size: config.helpdesk.page_size,
            },
            triage: config.triage.clone(),
            disposal: config.disposal.clone(),
        }
    }
}
