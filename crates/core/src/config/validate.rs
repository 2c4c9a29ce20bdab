use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Helpdesk section exists (enforced by serde)
/// - Base URL looks like an http(s) URL
/// - API key is present
/// - Page size is within the vendor's 1..=100 range
/// - Resolved status code is outside the open range
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Helpdesk validation
    if !config.helpdesk.base_url.starts_with("http://")
        && !config.helpdesk.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "helpdesk.base_url must be an http(s) URL, got {:?}",
            config.helpdesk.base_url
        )));
    }

    if config.helpdesk.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "helpdesk.api_key cannot be empty".to_string(),
        ));
    }

    if config.helpdesk.page_size == 0 || config.helpdesk.page_size > 100 {
        return Err(ConfigError::ValidationError(format!(
            "helpdesk.page_size must be between 1 and 100, got {}",
            config.helpdesk.page_size
        )));
    }

    // A resolved status inside the open range would make every sweep
    // re-collect the tickets it just resolved.
    if config.disposal.resolved_status <= config.triage.open_status_max {
        return Err(ConfigError::ValidationError(format!(
            "disposal.resolved_status ({}) must be greater than triage.open_status_max ({})",
            config.disposal.resolved_status, config.triage.open_status_max
        )));
    }

    Ok(())
}
