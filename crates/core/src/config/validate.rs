use super::{types::Config, ConfigError};

/// Freshdesk rejects `per_page` values above this.
pub const MAX_PER_PAGE: u32 = 100;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Freshdesk domain is set
/// - Page size, timeout and page guard are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let fd = &config.freshdesk;
    if fd.domain.trim().is_empty() && fd.base_url.is_none() {
        return Err(ConfigError::ValidationError(
            "freshdesk.domain cannot be empty".to_string(),
        ));
    }
    if fd.per_page == 0 || fd.per_page > MAX_PER_PAGE {
        return Err(ConfigError::ValidationError(format!(
            "freshdesk.per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    if fd.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "freshdesk.timeout_secs cannot be 0".to_string(),
        ));
    }
    if fd.max_pages == 0 {
        return Err(ConfigError::ValidationError(
            "freshdesk.max_pages cannot be 0".to_string(),
        ));
    }

    Ok(())
}
