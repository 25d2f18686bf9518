use crate::config::types::{Config, FetcherConfig, LimitsConfig, OutputConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_user_agent_config(&config.user_agent)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_limits_config(&config.limits)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client_name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    if config.client_version.is_empty() {
        return Err(ConfigError::Validation(
            "client_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    if config.sitemap_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "sitemap_timeout_secs must be >= 1, got {}",
            config.sitemap_timeout_secs
        )));
    }

    if config.accept_language.trim().is_empty() {
        return Err(ConfigError::Validation(
            "accept_language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates limiting and batching configuration
fn validate_limits_config(config: &LimitsConfig) -> ConfigResult<()> {
    if config.max_children_per_parent < 1 {
        return Err(ConfigError::Validation(format!(
            "max_children_per_parent must be >= 1, got {}",
            config.max_children_per_parent
        )));
    }

    if config.max_nested_sitemaps < 1 {
        return Err(ConfigError::Validation(format!(
            "max_nested_sitemaps must be >= 1, got {}",
            config.max_nested_sitemaps
        )));
    }

    if config.sub_batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "sub_batch_size must be >= 1, got {}",
            config.sub_batch_size
        )));
    }

    if config.batch_size < config.sub_batch_size {
        return Err(ConfigError::Validation(format!(
            "batch_size ({}) must be >= sub_batch_size ({})",
            config.batch_size, config.sub_batch_size
        )));
    }

    if config.max_urls_per_request < config.batch_size {
        return Err(ConfigError::Validation(format!(
            "max_urls_per_request ({}) must be >= batch_size ({})",
            config.max_urls_per_request, config.batch_size
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    for (name, path) in [
        ("json_path", &config.json_path),
        ("csv_path", &config.csv_path),
        ("summary_path", &config.summary_path),
    ] {
        if matches!(path, Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_client_name() {
        let mut config = Config::default();
        config.user_agent.client_name = "Lens Bot".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.client_name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.client_name = "lens-bot".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_batch_ordering() {
        let mut config = Config::default();
        config.limits.batch_size = 4;
        assert!(validate(&config).is_err());

        config.limits.batch_size = 10;
        config.limits.max_urls_per_request = 8;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.fetcher.page_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_empty_output_path() {
        let mut config = Config::default();
        config.output.csv_path = Some("  ".to_string());
        assert!(validate(&config).is_err());
    }
}
