use crate::config::types::{Config, CrawlConfig, OutputConfig, RendererConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawl_config(&config.crawl)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site description
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if !config.listing_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "listing-path must start with '/', got '{}'",
            config.listing_path
        )));
    }

    if config.page_param.trim().is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    if !config.team_path_root.starts_with('/') || !config.team_path_root.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "team-path-root must start and end with '/', got '{}'",
            config.team_path_root
        )));
    }

    // Both end up inside CSS attribute selectors
    if config.team_path_root.contains('\'') || config.own_domain.contains('\'') {
        return Err(ConfigError::Validation(
            "team-path-root and own-domain cannot contain quotes".to_string(),
        ));
    }

    validate_domain_string(&config.own_domain)?;
    validate_email(&config.generic_email)?;

    for pattern in &config.social_domains {
        validate_domain_pattern(pattern)?;
    }

    Ok(())
}

/// Validates traversal and retry settings
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.ready_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "ready-timeout-ms must be > 0".to_string(),
        ));
    }

    if config.backoff_min_ms > config.backoff_max_ms {
        return Err(ConfigError::Validation(format!(
            "backoff-min-ms ({}) cannot exceed backoff-max-ms ({})",
            config.backoff_min_ms, config.backoff_max_ms
        )));
    }

    Ok(())
}

/// Validates renderer launch parameters
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_load_timeout_secs == 0 || config.script_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page-load-timeout-secs and script-timeout-secs must be > 0".to_string(),
        ));
    }

    if let Some(executable) = &config.executable {
        if executable.trim().is_empty() {
            return Err(ConfigError::Validation(
                "executable cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if matches!(config.log_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "log-path cannot be empty when set".to_string(),
        ));
    }

    if matches!(config.summary_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::Validation(format!("Invalid generic-email: '{}'", email));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
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
    fn test_validate_domain_pattern() {
        assert!(validate_domain_pattern("linkedin.com").is_ok());
        assert!(validate_domain_pattern("*.linkedin.com").is_ok());
        assert!(validate_domain_pattern("www.linkedin.com").is_ok());

        assert!(validate_domain_pattern("").is_err());
        assert!(validate_domain_pattern("*.").is_err());
        assert!(validate_domain_pattern("linkedin").is_err());
        assert!(validate_domain_pattern(".linkedin.com").is_err());
        assert!(validate_domain_pattern("linkedin.com.").is_err());
        assert!(validate_domain_pattern("linked in.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("hktech300.info@cityu.edu.hk").is_ok());
        assert!(validate_email("info@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.site.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));

        config.site.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_bad_team_path_root() {
        let mut config = Config::default();
        config.site.team_path_root = "/hktech300/start-ups".to_string();
        assert!(validate(&config).is_err());

        config.site.team_path_root = "/it's/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_inverted_backoff_range() {
        let mut config = Config::default();
        config.crawl.backoff_min_ms = 7_000;
        config.crawl.backoff_max_ms = 6_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_attempt_bounds() {
        let mut config = Config::default();
        config.crawl.max_attempts = 0;
        assert!(validate(&config).is_err());

        config.crawl.max_attempts = 11;
        assert!(validate(&config).is_err());

        config.crawl.max_attempts = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = Config::default();
        config.renderer.window_height = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_output_paths_rejected() {
        let mut config = Config::default();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.output.log_path = Some(String::new());
        assert!(validate(&config).is_err());
    }
}
