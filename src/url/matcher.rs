/// Checks whether a host falls under a domain pattern
///
/// `"*.linkedin.com"` covers `linkedin.com` and every subdomain of it;
/// a bare `"linkedin.com"` covers only that exact host. Comparison ignores
/// ASCII case.
///
/// # Examples
///
/// ```
/// use startup_harvest::url::matches_domain;
///
/// assert!(matches_domain("*.linkedin.com", "www.linkedin.com"));
/// assert!(matches_domain("*.linkedin.com", "linkedin.com"));
/// assert!(!matches_domain("*.linkedin.com", "notlinkedin.com"));
/// assert!(!matches_domain("linkedin.com", "hk.linkedin.com"));
/// ```
pub fn matches_domain(pattern: &str, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => host == pattern,
    }
}

/// Checks a host against a list of domain patterns
pub fn matches_any<S: AsRef<str>>(patterns: &[S], host: &str) -> bool {
    patterns.iter().any(|p| matches_domain(p.as_ref(), host))
}
