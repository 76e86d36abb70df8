use url::Url;

/// Extracts the lowercase host from an absolute URL string
///
/// Returns `None` when the string is not an absolute URL or has no host
/// (e.g. `mailto:` or `data:` URIs).
///
/// # Examples
///
/// ```
/// use startup_harvest::url::extract_host;
///
/// assert_eq!(extract_host("https://WWW.Acme.io/about"), Some("www.acme.io".to_string()));
/// assert_eq!(extract_host("mailto:jane@acme.io"), None);
/// assert_eq!(extract_host("/relative/path"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()?
        .host_str()
        .map(|h| h.to_lowercase())
}
