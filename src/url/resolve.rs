use url::Url;

/// Normalizes a string for identity comparison: trimmed and lowercased
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Resolves an anchor href against the site origin
///
/// Relative paths are joined onto `base`; absolute hrefs are kept as they are.
/// Returns `None` for empty or unparseable hrefs.
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    base.join(href).ok().map(|u| u.to_string())
}

/// Builds the URL of one listing page, e.g. `.../all-start-ups?page=3`
pub fn listing_page_url(
    base: &Url,
    listing_path: &str,
    page_param: &str,
    page: u32,
) -> Result<Url, url::ParseError> {
    let mut url = base.join(listing_path)?;
    url.query_pairs_mut()
        .append_pair(page_param, &page.to_string());
    Ok(url)
}
