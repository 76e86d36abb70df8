//! HTML parsing for listing and detail pages
//!
//! Listing pages yield team links; detail pages yield the team's website and
//! contact email. Both are plain selector lookups over the rendered document.

use crate::config::SiteConfig;
use crate::crawler::category::classify_href;
use crate::model::LinkEntry;
use crate::url::{extract_host, matches_any, resolve_href};
use crate::HarvestError;
use scraper::{Html, Selector};
use url::Url;

/// Contact details found on one detail page, after noise filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub website: Option<String>,
    pub email: Option<String>,
}

/// Extracts team links from a listing page
///
/// # Link Extraction Rules
///
/// - Only anchors whose href falls under a known team category are kept
/// - `display_name` is the anchor's visible text, trimmed
/// - `target_url` is the href resolved against `base_url`
/// - Anchors with an empty name or href are skipped
///
/// Duplicates are returned as found; the caller's link set drops them.
pub fn parse_listing(html: &str, base_url: &Url, team_root: &str) -> Vec<LinkEntry> {
    let document = Html::parse_document(html);
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchor_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !classify_href(href, team_root).is_team() {
                return None;
            }

            let name = anchor.text().collect::<String>().trim().to_string();
            if name.is_empty() {
                return None;
            }

            let target = resolve_href(base_url, href)?;
            Some(LinkEntry::new(name, target))
        })
        .collect()
}

/// Compiled extraction rules for detail pages
///
/// # Field Rules
///
/// | Field | Source | Discarded when |
/// |-------|--------|----------------|
/// | website | first `a[href^='http']` not containing the site's own domain | host is on the social denylist |
/// | email | first `a[href^='mailto:']`, scheme stripped | equals the site's generic address (any case) |
///
/// "First" means first in document order, with no ranking. An analytics or
/// ad link that happens to come first will be picked as the website.
#[derive(Debug, Clone)]
pub struct ContactRules {
    website_selector: Selector,
    email_selector: Selector,
    social_domains: Vec<String>,
    generic_email: String,
}

impl ContactRules {
    pub fn new(
        own_domain: &str,
        social_domains: Vec<String>,
        generic_email: &str,
    ) -> Result<Self, HarvestError> {
        let website_css = format!("a[href^='http']:not([href*='{}'])", own_domain);
        let website_selector =
            Selector::parse(&website_css).map_err(|_| HarvestError::Selector(website_css.clone()))?;
        let email_selector = Selector::parse("a[href^='mailto:']")
            .map_err(|_| HarvestError::Selector("a[href^='mailto:']".to_string()))?;

        Ok(Self {
            website_selector,
            email_selector,
            social_domains,
            generic_email: generic_email.to_string(),
        })
    }

    pub fn from_site(site: &SiteConfig) -> Result<Self, HarvestError> {
        Self::new(&site.own_domain, site.social_domains.clone(), &site.generic_email)
    }

    /// Extracts website and email from a detail page
    pub fn extract(&self, html: &str) -> ContactInfo {
        let document = Html::parse_document(html);
        ContactInfo {
            website: self.extract_website(&document),
            email: self.extract_email(&document),
        }
    }

    fn extract_website(&self, document: &Html) -> Option<String> {
        let href = document
            .select(&self.website_selector)
            .next()?
            .value()
            .attr("href")?
            .to_string();

        if self.is_social(&href) {
            tracing::debug!("Discarding social link {}", href);
            return None;
        }

        Some(href)
    }

    fn extract_email(&self, document: &Html) -> Option<String> {
        let href = document
            .select(&self.email_selector)
            .next()?
            .value()
            .attr("href")?;

        let email = href.strip_prefix("mailto:").unwrap_or(href).to_string();

        if email.to_lowercase() == self.generic_email.to_lowercase() {
            tracing::debug!("Discarding generic contact address {}", email);
            return None;
        }

        Some(email)
    }

    fn is_social(&self, href: &str) -> bool {
        extract_host(href)
            .map(|host| matches_any(&self.social_domains, &host))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    const ROOT: &str = "/hktech300/start-ups/";

    fn base_url() -> Url {
        Url::parse("https://www.cityu.edu.hk").unwrap()
    }

    fn rules() -> ContactRules {
        ContactRules::from_site(&SiteConfig::default()).unwrap()
    }

    fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_parse_listing_all_categories() {
        let html = page(
            r#"
            <a href="/hktech300/start-ups/seed-fund-teams/acme">Acme</a>
            <a href="/hktech300/start-ups/ideation-teams/beta"> Beta Labs </a>
            <a href="/hktech300/start-ups/angel-fund-teams/gamma">Gamma</a>
            "#,
        );
        let links = parse_listing(&html, &base_url(), ROOT);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].display_name(), "Acme");
        assert_eq!(
            links[0].target_url(),
            "https://www.cityu.edu.hk/hktech300/start-ups/seed-fund-teams/acme"
        );
        assert_eq!(links[1].display_name(), "Beta Labs");
        assert_eq!(links[2].display_name(), "Gamma");
    }

    #[test]
    fn test_parse_listing_ignores_other_anchors() {
        let html = page(
            r#"
            <a href="/hktech300/start-ups/all-start-ups?page=1">Next</a>
            <a href="https://www.facebook.com/cityu">Facebook</a>
            <a href="/hktech300/start-ups/seed-fund-teams/acme">Acme</a>
            "#,
        );
        let links = parse_listing(&html, &base_url(), ROOT);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].display_name(), "Acme");
    }

    #[test]
    fn test_parse_listing_skips_empty_names() {
        let html = page(
            r#"
            <a href="/hktech300/start-ups/seed-fund-teams/acme"><img src="logo.png"></a>
            <a href="/hktech300/start-ups/seed-fund-teams/acme">   </a>
            <a href="/hktech300/start-ups/seed-fund-teams/acme">Acme</a>
            "#,
        );
        let links = parse_listing(&html, &base_url(), ROOT);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_parse_listing_nested_text() {
        let html = page(r#"<a href="/hktech300/start-ups/seed-fund-teams/acme"><span>Acme</span> <b>AI</b></a>"#);
        let links = parse_listing(&html, &base_url(), ROOT);
        assert_eq!(links[0].display_name(), "Acme AI");
    }

    #[test]
    fn test_parse_listing_keeps_duplicates_for_caller() {
        let html = page(
            r#"
            <a href="/hktech300/start-ups/seed-fund-teams/acme">Acme</a>
            <a href="/hktech300/start-ups/seed-fund-teams/acme">Acme</a>
            "#,
        );
        assert_eq!(parse_listing(&html, &base_url(), ROOT).len(), 2);
    }

    #[test]
    fn test_parse_listing_empty_page() {
        assert!(parse_listing(&page(""), &base_url(), ROOT).is_empty());
    }

    #[test]
    fn test_website_first_external_link() {
        let info = rules().extract(&page(
            r#"
            <a href="https://www.cityu.edu.hk/hktech300">Back</a>
            <a href="/relative">Relative</a>
            <a href="https://acme.io">Acme</a>
            <a href="https://other.io">Other</a>
            "#,
        ));
        assert_eq!(info.website, Some("https://acme.io".to_string()));
    }

    #[test]
    fn test_website_only_linkedin_is_discarded() {
        let info = rules().extract(&page(r#"<a href="https://www.linkedin.com/company/x">LinkedIn</a>"#));
        assert_eq!(info.website, None);
    }

    #[test]
    fn test_social_first_link_is_not_skipped_over() {
        // The first external link is taken as-is; a social hit blanks the field
        let info = rules().extract(&page(
            r#"
            <a href="https://facebook.com/acme">Facebook</a>
            <a href="https://acme.io">Acme</a>
            "#,
        ));
        assert_eq!(info.website, None);
    }

    #[test]
    fn test_tracking_link_wins_when_first() {
        let info = rules().extract(&page(
            r#"
            <a href="https://ads.tracker.example/click?id=1">Ad</a>
            <a href="https://acme.io">Acme</a>
            "#,
        ));
        assert_eq!(
            info.website,
            Some("https://ads.tracker.example/click?id=1".to_string())
        );
    }

    #[test]
    fn test_no_website() {
        let info = rules().extract(&page(r#"<a href="/only/internal">x</a>"#));
        assert_eq!(info.website, None);
    }

    #[test]
    fn test_email_generic_address_discarded() {
        let info = rules().extract(&page(r#"<a href="mailto:hktech300.info@cityu.edu.hk">Mail</a>"#));
        assert_eq!(info.email, None);

        let info = rules().extract(&page(r#"<a href="mailto:HKTech300.Info@CityU.edu.hk">Mail</a>"#));
        assert_eq!(info.email, None);
    }

    #[test]
    fn test_email_team_address_kept() {
        let info = rules().extract(&page(r#"<a href="mailto:jane@startup.io">Mail</a>"#));
        assert_eq!(info.email, Some("jane@startup.io".to_string()));
    }

    #[test]
    fn test_email_first_mailto_wins() {
        let info = rules().extract(&page(
            r#"
            <a href="mailto:hktech300.info@cityu.edu.hk">Office</a>
            <a href="mailto:jane@startup.io">Jane</a>
            "#,
        ));
        assert_eq!(info.email, None);
    }

    #[test]
    fn test_mailto_is_not_a_website() {
        let info = rules().extract(&page(r#"<a href="mailto:jane@startup.io">Mail</a>"#));
        assert_eq!(info.website, None);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert_eq!(rules().extract(&page("")), ContactInfo::default());
    }
}
