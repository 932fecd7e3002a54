//! Toolbox service façade.
//!
//! Each check is a stateless async operation over public gateways; the
//! façade normalizes and validates input, then delegates to the pipeline
//! modules.

pub mod classify;
pub mod doh;
pub mod email;
pub mod hosting;
pub mod ip;
pub mod page_fetch;
pub mod robots;
pub mod whois;

use std::net::IpAddr;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{
    DnsRecordGroup, DnsRecordType, EmailAuthReport, HostingReport, IpGeoInfo, NameserverReport,
    RobotsReport, WhoisReport,
};

/// Longest domain name accepted, per RFC 1035.
const MAX_DOMAIN_LEN: usize = 253;

/// Record types queried by the full DNS overview.
const OVERVIEW_TYPES: &[DnsRecordType] = &[
    DnsRecordType::A,
    DnsRecordType::Aaaa,
    DnsRecordType::Cname,
    DnsRecordType::Mx,
    DnsRecordType::Txt,
    DnsRecordType::Ns,
    DnsRecordType::Soa,
    DnsRecordType::Caa,
];

/// Normalize free-form user input into a bare domain name.
///
/// Strips a scheme, a leading `www.` label, and any path/query/fragment,
/// then trims and lowercases. Idempotent: normalizing a normalized domain
/// returns it unchanged.
#[must_use]
pub fn normalize_domain(input: &str) -> String {
    let mut s = input.trim();
    if let Some((_, rest)) = s.split_once("://") {
        s = rest;
    }
    s = s
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(s);
    let mut s = s.trim().to_lowercase();
    if let Some(stripped) = s.strip_prefix("www.") {
        s = stripped.to_string();
    }
    s
}

/// Validate a normalized domain (or literal IP) for lookup use.
///
/// IP literals pass through unchanged; domain names go through IDNA
/// ASCII conversion, which also enforces label syntax.
pub fn validate_domain(input: &str) -> ToolboxResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain must not be empty".to_string(),
        ));
    }
    if input.len() > MAX_DOMAIN_LEN {
        return Err(ToolboxError::ValidationError(format!(
            "Domain exceeds {MAX_DOMAIN_LEN} characters"
        )));
    }
    if input.parse::<IpAddr>().is_ok() {
        return Ok(input.to_string());
    }
    idna::domain_to_ascii_strict(input)
        .map_err(|_| ToolboxError::ValidationError(format!("Invalid domain name: {input}")))
}

/// Stateless façade over the diagnosis pipelines.
pub struct ToolboxService;

impl ToolboxService {
    /// Query all overview record types for a domain, concurrently.
    ///
    /// Groups come back in overview order; types with no records are absent.
    pub async fn dns_overview(domain: &str) -> ToolboxResult<Vec<DnsRecordGroup>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        Ok(doh::aggregate_record_types(&domain, OVERVIEW_TYPES).await)
    }

    /// Query a single record type for a domain.
    pub async fn dns_lookup(
        domain: &str,
        record_type: DnsRecordType,
    ) -> ToolboxResult<Option<DnsRecordGroup>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        doh::fetch_record_type(&domain, record_type).await
    }

    /// Diagnose where a domain is hosted.
    pub async fn hosting_check(domain: &str) -> ToolboxResult<Option<HostingReport>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        hosting::hosting_check(&domain).await
    }

    /// Diagnose a domain's nameserver setup and redundancy.
    pub async fn nameserver_check(domain: &str) -> ToolboxResult<Option<NameserverReport>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        hosting::nameserver_check(&domain).await
    }

    /// Score a domain's email authentication posture.
    pub async fn email_check(domain: &str) -> ToolboxResult<EmailAuthReport> {
        let domain = validate_domain(&normalize_domain(domain))?;
        email::email_check(&domain).await
    }

    /// Fetch and parse a domain's robots.txt.
    pub async fn robots_check(domain: &str) -> ToolboxResult<Option<RobotsReport>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        robots::robots_check(&domain).await
    }

    /// Look up WHOIS registration data for a domain.
    pub async fn whois_check(domain: &str, api_key: &str) -> ToolboxResult<Option<WhoisReport>> {
        let domain = validate_domain(&normalize_domain(domain))?;
        whois::whois_check(&domain, api_key).await
    }

    /// Geolocate an IP address.
    pub async fn ip_check(ip: &str) -> ToolboxResult<IpGeoInfo> {
        ip::geolocate(ip).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== normalize_domain tests ====================

    #[test]
    fn test_normalize_full_url() {
        assert_eq!(
            normalize_domain("https://www.Example.com/path?x=1"),
            "example.com"
        );
    }

    #[test]
    fn test_normalize_bare_domain_unchanged() {
        assert_eq!(normalize_domain("example.com"), "example.com");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_domain("HTTP://WWW.Example.COM/a#frag");
        assert_eq!(normalize_domain(&once), once);
    }

    #[test]
    fn test_normalize_strips_www_only_as_prefix() {
        assert_eq!(normalize_domain("www.example.com"), "example.com");
        assert_eq!(normalize_domain("wwwexample.com"), "wwwexample.com");
    }

    #[test]
    fn test_normalize_whitespace_and_case() {
        assert_eq!(normalize_domain("  Example.COM  "), "example.com");
    }

    #[test]
    fn test_normalize_query_without_path() {
        assert_eq!(normalize_domain("example.com?ref=abc"), "example.com");
    }

    // ==================== validate_domain tests ====================

    #[test]
    fn test_validate_plain_domain() {
        assert_eq!(validate_domain("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_validate_ip_passthrough() {
        assert_eq!(validate_domain("8.8.8.8").unwrap(), "8.8.8.8");
        assert_eq!(validate_domain("2001:4860:4860::8888").unwrap(), "2001:4860:4860::8888");
    }

    #[test]
    fn test_validate_idn_to_punycode() {
        assert_eq!(validate_domain("bücher.example").unwrap(), "xn--bcher-kva.example");
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_domain("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_overlong() {
        let long = format!("{}.com", "a".repeat(300));
        assert!(validate_domain(&long).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_labels() {
        assert!(validate_domain("exa mple.com").is_err());
        assert!(validate_domain("example..com").is_err());
    }
}
