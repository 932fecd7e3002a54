//! Provider identification and redundancy heuristics.
//!
//! The provider table is an ordered list of `(substring, canonical name)`
//! pairs evaluated in order — first match wins. Keeping the heuristic data
//! declarative keeps it independently testable.

use crate::types::RedundancyGrade;

/// Ordered provider match table. Substrings are lowercase.
const PROVIDER_TABLE: &[(&str, &str)] = &[
    ("cloudflare", "Cloudflare"),
    ("amazon", "Amazon Web Services (AWS)"),
    ("aws", "Amazon Web Services (AWS)"),
    ("google", "Google Cloud"),
    ("azure", "Microsoft Azure"),
    ("microsoft", "Microsoft Azure"),
    ("digitalocean", "DigitalOcean"),
    ("linode", "Linode (Akamai)"),
    ("akamai", "Akamai"),
    ("vultr", "Vultr"),
    ("ovh", "OVH"),
    ("hetzner", "Hetzner"),
    ("godaddy", "GoDaddy"),
    ("hostgator", "HostGator"),
    ("bluehost", "Bluehost"),
    ("siteground", "SiteGround"),
    ("namecheap", "Namecheap"),
    ("registrar-servers", "Namecheap"),
    ("vercel", "Vercel"),
    ("netlify", "Netlify"),
    ("fastly", "Fastly"),
    ("awsdns", "Amazon Web Services (AWS)"),
    ("wixdns", "Wix"),
    ("squarespace", "Squarespace"),
    ("shopify", "Shopify"),
    ("github", "GitHub Pages"),
];

/// Providers that operate as CDN/edge networks.
const CDN_PROVIDERS: &[&str] = &[
    "Cloudflare",
    "Fastly",
    "Akamai",
    "Vercel",
    "Netlify",
    "Amazon Web Services (AWS)",
];

/// Identify a provider from organization/ISP/ASN-or-hostname text.
///
/// All three signals are matched case-insensitively against the table. When
/// nothing matches, falls back to the raw organization (then ISP) text, and
/// finally to `"Unknown Provider"`.
#[must_use]
pub fn identify_provider(org: &str, isp: &str, extra: &str) -> String {
    let haystack = format!("{org} {isp} {extra}").to_lowercase();
    for (needle, canonical) in PROVIDER_TABLE {
        if haystack.contains(needle) {
            return (*canonical).to_string();
        }
    }

    let org = org.trim();
    if !org.is_empty() {
        return org.to_string();
    }
    let isp = isp.trim();
    if !isp.is_empty() {
        return isp.to_string();
    }
    "Unknown Provider".to_string()
}

/// Whether a canonical provider name is a known CDN/edge network.
#[must_use]
pub fn is_cdn_provider(provider: &str) -> bool {
    CDN_PROVIDERS.contains(&provider)
}

/// Grade nameserver diversity.
#[must_use]
pub fn assess_redundancy(nameserver_count: usize, distinct_ip_count: usize) -> RedundancyGrade {
    if nameserver_count >= 4 || distinct_ip_count >= 4 {
        RedundancyGrade::Good
    } else if nameserver_count >= 2 {
        RedundancyGrade::Fair
    } else {
        RedundancyGrade::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== identify_provider tests ====================

    #[test]
    fn test_identify_provider_aws_from_asn() {
        assert_eq!(
            identify_provider("AMAZON AWS EC2", "", "AS16509 AMAZON-02"),
            "Amazon Web Services (AWS)"
        );
    }

    #[test]
    fn test_identify_provider_case_insensitive() {
        assert_eq!(identify_provider("CLOUDFLARE, INC.", "", ""), "Cloudflare");
    }

    #[test]
    fn test_identify_provider_first_match_wins() {
        // Both Cloudflare and Google appear; the table lists Cloudflare first.
        assert_eq!(
            identify_provider("Cloudflare", "Google Fiber", ""),
            "Cloudflare"
        );
    }

    #[test]
    fn test_identify_provider_from_nameserver_hostname() {
        assert_eq!(
            identify_provider("ns-123.awsdns-45.org", "", ""),
            "Amazon Web Services (AWS)"
        );
        assert_eq!(
            identify_provider("dns1.registrar-servers.com", "", ""),
            "Namecheap"
        );
    }

    #[test]
    fn test_identify_provider_falls_back_to_org() {
        assert_eq!(
            identify_provider("Contoso Hosting Ltd", "Some ISP", ""),
            "Contoso Hosting Ltd"
        );
    }

    #[test]
    fn test_identify_provider_falls_back_to_isp() {
        assert_eq!(identify_provider("  ", "Some ISP", ""), "Some ISP");
    }

    #[test]
    fn test_identify_provider_unknown() {
        assert_eq!(identify_provider("", "", ""), "Unknown Provider");
    }

    // ==================== is_cdn_provider tests ====================

    #[test]
    fn test_is_cdn_provider() {
        assert!(is_cdn_provider("Cloudflare"));
        assert!(is_cdn_provider("Fastly"));
        assert!(!is_cdn_provider("Hetzner"));
        assert!(!is_cdn_provider("Unknown Provider"));
    }

    // ==================== assess_redundancy tests ====================

    #[test]
    fn test_assess_redundancy_good_by_nameservers() {
        assert_eq!(assess_redundancy(4, 1), RedundancyGrade::Good);
    }

    #[test]
    fn test_assess_redundancy_good_by_distinct_ips() {
        assert_eq!(assess_redundancy(1, 4), RedundancyGrade::Good);
    }

    #[test]
    fn test_assess_redundancy_fair() {
        assert_eq!(assess_redundancy(2, 2), RedundancyGrade::Fair);
        assert_eq!(assess_redundancy(3, 1), RedundancyGrade::Fair);
    }

    #[test]
    fn test_assess_redundancy_poor() {
        assert_eq!(assess_redundancy(1, 1), RedundancyGrade::Poor);
        assert_eq!(assess_redundancy(0, 0), RedundancyGrade::Poor);
    }
}
