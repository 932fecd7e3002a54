//! Public types returned by toolbox operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// DNS record type for lookup and aggregation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Start of authority record.
    Soa,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Numeric RR type code used by the DNS-over-HTTPS wire format.
    #[must_use]
    pub fn wire_code(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Caa => 257,
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Cname => write!(f, "CNAME"),
            Self::Mx => write!(f, "MX"),
            Self::Txt => write!(f, "TXT"),
            Self::Ns => write!(f, "NS"),
            Self::Soa => write!(f, "SOA"),
            Self::Caa => write!(f, "CAA"),
        }
    }
}

impl FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SOA" => Ok(Self::Soa),
            "CAA" => Ok(Self::Caa),
            _ => Err(format!("Unsupported DNS record type: {s}")),
        }
    }
}

// ===== DNS-over-HTTPS wire shapes =====

/// Raw DNS-over-HTTPS JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct DohResponse {
    /// DNS response code; 0 is NOERROR.
    #[serde(rename = "Status")]
    pub status: i32,
    /// Answer section, absent when the name has no records of the type.
    #[serde(rename = "Answer")]
    pub answer: Option<Vec<DohAnswer>>,
}

/// One answer record from the DNS-over-HTTPS gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct DohAnswer {
    /// Owner name.
    pub name: String,
    /// Numeric RR type code.
    #[serde(rename = "type")]
    pub record_type: u16,
    /// Time-to-live in seconds.
    #[serde(rename = "TTL")]
    pub ttl: u32,
    /// Record data as presented by the gateway.
    pub data: String,
}

// ===== Classified lookup results =====

/// A single record value within a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordValue {
    /// Record data, cleaned for display (quotes and trailing dots removed).
    pub value: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
}

/// All records of one type for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordGroup {
    /// The record type this group holds.
    pub record_type: DnsRecordType,
    /// Records in gateway answer order.
    pub records: Vec<DnsRecordValue>,
}

// ===== Classification =====

/// Coarse nameserver diversity grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RedundancyGrade {
    /// Four or more nameservers or distinct IPs.
    Good,
    /// At least two nameservers.
    Fair,
    /// A single point of failure.
    Poor,
}

impl fmt::Display for RedundancyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Hosting diagnosis for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingReport {
    /// The queried domain.
    pub domain: String,
    /// First resolved IPv4 address.
    pub ip: String,
    /// Canonical provider name, or the raw org/ISP text, or "Unknown Provider".
    pub provider: String,
    /// Whether the provider is a known CDN/edge network.
    pub is_cdn: bool,
    /// Country of the resolved IP.
    pub country: Option<String>,
    /// City of the resolved IP.
    pub city: Option<String>,
    /// ISP of the resolved IP.
    pub isp: Option<String>,
    /// Organization of the resolved IP.
    pub org: Option<String>,
}

/// One authoritative nameserver with its resolved address and provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverHost {
    /// Nameserver hostname.
    pub host: String,
    /// Resolved IPv4 address, if resolution succeeded within the timeout.
    pub ip: Option<String>,
    /// Provider classified from the hostname.
    pub provider: String,
}

/// Nameserver diagnosis for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverReport {
    /// The queried domain.
    pub domain: String,
    /// Authoritative nameservers in answer order.
    pub nameservers: Vec<NameserverHost>,
    /// Number of distinct resolved IPs.
    pub distinct_ip_count: usize,
    /// Diversity grade.
    pub redundancy: RedundancyGrade,
}

// ===== Email deliverability =====

/// Weighted deliverability score with letter grade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliverabilityScore {
    /// 0..=100.
    pub score: u32,
    /// `A+`, `A`, `B`, `C`, `D`, or `F`.
    pub grade: String,
}

/// Email authentication diagnosis for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAuthReport {
    /// The queried domain.
    pub domain: String,
    /// MX records exist.
    pub has_mx: bool,
    /// An SPF policy exists in TXT.
    pub has_spf: bool,
    /// A DMARC policy exists at `_dmarc`.
    pub has_dmarc: bool,
    /// A DKIM key was found under a common selector.
    pub has_dkim: bool,
    /// MX exchange hosts.
    pub mx_hosts: Vec<String>,
    /// The SPF record text, if present.
    pub spf_record: Option<String>,
    /// The DMARC record text, if present.
    pub dmarc_record: Option<String>,
    /// Weighted score and grade.
    pub deliverability: DeliverabilityScore,
}

// ===== robots.txt =====

/// robots.txt directive kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RobotsDirective {
    /// `Allow:` line.
    Allow,
    /// `Disallow:` line.
    Disallow,
}

/// One allow/disallow entry within a rule group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotsEntry {
    /// Directive kind.
    pub directive: RobotsDirective,
    /// Path pattern. An empty `Disallow:` normalizes to `/`.
    pub path: String,
}

/// One `User-agent` rule group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotsRule {
    /// The user agent the group applies to.
    pub user_agent: String,
    /// Entries in file order.
    pub entries: Vec<RobotsEntry>,
}

/// Parsed robots.txt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotsReport {
    /// Rule groups in file order.
    pub rules: Vec<RobotsRule>,
    /// `Sitemap:` URLs, collected independent of grouping.
    pub sitemaps: Vec<String>,
}

// ===== WHOIS gateway =====

/// Envelope returned by the WHOIS JSON gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoisApiResponse {
    /// The record, when the lookup succeeded.
    #[serde(rename = "WhoisRecord")]
    pub whois_record: Option<WhoisRecord>,
    /// Error payload, when it did not.
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<WhoisApiError>,
}

/// Error payload from the WHOIS gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoisApiError {
    /// Human-readable message.
    pub msg: Option<String>,
}

/// Raw WHOIS record as shaped by the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    /// The registered domain name.
    pub domain_name: Option<String>,
    /// Registration creation date.
    pub created_date: Option<String>,
    /// Last update date.
    pub updated_date: Option<String>,
    /// Expiration date.
    pub expires_date: Option<String>,
    /// EPP status text.
    pub status: Option<String>,
    /// Sponsoring registrar.
    pub registrar_name: Option<String>,
    /// Nameserver block.
    pub name_servers: Option<WhoisNameServers>,
    /// Registrant contact block.
    pub registrant: Option<WhoisContact>,
}

/// Nameserver block inside a WHOIS record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisNameServers {
    /// Authoritative nameserver hostnames.
    #[serde(default)]
    pub host_names: Vec<String>,
}

/// Contact block inside a WHOIS record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisContact {
    /// Organization name.
    pub organization: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// Derived WHOIS report with parsed dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisReport {
    /// The queried domain.
    pub domain: String,
    /// Sponsoring registrar.
    pub registrar: Option<String>,
    /// Creation date as reported.
    pub created_date: Option<String>,
    /// Last update date as reported.
    pub updated_date: Option<String>,
    /// Expiration date as reported.
    pub expires_date: Option<String>,
    /// EPP status text.
    pub status: Option<String>,
    /// Authoritative nameservers, lowercased.
    pub name_servers: Vec<String>,
    /// Registrant organization.
    pub registrant_org: Option<String>,
    /// Domain age in days, when the creation date parsed.
    pub age_days: Option<i64>,
    /// Days until expiry (negative when past due), when the date parsed.
    pub days_until_expiry: Option<i64>,
}

// ===== IP geolocation =====

/// Geolocation response for a single IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpGeoInfo {
    /// `"success"` or `"fail"`.
    pub status: String,
    /// Failure reason, present when `status` is `"fail"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Internet Service Provider.
    pub isp: Option<String>,
    /// Organization.
    pub org: Option<String>,
    /// AS number and name, e.g. `"AS16509 Amazon.com, Inc."`.
    #[serde(rename = "as")]
    pub asn: Option<String>,
}

// ===== Page fetch relay =====

/// Page fetch result from the CORS relay.
#[derive(Debug, Clone, Deserialize)]
pub struct PageFetchResult {
    /// Response body as text.
    pub contents: String,
    /// Relay-reported status of the upstream fetch.
    pub status: PageFetchStatus,
}

/// Upstream status block from the CORS relay.
#[derive(Debug, Clone, Deserialize)]
pub struct PageFetchStatus {
    /// Upstream HTTP status code.
    pub http_code: u16,
    /// Final URL after redirects.
    pub url: String,
    /// Upstream content type, if reported.
    pub content_type: Option<String>,
}
