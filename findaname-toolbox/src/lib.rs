//! Domain diagnosis toolbox.
//!
//! Stateless checks over public gateways: DNS record aggregation, hosting
//! and nameserver classification, email deliverability scoring, robots.txt
//! parsing, WHOIS, and IP geolocation.

pub mod error;
pub mod services;
pub mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{normalize_domain, validate_domain, ToolboxService};
pub use types::{
    DeliverabilityScore, DnsRecordGroup, DnsRecordType, DnsRecordValue, EmailAuthReport,
    HostingReport, IpGeoInfo, NameserverHost, NameserverReport, RedundancyGrade, RobotsDirective,
    RobotsEntry, RobotsReport, RobotsRule, WhoisReport,
};
