//! Hosting and nameserver diagnosis pipelines.

use std::collections::BTreeSet;

use futures::future::join_all;

use crate::error::ToolboxResult;
use crate::types::{DnsRecordType, HostingReport, NameserverHost, NameserverReport};

use super::{classify, doh, ip};

/// Diagnose where a domain is hosted.
///
/// Resolves the first A record, geolocates it, and classifies the provider
/// from the organization/ISP/ASN text. Returns `Ok(None)` when the domain
/// has no A records.
pub async fn hosting_check(domain: &str) -> ToolboxResult<Option<HostingReport>> {
    let Some(group) = doh::fetch_record_type(domain, DnsRecordType::A).await? else {
        return Ok(None);
    };
    let Some(first) = group.records.first() else {
        return Ok(None);
    };
    let address = first.value.clone();

    let geo = ip::geolocate(&address).await?;
    let provider = classify::identify_provider(
        geo.org.as_deref().unwrap_or_default(),
        geo.isp.as_deref().unwrap_or_default(),
        geo.asn.as_deref().unwrap_or_default(),
    );
    let is_cdn = classify::is_cdn_provider(&provider);

    Ok(Some(HostingReport {
        domain: domain.to_string(),
        ip: address,
        provider,
        is_cdn,
        country: geo.country,
        city: geo.city,
        isp: geo.isp,
        org: geo.org,
    }))
}

/// Diagnose a domain's authoritative nameserver setup.
///
/// Resolves NS records, then resolves each nameserver's address concurrently
/// (failures collapse to a host without an address), counts distinct
/// addresses, and grades diversity. Returns `Ok(None)` when the domain has
/// no NS records.
pub async fn nameserver_check(domain: &str) -> ToolboxResult<Option<NameserverReport>> {
    let Some(group) = doh::fetch_record_type(domain, DnsRecordType::Ns).await? else {
        return Ok(None);
    };

    let futures: Vec<_> = group
        .records
        .iter()
        .map(|record| {
            let host = record.value.clone();
            async move {
                let address = doh::lookup(&host, DnsRecordType::A)
                    .await
                    .and_then(|g| g.records.first().map(|r| r.value.clone()));
                let provider = classify::identify_provider(&host, "", "");
                NameserverHost {
                    host,
                    ip: address,
                    provider,
                }
            }
        })
        .collect();

    let nameservers = join_all(futures).await;

    let distinct_ips: BTreeSet<&String> =
        nameservers.iter().filter_map(|ns| ns.ip.as_ref()).collect();
    let distinct_ip_count = distinct_ips.len();
    let redundancy = classify::assess_redundancy(nameservers.len(), distinct_ip_count);

    Ok(Some(NameserverReport {
        domain: domain.to_string(),
        nameservers,
        distinct_ip_count,
        redundancy,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_hosting_check_real() {
        let report = hosting_check("github.com").await.unwrap().unwrap();
        assert!(!report.ip.is_empty());
        assert_ne!(report.provider, "Unknown Provider");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_nameserver_check_real() {
        let report = nameserver_check("google.com").await.unwrap().unwrap();
        assert!(report.nameservers.len() >= 2);
        assert!(report.distinct_ip_count >= 1);
    }
}
