//! DNS-over-HTTPS query and aggregation module.

use std::sync::LazyLock;

use futures::future::join_all;
use tokio::time::{timeout, Duration};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{DnsRecordGroup, DnsRecordType, DnsRecordValue, DohResponse};

/// DNS-over-HTTPS JSON gateway.
const DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// Per-query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for gateway calls.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Query one record type through the gateway.
///
/// Returns `Ok(None)` when the response status is non-zero or the answer
/// section is absent — absence of a record type is a normal outcome, not a
/// failure.
pub async fn fetch_record_type(
    domain: &str,
    record_type: DnsRecordType,
) -> ToolboxResult<Option<DnsRecordGroup>> {
    let response: DohResponse = HTTP_CLIENT
        .get(DOH_ENDPOINT)
        .query(&[("name", domain), ("type", &record_type.to_string())])
        .send()
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("DNS query failed: {e}")))?
        .json()
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("Failed to parse DNS response: {e}")))?;

    if response.status != 0 {
        return Ok(None);
    }
    let Some(answers) = response.answer else {
        return Ok(None);
    };

    // The gateway includes CNAME chain records in answers for other types;
    // keep only the requested type.
    let records: Vec<DnsRecordValue> = answers
        .into_iter()
        .filter(|a| a.record_type == record_type.wire_code())
        .map(|a| DnsRecordValue {
            value: clean_record_data(record_type, &a.data),
            ttl: a.ttl,
        })
        .collect();

    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(DnsRecordGroup {
        record_type,
        records,
    }))
}

/// Timeout-boxed variant of [`fetch_record_type`] that captures failures.
///
/// Errors and timeouts are logged and collapse to `None` so one branch of a
/// fan-out never aborts its siblings.
pub async fn lookup(domain: &str, record_type: DnsRecordType) -> Option<DnsRecordGroup> {
    match timeout(
        Duration::from_secs(QUERY_TIMEOUT_SECS),
        fetch_record_type(domain, record_type),
    )
    .await
    {
        Ok(Ok(group)) => group,
        Ok(Err(e)) => {
            log::warn!("{record_type} lookup for {domain} failed: {e}");
            None
        }
        Err(_) => {
            log::warn!("{record_type} lookup for {domain} timed out ({QUERY_TIMEOUT_SECS}s)");
            None
        }
    }
}

/// Query several record types concurrently.
///
/// The returned list preserves the order of `types`, not completion order;
/// types with no records (or whose query failed) are simply absent.
pub async fn aggregate_record_types(
    domain: &str,
    types: &[DnsRecordType],
) -> Vec<DnsRecordGroup> {
    let futures: Vec<_> = types
        .iter()
        .map(|&record_type| {
            let domain = domain.to_string();
            async move { lookup(&domain, record_type).await }
        })
        .collect();

    join_all(futures).await.into_iter().flatten().collect()
}

/// Clean gateway record data for display.
///
/// TXT data arrives quoted; hostname-valued records carry a trailing dot.
fn clean_record_data(record_type: DnsRecordType, data: &str) -> String {
    match record_type {
        DnsRecordType::Txt => data.trim_matches('"').to_string(),
        DnsRecordType::Ns | DnsRecordType::Cname | DnsRecordType::Mx => {
            data.trim_end_matches('.').to_string()
        }
        _ => data.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== clean_record_data tests ====================

    #[test]
    fn test_clean_txt_strips_quotes() {
        assert_eq!(
            clean_record_data(DnsRecordType::Txt, "\"v=spf1 include:_spf.google.com ~all\""),
            "v=spf1 include:_spf.google.com ~all"
        );
    }

    #[test]
    fn test_clean_ns_strips_trailing_dot() {
        assert_eq!(
            clean_record_data(DnsRecordType::Ns, "ns1.example.com."),
            "ns1.example.com"
        );
    }

    #[test]
    fn test_clean_mx_keeps_preference() {
        assert_eq!(
            clean_record_data(DnsRecordType::Mx, "10 mail.example.com."),
            "10 mail.example.com"
        );
    }

    #[test]
    fn test_clean_a_passthrough() {
        assert_eq!(
            clean_record_data(DnsRecordType::A, "93.184.216.34"),
            "93.184.216.34"
        );
    }

    // ==================== aggregation tests ====================

    #[tokio::test]
    async fn test_aggregate_empty_type_list() {
        let groups = aggregate_record_types("example.com", &[]).await;
        assert!(groups.is_empty());
    }

    // ==================== integration tests ====================

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_record_type_real() {
        let group = fetch_record_type("google.com", DnsRecordType::A)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(group.record_type, DnsRecordType::A);
        assert!(!group.records.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_record_type_nxdomain_is_none() {
        let group = fetch_record_type(
            "this-domain-definitely-does-not-exist-414243.com",
            DnsRecordType::A,
        )
        .await
        .unwrap();
        assert!(group.is_none());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_aggregate_preserves_requested_order() {
        let types = [DnsRecordType::Ns, DnsRecordType::A, DnsRecordType::Mx];
        let groups = aggregate_record_types("google.com", &types).await;
        let positions: Vec<usize> = groups
            .iter()
            .map(|g| types.iter().position(|t| *t == g.record_type).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
