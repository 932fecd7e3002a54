//! WHOIS lookup through the WhoisXML JSON gateway.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tokio::time::{timeout, Duration};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{WhoisApiResponse, WhoisRecord, WhoisReport};

/// WHOIS JSON gateway endpoint.
const WHOIS_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

/// Per-query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for gateway calls.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Look up WHOIS data for a domain.
///
/// Returns `Ok(None)` when the gateway has no record for the domain (typical
/// for unregistered names). A missing API key is a validation error before
/// any network call is made.
pub async fn whois_check(domain: &str, api_key: &str) -> ToolboxResult<Option<WhoisReport>> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ToolboxError::ValidationError(
            "WHOIS API key is not configured".to_string(),
        ));
    }

    let response = timeout(Duration::from_secs(QUERY_TIMEOUT_SECS), async {
        HTTP_CLIENT
            .get(WHOIS_ENDPOINT)
            .query(&[
                ("apiKey", api_key),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| ToolboxError::NetworkError(format!("WHOIS query failed: {e}")))?
            .json::<WhoisApiResponse>()
            .await
            .map_err(|e| {
                ToolboxError::NetworkError(format!("Failed to parse WHOIS response: {e}"))
            })
    })
    .await
    .map_err(|_| {
        ToolboxError::NetworkError(format!("WHOIS query timed out ({QUERY_TIMEOUT_SECS}s)"))
    })??;

    if let Some(error) = response.error_message {
        let msg = error.msg.unwrap_or_else(|| "unknown gateway error".to_string());
        return Err(ToolboxError::NetworkError(format!(
            "WHOIS lookup failed: {msg}"
        )));
    }
    let Some(record) = response.whois_record else {
        return Ok(None);
    };
    if record.domain_name.is_none() && record.registrar_name.is_none() {
        return Ok(None);
    }

    Ok(Some(build_report(domain, record)))
}

fn build_report(domain: &str, record: WhoisRecord) -> WhoisReport {
    let now = Utc::now();
    let age_days = record
        .created_date
        .as_deref()
        .and_then(parse_whois_date)
        .map(|d| (now - d).num_days());
    let days_until_expiry = record
        .expires_date
        .as_deref()
        .and_then(parse_whois_date)
        .map(|d| (d - now).num_days());

    WhoisReport {
        domain: domain.to_string(),
        registrar: record.registrar_name,
        created_date: record.created_date,
        updated_date: record.updated_date,
        expires_date: record.expires_date,
        status: record.status,
        name_servers: record
            .name_servers
            .map(|ns| {
                ns.host_names
                    .into_iter()
                    .map(|h| h.trim_end_matches('.').to_lowercase())
                    .collect()
            })
            .unwrap_or_default(),
        registrant_org: record.registrant.and_then(|c| c.organization),
        age_days,
        days_until_expiry,
    }
}

/// Parse the date formats the gateway is known to emit.
fn parse_whois_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
