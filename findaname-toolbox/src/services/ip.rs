//! IP geolocation module.

use std::net::IpAddr;
use std::sync::LazyLock;

use tokio::time::{timeout, Duration};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::IpGeoInfo;

/// Geolocation gateway; the free tier is HTTP-only.
const GEO_ENDPOINT: &str = "http://ip-api.com/json";

/// Fields requested from the gateway.
const GEO_FIELDS: &str = "status,message,country,city,isp,org,as";

/// Per-query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for gateway calls.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Geolocate an IP address.
///
/// The input must parse as an IPv4 or IPv6 address; a gateway `"fail"`
/// status (reserved ranges, rate limits) surfaces as a network error with
/// the gateway's own message.
pub async fn geolocate(ip: &str) -> ToolboxResult<IpGeoInfo> {
    let ip = ip.trim();
    if ip.parse::<IpAddr>().is_err() {
        return Err(ToolboxError::ValidationError(format!(
            "Invalid IP address: {ip}"
        )));
    }

    let url = format!("{GEO_ENDPOINT}/{ip}?fields={GEO_FIELDS}");
    let info = timeout(Duration::from_secs(QUERY_TIMEOUT_SECS), async {
        HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolboxError::NetworkError(format!("Geolocation query failed: {e}")))?
            .json::<IpGeoInfo>()
            .await
            .map_err(|e| {
                ToolboxError::NetworkError(format!("Failed to parse geolocation response: {e}"))
            })
    })
    .await
    .map_err(|_| {
        ToolboxError::NetworkError(format!("Geolocation query timed out ({QUERY_TIMEOUT_SECS}s)"))
    })??;

    if info.status != "success" {
        let reason = info
            .message
            .unwrap_or_else(|| "unknown gateway failure".to_string());
        return Err(ToolboxError::NetworkError(format!(
            "Geolocation lookup failed: {reason}"
        )));
    }

    Ok(info)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_geolocate_rejects_invalid_ip() {
        let err = geolocate("not-an-ip").await.unwrap_err();
        assert!(matches!(err, ToolboxError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_geolocate_rejects_hostname() {
        let err = geolocate("example.com").await.unwrap_err();
        assert!(matches!(err, ToolboxError::ValidationError(_)));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_geolocate_real() {
        let info = geolocate("8.8.8.8").await.expect("lookup failed");
        assert_eq!(info.status, "success");
        assert!(info.country.is_some());
    }
}
