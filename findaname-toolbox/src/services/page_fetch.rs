//! Page fetch through the CORS relay.

use std::sync::LazyLock;

use tokio::time::{timeout, Duration};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::PageFetchResult;

/// CORS relay endpoint; wraps the upstream body and status in JSON.
const RELAY_ENDPOINT: &str = "https://api.allorigins.win/get";

/// Per-fetch timeout in seconds.
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for relay calls.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Fetch a URL through the relay and return its body with upstream status.
pub async fn fetch_page(url: &str) -> ToolboxResult<PageFetchResult> {
    let relay_url = format!("{RELAY_ENDPOINT}?url={}", urlencoding::encode(url));

    let response = timeout(
        Duration::from_secs(FETCH_TIMEOUT_SECS),
        async {
            HTTP_CLIENT
                .get(&relay_url)
                .send()
                .await
                .map_err(|e| ToolboxError::NetworkError(format!("Page fetch failed: {e}")))?
                .json::<PageFetchResult>()
                .await
                .map_err(|e| {
                    ToolboxError::NetworkError(format!("Failed to parse relay response: {e}"))
                })
        },
    )
    .await
    .map_err(|_| {
        ToolboxError::NetworkError(format!("Page fetch timed out ({FETCH_TIMEOUT_SECS}s)"))
    })??;

    Ok(response)
}

/// Whether relay contents look like a plain-text resource rather than an
/// HTML error page or block notice.
#[must_use]
pub fn is_valid_text_resource(contents: &str) -> bool {
    let trimmed = contents.trim();
    if trimmed.len() < 2 {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    !(lowered.starts_with("<!doctype") || lowered.starts_with("<html") || lowered.contains("access denied"))
}
