//! Entitlement configuration.

use serde::{Deserialize, Serialize};

/// Startup configuration for the entitlement store.
///
/// Admin status is an explicit allow-list injected here, not a value baked
/// into the code; role is computed once at user creation and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementConfig {
    /// Emails granted the admin role at signup.
    pub admin_emails: Vec<String>,
    /// Credits granted to free-plan users each calendar month.
    pub monthly_credits: u32,
    /// Monthly price of the pro plan in USD, used for revenue estimates.
    pub pro_price: f64,
    /// Base URL that referral codes are appended to.
    pub referral_base_url: String,
}

impl EntitlementConfig {
    /// Whether `email` is on the admin allow-list (case-insensitive).
    #[must_use]
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|a| a.eq_ignore_ascii_case(email))
    }

    /// Build the shareable referral link for a referral code.
    #[must_use]
    pub fn referral_link(&self, code: &str) -> String {
        format!("{}?ref={code}", self.referral_base_url)
    }
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            admin_emails: Vec::new(),
            monthly_credits: 3,
            pro_price: 9.99,
            referral_base_url: "https://findaname.app/signup".to_string(),
        }
    }
}
