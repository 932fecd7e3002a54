//! User and entitlement record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role.
///
/// Computed once from the configured admin allow-list when the record is
/// created, then stored. Never re-derived ad hoc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user.
    User,
    /// Administrator.
    Admin,
}

/// Subscription plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free plan, gated by monthly credits.
    Free,
    /// Paid plan, unlimited searches.
    Pro,
}

/// Per-user referral counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateStats {
    /// Short referral code embedded in the referral link.
    pub referral_code: String,
    /// Number of signups attributed to this user.
    pub referral_count: u32,
    /// Lifetime credits earned from referrals.
    pub credits_earned: u32,
    /// Shareable referral link.
    pub referral_link: String,
}

/// Immutable search log entry.
///
/// Created only by `EntitlementService::record_search`; never mutated or
/// deleted individually (only as part of full-user deletion).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// Entry ID (UUID).
    pub id: String,
    /// Raw user input.
    pub term: String,
    /// Name of the tool invoked.
    pub tool: String,
    /// When the search was performed.
    #[serde(with = "crate::utils::datetime")]
    pub timestamp: DateTime<Utc>,
}

/// User identity plus entitlement record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID (UUID).
    pub id: String,
    /// Email address (unique key, stored lowercase).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Role, fixed at creation time.
    pub role: Role,
    /// Subscription plan.
    pub plan: Plan,
    /// Remaining monthly credits. Meaningful only when `plan` is `Free`.
    pub credits: u32,
    /// Timestamp of the last monthly credit refill.
    #[serde(with = "crate::utils::datetime")]
    pub last_reset_date: DateTime<Utc>,
    /// When the record was created.
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// Search history, most-recent-first.
    #[serde(default)]
    pub searches: Vec<SearchRecord>,
    /// Referral counters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_stats: Option<AffiliateStats>,
}

impl User {
    /// Whether this user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
