//! Aggregate reporting types derived from the user collection.

use serde::{Deserialize, Serialize};

/// Usage count for a single tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsage {
    /// Tool name as recorded in search history.
    pub tool: String,
    /// Number of searches performed with this tool.
    pub count: u64,
}

/// Admin dashboard summary over all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Total registered users.
    pub total_users: usize,
    /// Users created in the current calendar month.
    pub new_users_this_month: usize,
    /// Users with at least one search in the trailing 30 days.
    pub active_users: usize,
    /// Users on the pro plan.
    pub pro_users: usize,
    /// Revenue estimate: pro plan price x pro user count.
    pub estimated_revenue: f64,
    /// Per-tool usage counts, descending.
    pub tool_usage: Vec<ToolUsage>,
}

/// One row of the referral leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLeaderboardEntry {
    /// User ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Referral code.
    pub referral_code: String,
    /// Number of referred signups.
    pub referral_count: u32,
    /// Lifetime credits earned from referrals.
    pub credits_earned: u32,
}
