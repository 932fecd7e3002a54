//! Aggregate reporting derivations.
//!
//! Pure functions over the full user collection; the service layer gates
//! access, these just compute.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::types::{AffiliateLeaderboardEntry, AnalyticsSummary, Plan, ToolUsage, User};

/// Activity window for the "active users" count.
const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Whether two timestamps fall in the same calendar month.
pub fn same_calendar_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Compute the admin dashboard summary.
pub fn summarize(users: &[User], pro_price: f64, now: DateTime<Utc>) -> AnalyticsSummary {
    let active_cutoff = now - Duration::days(ACTIVE_WINDOW_DAYS);

    let pro_users = users.iter().filter(|u| u.plan == Plan::Pro).count();
    let new_users_this_month = users
        .iter()
        .filter(|u| same_calendar_month(u.created_at, now))
        .count();
    let active_users = users
        .iter()
        .filter(|u| u.searches.iter().any(|s| s.timestamp > active_cutoff))
        .count();

    // usize -> f64: user counts are far below f64's precise integer range
    #[allow(clippy::cast_precision_loss)]
    let estimated_revenue = pro_price * pro_users as f64;

    AnalyticsSummary {
        total_users: users.len(),
        new_users_this_month,
        active_users,
        pro_users,
        estimated_revenue,
        tool_usage: tool_usage(users),
    }
}

/// Per-tool usage counts across all users, descending.
///
/// Ties break alphabetically so the ordering is deterministic.
pub fn tool_usage(users: &[User]) -> Vec<ToolUsage> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for user in users {
        for search in &user.searches {
            *counts.entry(search.tool.as_str()).or_insert(0) += 1;
        }
    }

    let mut usage: Vec<ToolUsage> = counts
        .into_iter()
        .map(|(tool, count)| ToolUsage {
            tool: tool.to_string(),
            count,
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tool.cmp(&b.tool)));
    usage
}

/// Referral leaderboard, descending by credits earned.
pub fn leaderboard(users: &[User]) -> Vec<AffiliateLeaderboardEntry> {
    let mut entries: Vec<AffiliateLeaderboardEntry> = users
        .iter()
        .filter_map(|u| {
            u.affiliate_stats
                .as_ref()
                .map(|stats| AffiliateLeaderboardEntry {
                    user_id: u.id.clone(),
                    name: u.name.clone(),
                    email: u.email.clone(),
                    referral_code: stats.referral_code.clone(),
                    referral_count: stats.referral_count,
                    credits_earned: stats.credits_earned,
                })
        })
        .collect();
    entries.sort_by(|a, b| {
        b.credits_earned
            .cmp(&a.credits_earned)
            .then_with(|| b.referral_count.cmp(&a.referral_count))
    });
    entries
}
