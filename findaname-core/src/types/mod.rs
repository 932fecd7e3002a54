//! Domain type definitions.

mod analytics;
mod session;
mod user;

pub use analytics::{AffiliateLeaderboardEntry, AnalyticsSummary, ToolUsage};
pub use session::{LoginIdentity, ViewMode};
pub use user::{AffiliateStats, Plan, Role, SearchRecord, User};
