//! Unified entitlement service.
//!
//! Single source of truth for who can search, how many credits they have,
//! and what they have searched for. The only component with write access to
//! persisted user state; every mutation is a whole-blob read-modify-write
//! through the injected [`UserRepository`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{analytics, ServiceContext};
use crate::types::{
    AffiliateLeaderboardEntry, AffiliateStats, AnalyticsSummary, LoginIdentity, Plan, Role,
    SearchRecord, User, ViewMode,
};

/// Credits granted to the referrer per referred signup.
const REFERRAL_BONUS_CREDITS: u32 = 1;

/// Active browser-tab session.
#[derive(Debug, Clone)]
struct Session {
    email: String,
    role: Role,
    view_mode: ViewMode,
}

/// Unified entitlement service.
pub struct EntitlementService {
    ctx: Arc<ServiceContext>,
    session: RwLock<Option<Session>>,
}

impl EntitlementService {
    /// Create an entitlement service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            session: RwLock::new(None),
        }
    }

    // ===== Session operations =====

    /// Log a user in, creating the record on first contact.
    ///
    /// New records start on the free plan with the configured monthly
    /// credits. Existing free-plan records get their credits refilled when
    /// the calendar month has rolled over since `last_reset_date` — calling
    /// `login` any number of times within the same month never grants extra
    /// credits.
    pub async fn login(&self, identity: LoginIdentity) -> CoreResult<User> {
        self.login_at(identity, Utc::now()).await
    }

    /// Clock-injected variant of [`login`](Self::login).
    pub async fn login_at(&self, identity: LoginIdentity, now: DateTime<Utc>) -> CoreResult<User> {
        let email = identity.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(CoreError::ValidationError("Email is required".to_string()));
        }

        let mut users = self.ctx.user_repository.load_all().await?;

        let user = if let Some(existing) = users.iter_mut().find(|u| u.email == email) {
            // Monthly refill applies to free-plan users only.
            if existing.plan == Plan::Free
                && !analytics::same_calendar_month(existing.last_reset_date, now)
            {
                existing.credits = self.ctx.config.monthly_credits;
                existing.last_reset_date = now;
                let refreshed = existing.clone();
                self.ctx.user_repository.save_all(&users).await?;
                refreshed
            } else {
                existing.clone()
            }
        } else {
            let user = self.create_user(&identity, &email, now);
            self.apply_referral(&mut users, identity.referral_code.as_deref());
            users.push(user.clone());
            self.ctx.user_repository.save_all(&users).await?;
            log::info!("Created user record for {email}");
            user
        };

        let view_mode = if user.is_admin() {
            ViewMode::Admin
        } else {
            ViewMode::Client
        };
        *self.session.write().await = Some(Session {
            email,
            role: user.role,
            view_mode,
        });

        Ok(user)
    }

    /// Clear the current session. No persisted state is altered.
    pub async fn logout(&self) {
        *self.session.write().await = None;
    }

    /// The user record backing the current session, if any.
    pub async fn current_user(&self) -> CoreResult<Option<User>> {
        let Some(email) = self.session_email().await else {
            return Ok(None);
        };
        self.find_user(&email).await
    }

    /// The current session's view mode, if logged in.
    pub async fn view_mode(&self) -> Option<ViewMode> {
        self.session.read().await.as_ref().map(|s| s.view_mode)
    }

    // ===== Entitlement queries =====

    /// Whether the current session may perform a search.
    ///
    /// `false` with no session; `true` for admins and pro users regardless
    /// of credit balance; otherwise `true` iff credits remain. Pure query,
    /// no side effects.
    pub async fn can_search(&self) -> bool {
        let Some(session) = self.session.read().await.clone() else {
            return false;
        };
        if session.role == Role::Admin {
            return true;
        }
        match self.find_user(&session.email).await {
            Ok(Some(user)) => user.plan == Plan::Pro || user.credits > 0,
            Ok(None) => false,
            Err(e) => {
                log::error!("Failed to load user for entitlement check: {e}");
                false
            }
        }
    }

    /// Record a completed search against the current session.
    ///
    /// Prepends a [`SearchRecord`] to the user's history and, on the free
    /// plan, decrements credits floored at zero. Silently does nothing when
    /// no one is logged in. Gating is the caller's job via
    /// [`can_search`](Self::can_search); this never blocks.
    pub async fn record_search(&self, term: &str, tool: &str) -> CoreResult<()> {
        let Some(email) = self.session_email().await else {
            return Ok(());
        };

        let mut users = self.ctx.user_repository.load_all().await?;
        let Some(user) = users.iter_mut().find(|u| u.email == email) else {
            log::warn!("Session user {email} no longer exists; search not recorded");
            return Ok(());
        };

        user.searches.insert(
            0,
            SearchRecord {
                id: uuid::Uuid::new_v4().to_string(),
                term: term.to_string(),
                tool: tool.to_string(),
                timestamp: Utc::now(),
            },
        );
        if user.plan == Plan::Free {
            user.credits = user.credits.saturating_sub(1);
        }

        self.ctx.user_repository.save_all(&users).await
    }

    /// Upgrade the session user to the pro plan.
    ///
    /// `details` is the opaque payment capture payload; it is logged, not
    /// interpreted. Credits are left untouched.
    pub async fn upgrade_plan(&self, details: Option<serde_json::Value>) -> CoreResult<()> {
        let Some(email) = self.session_email().await else {
            return Ok(());
        };

        let mut users = self.ctx.user_repository.load_all().await?;
        let Some(user) = users.iter_mut().find(|u| u.email == email) else {
            return Ok(());
        };

        user.plan = Plan::Pro;
        self.ctx.user_repository.save_all(&users).await?;

        let order_id = details
            .as_ref()
            .and_then(|d| d.get("id"))
            .and_then(|v| v.as_str())
            .unwrap_or("none");
        log::info!("Plan upgraded to pro for {email} (order: {order_id})");
        Ok(())
    }

    // ===== Admin operations =====
    // Each is a no-op (or returns an empty view) unless the session holds
    // the admin role.

    /// Snapshot of every user record. Empty for non-admin sessions.
    pub async fn get_all_users(&self) -> CoreResult<Vec<User>> {
        if !self.is_admin_session().await {
            return Ok(Vec::new());
        }
        self.ctx.user_repository.load_all().await
    }

    /// Set a user's plan by ID.
    pub async fn update_user_plan(&self, user_id: &str, plan: Plan) -> CoreResult<()> {
        if !self.is_admin_session().await {
            return Ok(());
        }
        self.mutate_user(user_id, |user| user.plan = plan).await
    }

    /// Set a user's credit balance by ID.
    pub async fn update_user_credits(&self, user_id: &str, credits: u32) -> CoreResult<()> {
        if !self.is_admin_session().await {
            return Ok(());
        }
        self.mutate_user(user_id, |user| user.credits = credits).await
    }

    /// Delete a user record, including its search history.
    pub async fn delete_user(&self, user_id: &str) -> CoreResult<()> {
        if !self.is_admin_session().await {
            return Ok(());
        }

        let mut users = self.ctx.user_repository.load_all().await?;
        let Some(pos) = users.iter().position(|u| u.id == user_id) else {
            return Err(CoreError::UserNotFound(user_id.to_string()));
        };
        let removed = users.remove(pos);
        self.ctx.user_repository.save_all(&users).await?;

        // An admin deleting their own record ends the session.
        let mut session = self.session.write().await;
        if session.as_ref().is_some_and(|s| s.email == removed.email) {
            *session = None;
        }
        Ok(())
    }

    /// Toggle the admin session between admin and client view.
    pub async fn switch_view_mode(&self) {
        let mut session = self.session.write().await;
        if let Some(s) = session.as_mut() {
            if s.role == Role::Admin {
                s.view_mode = match s.view_mode {
                    ViewMode::Admin => ViewMode::Client,
                    ViewMode::Client => ViewMode::Admin,
                };
            }
        }
    }

    /// Aggregate dashboard summary. `None` for non-admin sessions.
    pub async fn get_analytics(&self) -> CoreResult<Option<AnalyticsSummary>> {
        if !self.is_admin_session().await {
            return Ok(None);
        }
        let users = self.ctx.user_repository.load_all().await?;
        Ok(Some(analytics::summarize(
            &users,
            self.ctx.config.pro_price,
            Utc::now(),
        )))
    }

    /// Referral leaderboard. Empty for non-admin sessions.
    pub async fn get_affiliate_leaderboard(&self) -> CoreResult<Vec<AffiliateLeaderboardEntry>> {
        if !self.is_admin_session().await {
            return Ok(Vec::new());
        }
        let users = self.ctx.user_repository.load_all().await?;
        Ok(analytics::leaderboard(&users))
    }

    // ===== Internal helpers =====

    async fn session_email(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.email.clone())
    }

    async fn is_admin_session(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.role == Role::Admin)
    }

    async fn find_user(&self, email: &str) -> CoreResult<Option<User>> {
        let users = self.ctx.user_repository.load_all().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn mutate_user(
        &self,
        user_id: &str,
        apply: impl FnOnce(&mut User),
    ) -> CoreResult<()> {
        let mut users = self.ctx.user_repository.load_all().await?;
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Err(CoreError::UserNotFound(user_id.to_string()));
        };
        apply(user);
        self.ctx.user_repository.save_all(&users).await
    }

    /// Build a brand-new user record.
    fn create_user(&self, identity: &LoginIdentity, email: &str, now: DateTime<Utc>) -> User {
        let role = if self.ctx.config.is_admin_email(email) {
            Role::Admin
        } else {
            Role::User
        };
        let referral_code = new_referral_code();
        let referral_link = self.ctx.config.referral_link(&referral_code);

        User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: identity.name.clone(),
            avatar_url: identity.avatar_url.clone(),
            role,
            plan: Plan::Free,
            credits: self.ctx.config.monthly_credits,
            last_reset_date: now,
            created_at: now,
            searches: Vec::new(),
            affiliate_stats: Some(AffiliateStats {
                referral_code,
                referral_count: 0,
                credits_earned: 0,
                referral_link,
            }),
        }
    }

    /// Attribute a signup to its referrer, if the code matches anyone.
    ///
    /// The referrer's lifetime counters always move; the bonus is spendable
    /// only on the free plan (pro users have nothing to spend credits on).
    fn apply_referral(&self, users: &mut [User], code: Option<&str>) {
        let Some(code) = code else { return };
        let referrer = users.iter_mut().find(|u| {
            u.affiliate_stats
                .as_ref()
                .is_some_and(|s| s.referral_code == code)
        });
        match referrer {
            Some(referrer) => {
                if referrer.plan == Plan::Free {
                    referrer.credits += REFERRAL_BONUS_CREDITS;
                }
                if let Some(stats) = referrer.affiliate_stats.as_mut() {
                    stats.referral_count += 1;
                    stats.credits_earned += REFERRAL_BONUS_CREDITS;
                }
                log::info!("Referral {code} attributed to {}", referrer.email);
            }
            None => log::warn!("Signup carried unknown referral code: {code}"),
        }
    }
}

/// Generate a short referral code.
fn new_referral_code() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    uuid.chars().take(8).collect()
}
