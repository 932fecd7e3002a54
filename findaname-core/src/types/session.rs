//! Session-related types.

use serde::{Deserialize, Serialize};

/// Which dashboard the current session renders.
///
/// Admins may toggle between the two; everyone else is always `Client`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Admin dashboard.
    Admin,
    /// Regular client view.
    Client,
}

/// Identity payload supplied at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginIdentity {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Referral code the signup arrived with, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl LoginIdentity {
    /// Convenience constructor for a plain identity without a referral.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            avatar_url: None,
            referral_code: None,
        }
    }
}
