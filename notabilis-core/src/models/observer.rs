//! Observer identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An observer's account identity.
///
/// Read-only; sourced per query from observation and leaderboard
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observer {
    /// Unique user id.
    pub id: u64,
    /// Account login.
    pub login: String,
    /// Display name, when set.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL, when set.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Lifetime observation count.
    #[serde(default)]
    pub observations_count: u64,
    /// Lifetime species count.
    #[serde(default)]
    pub species_count: u64,
}

impl Observer {
    /// Returns the display name when set, otherwise the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}

/// One row of the observer leaderboard for a place and window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverCount {
    /// The observer's user id.
    pub user_id: u64,
    /// Observations within the queried window.
    pub observation_count: u64,
    /// Distinct species within the queried window.
    pub species_count: u64,
    /// The observer's identity.
    pub user: Observer,
}
