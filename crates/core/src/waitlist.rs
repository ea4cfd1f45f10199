//! Waitlist entry lifecycle and access tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle stage of a waitlist entry.
///
/// Entries start as `Waiting`, move to `Invited` through the admin invite
/// action, and to `Joined` once the user completes onboarding (driven
/// outside this service). There is no transition back to `Waiting` and no
/// removal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Invited,
    Joined,
}

impl WaitlistStatus {
    /// The canonical lowercase form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Waiting => "waiting",
            WaitlistStatus::Invited => "invited",
            WaitlistStatus::Joined => "joined",
        }
    }
}

impl fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitlistStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(WaitlistStatus::Waiting),
            "invited" => Ok(WaitlistStatus::Invited),
            "joined" => Ok(WaitlistStatus::Joined),
            other => Err(CoreError::Validation(format!(
                "Unknown waitlist status: {other}"
            ))),
        }
    }
}

/// Administrator-set access tier, independent of [`WaitlistStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    General,
    EarlyAccess,
    Vip,
}

impl AccessLevel {
    /// The canonical lowercase form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::General => "general",
            AccessLevel::EarlyAccess => "early_access",
            AccessLevel::Vip => "vip",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(AccessLevel::General),
            "early_access" => Ok(AccessLevel::EarlyAccess),
            "vip" => Ok(AccessLevel::Vip),
            other => Err(CoreError::Validation(format!(
                "Unknown access level: {other}"
            ))),
        }
    }
}
