//! Caller identity and role.

use super::AnalyticsError;
use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every task.
    Admin,
    /// Full access to every task.
    Manager,
    /// Access restricted to tasks the user owns or supports.
    LimitedUser,
}

impl Role {
    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::LimitedUser => "limited_user",
        }
    }

    /// Returns the label shown on the employee profile.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::LimitedUser => "Employee",
        }
    }

    /// Returns `true` when the role sees every task unfiltered.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = AnalyticsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "limited_user" | "user" => Ok(Self::LimitedUser),
            _ => Err(AnalyticsError::UnknownRole(value.to_owned())),
        }
    }
}

/// Authenticated caller on whose behalf a dashboard request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    role: Role,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the user account.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the granted role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
