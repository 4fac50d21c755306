//! Data product lifecycle status.
//!
//! Transitions:
//!   Draft → Pending (init)
//!   Pending → Approved (approve)
//!   Pending → Rejected (reject)
//!   Rejected → Pending (init, resubmission)
//!   Approved → Published (publish)
//!
//! Business approval policy is not decided here; this only guards the order
//! of the steps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataProductStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Published,
}

/// Lifecycle command applied to a data product version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Init,
    Approve,
    Reject,
    Publish,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {action} a data product in status '{from}'")]
    InvalidTransition {
        from: DataProductStatus,
        action: LifecycleAction,
    },
}

impl DataProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "published" => Some(Self::Published),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Status reached by applying `action`, if the transition is allowed.
    pub fn apply(self, action: LifecycleAction) -> Result<Self, LifecycleError> {
        use DataProductStatus::*;
        use LifecycleAction::*;

        match (self, action) {
            (Draft | Rejected, Init) => Ok(Pending),
            (Pending, Approve) => Ok(Approved),
            (Pending, Reject) => Ok(Rejected),
            (Approved, Publish) => Ok(Published),
            (from, action) => Err(LifecycleError::InvalidTransition { from, action }),
        }
    }
}

impl std::fmt::Display for DataProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Publish => "publish",
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
