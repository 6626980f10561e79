//! Transaction domain entity and its status lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_CANCELLED, STATUS_COMPLETED, STATUS_PENDING};
use crate::error::DomainError;

/// Transaction status.
///
/// `Pending` moves to either terminal state; terminal states never move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => STATUS_PENDING,
            TransactionStatus::Completed => STATUS_COMPLETED,
            TransactionStatus::Cancelled => STATUS_CANCELLED,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    /// Check whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Pending, TransactionStatus::Cancelled)
        )
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(TransactionStatus::Pending),
            STATUS_COMPLETED => Ok(TransactionStatus::Completed),
            STATUS_CANCELLED => Ok(TransactionStatus::Cancelled),
            other => Err(DomainError::InvalidValue(format!(
                "unknown transaction status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request by one user against another user's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub listing_id: i32,
    pub requester_id: i32,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    /// Set only once the transaction is completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}

/// Transaction request input. Status always starts as pending.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NewTransaction {
    pub listing_id: i32,
    pub requester_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(TransactionStatus::default(), TransactionStatus::Pending);
    }

    #[test]
    fn test_transitions() {
        use TransactionStatus::*;

        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_parse_and_display() {
        for raw in crate::VALID_STATUSES {
            let status: TransactionStatus = raw.parse().unwrap();
            assert_eq!(status.to_string(), *raw);
        }
        assert!("refunded".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&TransactionStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
