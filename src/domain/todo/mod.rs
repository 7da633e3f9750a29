//! Todo entity and its value types.

mod events;

pub use events::{TodoAction, TodoEvent};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::DomainError;

/// Priority of a todo item.
///
/// Stored as lowercase text in the database and serialized the same way
/// in API payloads and change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Textual form used for storage and transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DomainError::validation(format!(
                "Unknown priority '{}'",
                other
            ))),
        }
    }
}

/// A single todo item owned by one user and belonging to one list.
#[derive(Debug, Clone, Serialize)]
pub struct TodoItem {
    pub id: i64,
    pub content: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub list_id: i64,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trips_through_text() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn priorities_order_low_to_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}
