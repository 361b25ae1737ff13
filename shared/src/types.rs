//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

/// Part of the service that emitted a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Timer loop and cycle driver
    Scheduler,
    /// Diff-and-apply against the published messages
    Reconciler,
    /// Tabular data source
    Source,
    /// Chat channel sink
    Channel,
    /// Persistence of published handles
    Store,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Scheduler => write!(f, "scheduler"),
            Component::Reconciler => write!(f, "reconciler"),
            Component::Source => write!(f, "source"),
            Component::Channel => write!(f, "channel"),
            Component::Store => write!(f, "store"),
        }
    }
}

/// Opaque identifier of one published chat message
///
/// Handles are persisted as a comma separated list, so a valid handle is
/// non-empty and contains neither commas nor whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageHandle(String);

impl MessageHandle {
    pub fn new(raw: impl Into<String>) -> SharedResult<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(|c| c == ',' || c.is_whitespace()) {
            return Err(SharedError::InvalidHandle { input: raw });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageHandle {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MessageHandle {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageHandle> for String {
    fn from(handle: MessageHandle) -> Self {
        handle.0
    }
}
