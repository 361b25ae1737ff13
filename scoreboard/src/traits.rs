//! Trait definitions with mockall annotations for testing
//!
//! The scoreboard talks to three collaborators: the tabular data source,
//! the chat channel that displays the board and the store that remembers
//! which messages were published. Each is injected through one of these
//! traits so the cycle can run against in-memory fakes or generated mocks.

use shared::MessageHandle;

use crate::core::{DisplayUnit, RawRow};
use crate::error::ScoreboardResult;

/// Source of raw player rows
#[mockall::automock]
#[async_trait::async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch every data row (header rows already removed)
    ///
    /// # Returns
    /// Rows in sheet order, or `SourceUnavailable` on connection or auth problems
    async fn fetch_rows(&self) -> ScoreboardResult<Vec<RawRow>>;
}

/// Chat channel holding the published board messages
#[mockall::automock]
#[async_trait::async_trait]
pub trait ChannelSink: Send + Sync {
    /// Post a new message with the unit's content
    ///
    /// # Returns
    /// Handle of the created message
    async fn create_message(&self, unit: &DisplayUnit) -> ScoreboardResult<MessageHandle>;

    /// Fetch an existing message and replace its content
    async fn edit_message(
        &self,
        handle: &MessageHandle,
        unit: &DisplayUnit,
    ) -> ScoreboardResult<()>;

    /// Fetch an existing message and delete it
    async fn delete_message(&self, handle: &MessageHandle) -> ScoreboardResult<()>;
}

/// Durable storage of the published handle list
#[mockall::automock]
#[async_trait::async_trait]
pub trait HandleStore: Send + Sync {
    /// Load the saved handles; a missing store yields an empty list
    async fn load_handles(&self) -> ScoreboardResult<Vec<MessageHandle>>;

    /// Overwrite the saved handles with `handles`
    async fn save_handles(&self, handles: &[MessageHandle]) -> ScoreboardResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mocks_return_configured_values() {
        let mut source = MockRowSource::new();
        source
            .expect_fetch_rows()
            .returning(|| Ok(vec![RawRow::new(["", "Ann", "1"])]));

        let mut store = MockHandleStore::new();
        store
            .expect_load_handles()
            .returning(|| Ok(vec![MessageHandle::new("7").unwrap()]));

        assert_eq!(source.fetch_rows().await.unwrap().len(), 1);
        assert_eq!(store.load_handles().await.unwrap()[0].as_str(), "7");
        let _channel = MockChannelSink::new();
    }
}
