//! Service implementations
//!
//! Real implementations of the collaborator traits. These are thin I/O
//! wrappers; everything they return is plain data for the core.

pub mod csv_source;
pub mod discord;
pub mod handle_store;
pub mod sheets;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use csv_source::CsvRowSource;
pub use discord::DiscordChannel;
pub use handle_store::FileHandleStore;
pub use sheets::{SheetsAuth, SheetsRowSource};

use async_trait::async_trait;

use crate::core::RawRow;
use crate::error::ScoreboardResult;
use crate::traits::RowSource;

/// Row source picked at startup from the configuration
pub enum ConfiguredSource {
    Sheets(SheetsRowSource),
    Csv(CsvRowSource),
}

#[async_trait]
impl RowSource for ConfiguredSource {
    async fn fetch_rows(&self) -> ScoreboardResult<Vec<RawRow>> {
        match self {
            ConfiguredSource::Sheets(source) => source.fetch_rows().await,
            ConfiguredSource::Csv(source) => source.fetch_rows().await,
        }
    }
}
