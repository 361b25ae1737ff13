//! Main entry point for the scoreboard binary
//!
//! Reads configuration from flags and environment (a `.env` file is loaded
//! first when present), wires the real services into the scoreboard and
//! runs the refresh loop until Ctrl+C.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::signal;

use scoreboard::{
    services::{
        handle_store::DEFAULT_HANDLES_FILE, ConfiguredSource, CsvRowSource, DiscordChannel,
        FileHandleStore, SheetsAuth, SheetsRowSource,
    },
    Scoreboard, ScoreboardConfig, ScoreboardError, ScoreboardResult,
};
use shared::{component_debug, logging, Component};

/// Publishes a ranked player scoreboard from a sheet to a Discord channel
#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(about = "Keeps a multi-message player scoreboard in a Discord channel in sync with a sheet")]
pub struct Args {
    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: String,

    /// Channel that shows the scoreboard
    #[arg(long, env = "LEADERBOARD_CHANNEL_ID")]
    pub channel_id: u64,

    /// Spreadsheet id of the player sheet
    #[arg(long, env = "SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Range (usually the tab name) to read from the sheet
    #[arg(long, env = "SHEET_RANGE", default_value = "Sheet1")]
    pub sheet_range: String,

    /// Sheets API key (sheet must be readable by link)
    #[arg(long, env = "SHEETS_API_KEY", hide_env_values = true)]
    pub sheets_api_key: Option<String>,

    /// OAuth access token for the Sheets API
    #[arg(long, env = "SHEETS_ACCESS_TOKEN", hide_env_values = true)]
    pub sheets_access_token: Option<String>,

    /// Leading rows of the sheet or CSV that hold column titles
    #[arg(long, env = "SHEET_HEADER_ROWS", default_value = "1")]
    pub header_rows: usize,

    /// Read rows from a local CSV export instead of the Sheets API
    #[arg(long, env = "CSV_PATH", conflicts_with = "sheet_id")]
    pub csv_path: Option<PathBuf>,

    /// File holding the published message ids
    #[arg(long, env = "MESSAGE_IDS_FILE", default_value = DEFAULT_HANDLES_FILE)]
    pub message_ids_file: PathBuf,

    /// Seconds between refresh cycles
    #[arg(long, env = "UPDATE_INTERVAL_SECONDS", default_value = "300")]
    pub interval: u64,

    /// Per-request timeout for Sheets and Discord calls, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value = "30")]
    pub http_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    fn config(&self) -> ScoreboardResult<ScoreboardConfig> {
        let config = ScoreboardConfig::default()
            .with_refresh_interval(Duration::from_secs(self.interval));
        config.validate()?;
        Ok(config)
    }

    fn source(&self, timeout: Duration) -> ScoreboardResult<ConfiguredSource> {
        if let Some(path) = &self.csv_path {
            return Ok(ConfiguredSource::Csv(
                CsvRowSource::new(path).with_header_rows(self.header_rows),
            ));
        }

        let sheet_id = self
            .sheet_id
            .clone()
            .ok_or_else(|| ScoreboardError::config("SHEET_ID or CSV_PATH is required"))?;
        let auth = match (&self.sheets_access_token, &self.sheets_api_key) {
            (Some(token), _) => SheetsAuth::BearerToken(token.clone()),
            (None, Some(key)) => SheetsAuth::ApiKey(key.clone()),
            (None, None) => {
                return Err(ScoreboardError::config(
                    "SHEETS_API_KEY or SHEETS_ACCESS_TOKEN is required with SHEET_ID",
                ))
            }
        };
        let source = SheetsRowSource::new(sheet_id, self.sheet_range.clone(), auth, timeout)?
            .with_header_rows(self.header_rows);
        Ok(ConfiguredSource::Sheets(source))
    }
}

#[tokio::main]
async fn main() -> ScoreboardResult<()> {
    // Environment file first so clap sees its values
    let _ = dotenv::dotenv();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(Component::Scheduler, "scoreboard service");

    if args.channel_id == 0 {
        return Err(ScoreboardError::config("LEADERBOARD_CHANNEL_ID must be set"));
    }

    let config = args.config()?;
    let timeout = Duration::from_secs(args.http_timeout.max(1));
    let source = args.source(timeout)?;
    let channel = DiscordChannel::new(
        args.discord_token.clone(),
        args.channel_id.to_string(),
        timeout,
    )?;
    let store = FileHandleStore::new(args.message_ids_file.clone());

    component_debug!(
        Component::Scheduler,
        "Channel: {}, ids file: {}, interval: {}s",
        args.channel_id,
        args.message_ids_file.display(),
        args.interval
    );

    // Create scoreboard with dependency injection
    let mut scoreboard = Scoreboard::new(config, source, channel, store);

    if args.once {
        scoreboard.run_once().await?;
        logging::log_success(Component::Scheduler, "Single cycle complete");
        return Ok(());
    }

    // Set up graceful shutdown
    let shutdown_sender = scoreboard.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(Component::Scheduler, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(Component::Scheduler, "Signal handling", &err);
            }
        }
    });

    scoreboard.run().await?;

    logging::log_success(Component::Scheduler, "Scoreboard stopped gracefully");
    Ok(())
}
