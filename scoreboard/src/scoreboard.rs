//! Main scoreboard service
//!
//! Owns the published state and drives reconciliation cycles against the
//! injected data source, channel and handle store. Cycles run to completion
//! inside the timer loop, so two cycles never overlap.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};

use shared::{component_debug, component_error, component_info, component_warn, logging, Component};

use crate::{
    config::ScoreboardConfig,
    core::{build_board, reconcile, PublishedState, ReconcileReport},
    error::ScoreboardResult,
    traits::{ChannelSink, HandleStore, RowSource},
};

/// Scoreboard service with injected collaborators
pub struct Scoreboard<S, C, H>
where
    S: RowSource + Send + Sync + 'static,
    C: ChannelSink + Send + Sync + 'static,
    H: HandleStore + Send + Sync + 'static,
{
    config: ScoreboardConfig,

    /// Injected services
    source: S,
    channel: C,
    store: H,

    /// Handles of the messages currently showing the board
    state: PublishedState,

    /// Completed cycles, successful or not
    cycles: u64,
    last_success: Option<DateTime<Utc>>,

    /// Shutdown signal
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<S, C, H> Scoreboard<S, C, H>
where
    S: RowSource + Send + Sync + 'static,
    C: ChannelSink + Send + Sync + 'static,
    H: HandleStore + Send + Sync + 'static,
{
    /// Create new scoreboard with injected dependencies
    pub fn new(config: ScoreboardConfig, source: S, channel: C, store: H) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            config,
            source,
            channel,
            store,
            state: PublishedState::new(),
            cycles: 0,
            last_success: None,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn state(&self) -> &PublishedState {
        &self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Restore the published handles; a failed load starts from an empty board
    pub async fn load_state(&mut self) {
        match self.store.load_handles().await {
            Ok(handles) => {
                component_info!(Component::Store, "📂 Loaded {} message handles", handles.len());
                self.state = PublishedState::from_handles(handles);
            }
            Err(e) => {
                component_warn!(
                    Component::Store,
                    "⚠️ Could not load message handles: {}. Starting with none.",
                    e
                );
                self.state = PublishedState::new();
            }
        }
    }

    /// Run one fetch, build and reconcile cycle
    ///
    /// A source failure returns before any channel call, leaving the
    /// published messages and state untouched.
    pub async fn run_cycle(&mut self) -> ScoreboardResult<ReconcileReport> {
        let started = Instant::now();
        self.cycles += 1;
        component_debug!(Component::Scheduler, "🔄 Starting cycle {}", self.cycles);

        let rows = match self.source.fetch_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                logging::log_error(Component::Source, "Fetching player rows", &e);
                return Err(e);
            }
        };

        let units = build_board(&rows, &self.config);
        component_debug!(
            Component::Scheduler,
            "Built {} display units from {} rows",
            units.len(),
            rows.len()
        );

        let report = reconcile(&mut self.state, &units, &self.channel, &self.store).await;

        if report.aborted {
            component_warn!(
                Component::Scheduler,
                "⚠️ Cycle {} aborted after {} creates; {} handles tracked",
                self.cycles,
                report.created,
                self.state.len()
            );
        } else {
            self.last_success = Some(Utc::now());
            component_info!(
                Component::Scheduler,
                "✅ Cycle {} done in {:?}: {} messages \
                 ({} created, {} updated, {} unchanged, {} deleted, {} failed)",
                self.cycles,
                started.elapsed(),
                self.state.len(),
                report.created,
                report.updated,
                report.unchanged,
                report.deleted,
                report.update_failures + report.delete_failures
            );
        }

        Ok(report)
    }

    /// Load state and run a single cycle
    pub async fn run_once(&mut self) -> ScoreboardResult<ReconcileReport> {
        self.load_state().await;
        self.run_cycle().await
    }

    /// Main loop: load state, run a cycle immediately, then one per interval
    pub async fn run(&mut self) -> ScoreboardResult<()> {
        self.load_state().await;

        let mut refresh = interval(self.config.refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        logging::log_progress(
            Component::Scheduler,
            "Refresh loop",
            &format!("every {}s", self.config.refresh_interval.as_secs()),
        );

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        component_error!(
                            Component::Scheduler,
                            "❌ Cycle failed: {}. Will retry on next interval.",
                            e
                        );
                    }
                },

                Some(_) = self.shutdown_rx.recv() => {
                    logging::log_shutdown(Component::Scheduler, "shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawRow;
    use crate::error::ScoreboardError;
    use crate::traits::{MockChannelSink, MockHandleStore, MockRowSource};
    use shared::MessageHandle;

    #[tokio::test]
    async fn test_source_failure_touches_nothing() {
        let mut source = MockRowSource::new();
        source
            .expect_fetch_rows()
            .times(1)
            .returning(|| Err(ScoreboardError::source_unavailable("sheet offline")));

        let mut channel = MockChannelSink::new();
        channel.expect_create_message().times(0);
        channel.expect_edit_message().times(0);
        channel.expect_delete_message().times(0);

        let mut store = MockHandleStore::new();
        store
            .expect_load_handles()
            .returning(|| Ok(vec![MessageHandle::new("9").unwrap()]));
        store.expect_save_handles().times(0);

        let mut scoreboard = Scoreboard::new(ScoreboardConfig::default(), source, channel, store);
        let result = scoreboard.run_once().await;

        assert!(matches!(result, Err(ScoreboardError::SourceUnavailable { .. })));
        assert_eq!(scoreboard.state().handles(), &[MessageHandle::new("9").unwrap()]);
        assert!(scoreboard.last_success().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_starts_empty() {
        let mut source = MockRowSource::new();
        source.expect_fetch_rows().returning(|| Ok(vec![RawRow::new(["", "Ann", "1"])]));

        let mut channel = MockChannelSink::new();
        channel
            .expect_create_message()
            .times(1)
            .returning(|_| Ok(MessageHandle::new("1").unwrap()));

        let mut store = MockHandleStore::new();
        store
            .expect_load_handles()
            .returning(|| Err(ScoreboardError::persistence("load", "ids.txt", "corrupt")));
        store.expect_save_handles().times(1).returning(|_| Ok(()));

        let mut scoreboard = Scoreboard::new(ScoreboardConfig::default(), source, channel, store);
        let report = scoreboard.run_once().await.unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(scoreboard.cycles(), 1);
        assert!(scoreboard.last_success().is_some());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut source = MockRowSource::new();
        source.expect_fetch_rows().returning(|| Ok(Vec::new()));

        let mut channel = MockChannelSink::new();
        channel
            .expect_create_message()
            .returning(|_| Ok(MessageHandle::new("1").unwrap()));
        channel.expect_edit_message().returning(|_, _| Ok(()));

        let mut store = MockHandleStore::new();
        store.expect_load_handles().returning(|| Ok(Vec::new()));
        store.expect_save_handles().returning(|_| Ok(()));

        let mut scoreboard = Scoreboard::new(ScoreboardConfig::default(), source, channel, store);
        let shutdown = scoreboard.get_shutdown_sender();
        shutdown.send(()).await.unwrap();

        scoreboard.run().await.unwrap();
        assert!(scoreboard.cycles() <= 1);
    }
}
