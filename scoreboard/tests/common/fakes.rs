//! In-memory collaborators
//!
//! Cloneable fakes that share their state with the test, so a scoreboard
//! can own one copy while the test inspects another.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::MessageHandle;

use scoreboard::{
    ChannelSink, DisplayUnit, HandleStore, RawRow, RowSource, ScoreboardError, ScoreboardResult,
};

/// Data source whose rows and availability the test controls
#[derive(Clone, Default)]
pub struct FakeSource {
    rows: Arc<Mutex<Vec<RawRow>>>,
    offline: Arc<AtomicBool>,
}

impl FakeSource {
    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        let source = Self::default();
        source.set_rows(rows);
        source
    }

    pub fn set_rows(&self, rows: Vec<RawRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl RowSource for FakeSource {
    async fn fetch_rows(&self) -> ScoreboardResult<Vec<RawRow>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ScoreboardError::source_unavailable("fake source offline"));
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Channel that keeps messages in a map and counts every call
#[derive(Clone, Default)]
pub struct FakeChannel {
    messages: Arc<Mutex<BTreeMap<u64, DisplayUnit>>>,
    next_id: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
    edits: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
    broken: Arc<Mutex<HashSet<String>>>,
    fail_creates: Arc<AtomicBool>,
}

impl FakeChannel {
    pub fn new() -> Self {
        let channel = Self::default();
        channel.next_id.store(1000, Ordering::SeqCst);
        channel
    }

    /// Calls made so far as (creates, edits, deletes)
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.creates.load(Ordering::SeqCst),
            self.edits.load(Ordering::SeqCst),
            self.deletes.load(Ordering::SeqCst),
        )
    }

    pub fn reset_calls(&self) {
        self.creates.store(0, Ordering::SeqCst);
        self.edits.store(0, Ordering::SeqCst);
        self.deletes.store(0, Ordering::SeqCst);
    }

    /// Live messages in id order
    pub fn messages(&self) -> Vec<(String, DisplayUnit)> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(id, unit)| (id.to_string(), unit.clone()))
            .collect()
    }

    /// Make every edit and delete of `id` fail
    pub fn break_message(&self, id: &str) {
        self.broken.lock().unwrap().insert(id.to_string());
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Post a message behind the scoreboard's back
    pub fn seed(&self, unit: DisplayUnit) -> MessageHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        self.messages.lock().unwrap().insert(id, unit);
        MessageHandle::new(id.to_string()).unwrap()
    }

    fn lookup(&self, handle: &MessageHandle, operation: &str) -> ScoreboardResult<u64> {
        if self.broken.lock().unwrap().contains(handle.as_str()) {
            return Err(ScoreboardError::channel(operation, "missing permissions"));
        }
        let id: u64 = handle
            .as_str()
            .parse()
            .map_err(|_| ScoreboardError::channel(operation, "bad id"))?;
        if self.messages.lock().unwrap().contains_key(&id) {
            Ok(id)
        } else {
            Err(ScoreboardError::channel(operation, "Unknown Message"))
        }
    }
}

#[async_trait]
impl ChannelSink for FakeChannel {
    async fn create_message(&self, unit: &DisplayUnit) -> ScoreboardResult<MessageHandle> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ScoreboardError::channel("create", "rate limited"));
        }
        Ok(self.seed(unit.clone()))
    }

    async fn edit_message(
        &self,
        handle: &MessageHandle,
        unit: &DisplayUnit,
    ) -> ScoreboardResult<()> {
        self.edits.fetch_add(1, Ordering::SeqCst);
        let id = self.lookup(handle, "edit")?;
        self.messages.lock().unwrap().insert(id, unit.clone());
        Ok(())
    }

    async fn delete_message(&self, handle: &MessageHandle) -> ScoreboardResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let id = self.lookup(handle, "delete")?;
        self.messages.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Handle store kept in memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    saved: Arc<Mutex<Vec<MessageHandle>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn with_handles(handles: Vec<MessageHandle>) -> Self {
        let store = Self::default();
        *store.saved.lock().unwrap() = handles;
        store
    }

    pub fn saved(&self) -> Vec<MessageHandle> {
        self.saved.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HandleStore for MemoryStore {
    async fn load_handles(&self) -> ScoreboardResult<Vec<MessageHandle>> {
        Ok(self.saved())
    }

    async fn save_handles(&self, handles: &[MessageHandle]) -> ScoreboardResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.saved.lock().unwrap() = handles.to_vec();
        Ok(())
    }
}
