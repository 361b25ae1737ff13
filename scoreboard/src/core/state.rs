//! Published board state
//!
//! The ordered handles of the messages currently showing the board. Only
//! the handles are durable; the content last written at each position is
//! kept in memory so unchanged messages are not edited again.

use shared::MessageHandle;

use super::partition::DisplayUnit;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishedState {
    handles: Vec<MessageHandle>,
    /// Content known to be live at each position, `None` when unknown
    contents: Vec<Option<DisplayUnit>>,
}

impl PublishedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State restored from storage; the content of every message is unknown
    pub fn from_handles(handles: Vec<MessageHandle>) -> Self {
        let contents = vec![None; handles.len()];
        Self { handles, contents }
    }

    pub fn handles(&self) -> &[MessageHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Track a freshly created message
    pub fn push(&mut self, handle: MessageHandle, unit: DisplayUnit) {
        self.handles.push(handle);
        self.contents.push(Some(unit));
    }

    /// True when position `index` already shows exactly `unit`
    pub fn is_current(&self, index: usize, unit: &DisplayUnit) -> bool {
        matches!(self.contents.get(index), Some(Some(live)) if live == unit)
    }

    /// Record what position `index` shows now
    pub fn set_content(&mut self, index: usize, content: Option<DisplayUnit>) {
        if let Some(slot) = self.contents.get_mut(index) {
            *slot = content;
        }
    }

    /// Drop every position at or beyond `len`, returning the dropped handles
    pub fn truncate(&mut self, len: usize) -> Vec<MessageHandle> {
        if len >= self.handles.len() {
            return Vec::new();
        }
        self.contents.truncate(len);
        self.handles.split_off(len)
    }
}
