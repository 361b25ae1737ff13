//! Reconciliation of the published messages against a fresh board
//!
//! Creates missing messages, edits the ones whose content changed and
//! deletes the surplus, in that order. Only a failed create stops a pass;
//! edit and delete failures are logged and left for the next cycle.

use shared::{component_debug, component_info, component_warn, Component};

use super::partition::DisplayUnit;
use super::state::PublishedState;
use crate::traits::{ChannelSink, HandleStore};

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub update_failures: usize,
    pub deleted: usize,
    pub delete_failures: usize,
    /// Handle list was written to the store during this pass
    pub persisted: bool,
    /// A create failed and the remaining steps were skipped
    pub aborted: bool,
}

impl ReconcileReport {
    /// Number of channel calls issued
    pub fn channel_calls(&self) -> usize {
        self.created
            + self.updated
            + self.update_failures
            + self.deleted
            + self.delete_failures
            + usize::from(self.aborted)
    }
}

/// Bring the channel in line with `units`, updating `state` as it goes
pub async fn reconcile<C, H>(
    state: &mut PublishedState,
    units: &[DisplayUnit],
    channel: &C,
    store: &H,
) -> ReconcileReport
where
    C: ChannelSink + ?Sized,
    H: HandleStore + ?Sized,
{
    let mut report = ReconcileReport::default();
    let previous_len = state.len();

    // 1. Create messages for positions the channel does not have yet
    for (index, unit) in units.iter().enumerate().skip(previous_len) {
        match channel.create_message(unit).await {
            Ok(handle) => {
                component_info!(
                    Component::Reconciler,
                    "📝 Posted board message {} ({})",
                    index + 1,
                    handle
                );
                state.push(handle, unit.clone());
                report.created += 1;
            }
            Err(e) => {
                component_warn!(
                    Component::Reconciler,
                    "⚠️ Failed to post board message {}: {}. Aborting cycle.",
                    index + 1,
                    e
                );
                report.aborted = true;
                break;
            }
        }
    }

    if !report.aborted {
        // 2. Edit existing positions whose content changed
        let shared_len = previous_len.min(units.len());
        for (index, unit) in units.iter().enumerate().take(shared_len) {
            if state.is_current(index, unit) {
                report.unchanged += 1;
                continue;
            }
            let handle = state.handles()[index].clone();
            match channel.edit_message(&handle, unit).await {
                Ok(()) => {
                    component_debug!(
                        Component::Reconciler,
                        "✏️ Updated board message {} ({})",
                        index + 1,
                        handle
                    );
                    state.set_content(index, Some(unit.clone()));
                    report.updated += 1;
                }
                Err(e) => {
                    component_warn!(
                        Component::Reconciler,
                        "⚠️ Could not edit message {}: {}",
                        handle,
                        e
                    );
                    state.set_content(index, None);
                    report.update_failures += 1;
                }
            }
        }

        // 3. Delete the surplus; it is untracked afterwards whatever the outcome
        for handle in state.truncate(units.len()) {
            match channel.delete_message(&handle).await {
                Ok(()) => {
                    component_info!(
                        Component::Reconciler,
                        "🗑️ Deleted extra board message {}",
                        handle
                    );
                    report.deleted += 1;
                }
                Err(e) => {
                    component_warn!(
                        Component::Reconciler,
                        "⚠️ Could not delete message {}: {}",
                        handle,
                        e
                    );
                    report.delete_failures += 1;
                }
            }
        }
    }

    // 4. Persist when the handle list changed shape
    if state.len() != previous_len {
        match store.save_handles(state.handles()).await {
            Ok(()) => report.persisted = true,
            Err(e) => {
                component_warn!(Component::Store, "⚠️ Could not save message handles: {}", e);
            }
        }
    }

    component_debug!(
        Component::Reconciler,
        "Reconciled {} units: {} created, {} updated, {} unchanged, {} deleted",
        units.len(),
        report.created,
        report.updated,
        report.unchanged,
        report.deleted
    );

    report
}
