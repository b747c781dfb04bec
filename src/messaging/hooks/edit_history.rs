//! Snapshots prior content whenever a save changes it.

use super::{BeforeSave, MessageHook};
use crate::messaging::domain::MessageHistory;
use crate::store::{StoreResult, StoreTx};

/// Records a [`MessageHistory`] entry and flags the message as edited when
/// an update changes its content.
///
/// New messages and saves that leave the content untouched are ignored. A
/// save whose stored row has vanished is treated as a creation by the
/// registry, so no comparison happens for it either.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditHistoryHook;

impl MessageHook for EditHistoryHook {
    fn name(&self) -> &'static str {
        "edit_history"
    }

    fn before_save(&self, event: &mut BeforeSave<'_>, tx: &mut dyn StoreTx) -> StoreResult<()> {
        let Some(stored) = event.stored else {
            return Ok(());
        };
        if stored.content() == event.message.content() {
            return Ok(());
        }
        tx.insert_history(&MessageHistory::snapshot(
            stored.id(),
            stored.content(),
            event.editor,
            event.at,
        ))?;
        event.message.mark_edited(event.at);
        tracing::debug!(message_id = %stored.id(), "captured message edit");
        Ok(())
    }
}
