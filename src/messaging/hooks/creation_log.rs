//! Structured log line for every new message.

use super::{AfterSave, MessageHook, SaveKind};
use crate::store::{StoreResult, StoreTx};

/// Emits a `tracing` event when a message is created. Writes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreationLogHook;

impl MessageHook for CreationLogHook {
    fn name(&self) -> &'static str {
        "creation_log"
    }

    fn after_save(&self, event: &AfterSave<'_>, _tx: &mut dyn StoreTx) -> StoreResult<()> {
        if event.kind == SaveKind::Created {
            tracing::info!(
                message_id = %event.message.id(),
                sender = %event.message.sender(),
                receiver = %event.message.receiver(),
                "new message created"
            );
        }
        Ok(())
    }
}
