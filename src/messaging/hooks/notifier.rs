//! Notifies receivers of new messages.

use super::{AfterSave, MessageHook, SaveKind};
use crate::messaging::domain::Notification;
use crate::store::{StoreError, StoreResult, StoreTx};

/// Creates one notification for the receiver of every newly created message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationHook;

impl MessageHook for NotificationHook {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn after_save(&self, event: &AfterSave<'_>, tx: &mut dyn StoreTx) -> StoreResult<()> {
        if event.kind != SaveKind::Created {
            return Ok(());
        }
        let sender_id = event.message.sender();
        let sender = tx
            .find_user(sender_id)?
            .ok_or_else(|| StoreError::not_found("user", sender_id))?;
        let notification = Notification::new_message(
            event.message.receiver(),
            event.message.id(),
            sender.username(),
            event.at,
        );
        tx.insert_notification(&notification)?;
        tracing::debug!(
            notification_id = %notification.id(),
            recipient = %notification.user_id(),
            "created message notification"
        );
        Ok(())
    }
}
