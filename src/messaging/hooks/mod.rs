//! Save hooks for direct messages.
//!
//! [`HookRegistry::save`] is the only path that writes a [`Message`]. It
//! loads the stored row, runs every hook's `before_save` against the
//! incoming message, inserts or updates the row and then runs every
//! `after_save`. All of it happens on the caller's [`StoreTx`], so an error
//! from any hook rolls back the save together with whatever earlier hooks
//! wrote.

mod creation_log;
mod edit_history;
mod notifier;

pub use creation_log::CreationLogHook;
pub use edit_history::EditHistoryHook;
pub use notifier::NotificationHook;

use crate::messaging::domain::Message;
use crate::store::{StoreResult, StoreTx};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Whether a save created the row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// No row with the message identifier existed before the save.
    Created,
    /// A row existed and was overwritten.
    Updated,
}

/// State visible to hooks before the row is written.
#[derive(Debug)]
pub struct BeforeSave<'a> {
    /// The message about to be written; hooks may adjust it.
    pub message: &'a mut Message,
    /// The row currently stored under the same identifier, if any.
    pub stored: Option<&'a Message>,
    /// Who is performing the save, when known.
    pub editor: Option<UserId>,
    /// Timestamp of the save.
    pub at: DateTime<Utc>,
}

impl BeforeSave<'_> {
    /// Returns what the save is going to do.
    #[must_use]
    pub const fn kind(&self) -> SaveKind {
        if self.stored.is_some() {
            SaveKind::Updated
        } else {
            SaveKind::Created
        }
    }
}

/// State visible to hooks after the row is written.
#[derive(Debug, Clone, Copy)]
pub struct AfterSave<'a> {
    /// The message as written.
    pub message: &'a Message,
    /// What the save did.
    pub kind: SaveKind,
    /// Timestamp of the save.
    pub at: DateTime<Utc>,
}

/// A handler invoked around every message save.
///
/// Both callbacks default to doing nothing.
pub trait MessageHook: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs before the row is written.
    ///
    /// # Errors
    ///
    /// Any error aborts the save and rolls back the transaction.
    fn before_save(&self, event: &mut BeforeSave<'_>, tx: &mut dyn StoreTx) -> StoreResult<()> {
        let _ = (event, tx);
        Ok(())
    }

    /// Runs after the row is written, still inside the transaction.
    ///
    /// # Errors
    ///
    /// Any error aborts the save and rolls back the transaction.
    fn after_save(&self, event: &AfterSave<'_>, tx: &mut dyn StoreTx) -> StoreResult<()> {
        let _ = (event, tx);
        Ok(())
    }
}

/// Ordered list of message hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn MessageHook>>,
}

impl HookRegistry {
    /// Creates a registry without hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard registry: edit history, notification, creation
    /// log.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .register(EditHistoryHook)
            .register(NotificationHook)
            .register(CreationLogHook)
    }

    /// Appends `hook` after the hooks already registered.
    #[must_use]
    pub fn register(mut self, hook: impl MessageHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Returns hook names in invocation order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    /// Writes `message` through every registered hook.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a hook or by the store.
    pub fn save(
        &self,
        tx: &mut dyn StoreTx,
        message: &mut Message,
        editor: Option<UserId>,
        at: DateTime<Utc>,
    ) -> StoreResult<SaveKind> {
        let stored = tx.find_message(message.id())?;
        let kind = {
            let mut event = BeforeSave {
                message: &mut *message,
                stored: stored.as_ref(),
                editor,
                at,
            };
            for hook in &self.hooks {
                hook.before_save(&mut event, tx)?;
            }
            event.kind()
        };

        match kind {
            SaveKind::Created => tx.insert_message(message)?,
            SaveKind::Updated => tx.update_message(message)?,
        }

        let event = AfterSave {
            message: &*message,
            kind,
            at,
        };
        for hook in &self.hooks {
            hook.after_save(&event, tx)?;
        }
        Ok(kind)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}
