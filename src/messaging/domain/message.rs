//! The direct message aggregate.

use super::{MessageDomainError, MessageId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A message sent from one user to another.
///
/// # Invariants
///
/// - `sender`, `receiver` and `parent` never change after creation
/// - `content` is never blank
/// - `edited` is `true` exactly when `last_edited_at` is set
/// - `read` only ever goes from `false` to `true`
///
/// # Examples
///
/// ```
/// use postbox::messaging::domain::Message;
/// use postbox::user::domain::UserId;
/// use mockable::DefaultClock;
///
/// let message = Message::compose(UserId::new(), UserId::new(), "Hello!", &DefaultClock)
///     .expect("valid message");
/// assert!(!message.is_edited());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: UserId,
    receiver: UserId,
    content: String,
    sent_at: DateTime<Utc>,
    edited: bool,
    last_edited_at: Option<DateTime<Utc>>,
    parent: Option<MessageId>,
    read: bool,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender.
    pub sender: UserId,
    /// Persisted receiver.
    pub receiver: UserId,
    /// Persisted content.
    pub content: String,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Persisted edited flag.
    pub edited: bool,
    /// Persisted timestamp of the latest edit.
    pub last_edited_at: Option<DateTime<Utc>>,
    /// Persisted parent message, for replies.
    pub parent: Option<MessageId>,
    /// Persisted read flag.
    pub read: bool,
}

impl Message {
    /// Composes a new, not yet persisted message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyContent`] when `content` is blank.
    pub fn compose(
        sender: UserId,
        receiver: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MessageDomainError> {
        Ok(Self {
            id: MessageId::new(),
            sender,
            receiver,
            content: non_blank(content.into())?,
            sent_at: clock.utc(),
            edited: false,
            last_edited_at: None,
            parent: None,
            read: false,
        })
    }

    /// Composes a reply to `parent` from `sender`, addressed to the other
    /// party of `parent`.
    ///
    /// Returns `Ok(None)` when `sender` neither sent nor received `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyContent`] when `content` is blank.
    pub fn reply_to(
        parent: &Self,
        sender: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Option<Self>, MessageDomainError> {
        let Some(receiver) = parent.counterpart(sender) else {
            return Ok(None);
        };
        let mut reply = Self::compose(sender, receiver, content, clock)?;
        reply.parent = Some(parent.id);
        Ok(Some(reply))
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender: data.sender,
            receiver: data.receiver,
            content: data.content,
            sent_at: data.sent_at,
            edited: data.edited,
            last_edited_at: data.last_edited_at,
            parent: data.parent,
            read: data.read,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sending user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the receiving user.
    #[must_use]
    pub const fn receiver(&self) -> UserId {
        self.receiver
    }

    /// Returns the current content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was sent.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns `true` once the content has been changed after sending.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited
    }

    /// Returns when the content was last changed, if ever.
    #[must_use]
    pub const fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edited_at
    }

    /// Returns the message this one replies to, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<MessageId> {
        self.parent
    }

    /// Returns `true` once the receiver has read the message.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns `true` if `user` sent or received this message.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.sender == user || self.receiver == user
    }

    /// Returns the party `user` is talking to in this message, or `None`
    /// when `user` is not involved.
    #[must_use]
    pub fn counterpart(&self, user: UserId) -> Option<UserId> {
        if user == self.sender {
            Some(self.receiver)
        } else if user == self.receiver {
            Some(self.sender)
        } else {
            None
        }
    }

    /// Marks the message read. Returns `false` if it already was.
    pub const fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }

    /// Replaces the content.
    ///
    /// The edited flag is left alone; the save pipeline decides whether the
    /// stored content actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyContent`] when `content` is blank.
    pub fn revise(&mut self, content: impl Into<String>) -> Result<(), MessageDomainError> {
        self.content = non_blank(content.into())?;
        Ok(())
    }

    /// Flags the message as edited at `at`.
    pub const fn mark_edited(&mut self, at: DateTime<Utc>) {
        self.edited = true;
        self.last_edited_at = Some(at);
    }
}

fn non_blank(content: String) -> Result<String, MessageDomainError> {
    if content.trim().is_empty() {
        return Err(MessageDomainError::EmptyContent);
    }
    Ok(content)
}
