//! Orchestration of direct messages, their history and notifications.

use super::error::{MessagingError, MessagingResult};
use super::views::{
    HistoryEntryView, Inbox, MessageDetail, MessageHistoryView, MessageThread, UserDataSummary,
    UserDeletionReport, UserMessages,
};
use crate::messaging::domain::{Message, MessageId, Notification, NotificationId};
use crate::messaging::hooks::HookRegistry;
use crate::store::{Store, StoreTx};
use crate::user::domain::{User, UserId};
use mockable::Clock;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Text a caller must supply to confirm account deletion.
const DELETE_CONFIRMATION: &str = "delete";

/// Most received messages an [`Inbox`] lists.
pub const INBOX_LIMIT: usize = 50;

/// Request payload for sending a direct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    sender: UserId,
    receiver: UserId,
    content: String,
}

impl SendMessageRequest {
    /// Creates a send request.
    #[must_use]
    pub fn new(sender: UserId, receiver: UserId, content: impl Into<String>) -> Self {
        Self {
            sender,
            receiver,
            content: content.into(),
        }
    }
}

/// Direct messaging service.
///
/// Every write goes through the [`HookRegistry`], so edit history and
/// notifications are produced in the same transaction as the message row.
#[derive(Clone)]
pub struct MessagingService<S, C>
where
    S: Store,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
    hooks: HookRegistry,
}

impl<S, C> MessagingService<S, C>
where
    S: Store,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a service with the default hooks.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_hooks(store, clock, HookRegistry::with_defaults())
    }

    /// Creates a service running `hooks` on every save.
    #[must_use]
    pub const fn with_hooks(store: Arc<S>, clock: Arc<C>, hooks: HookRegistry) -> Self {
        Self {
            store,
            clock,
            hooks,
        }
    }

    /// Returns the hooks run on every save.
    #[must_use]
    pub const fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Sends a new message; the receiver is notified in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Domain`] for blank content and
    /// [`MessagingError::UnknownUser`] when either party does not exist.
    pub async fn send_message(&self, request: SendMessageRequest) -> MessagingResult<Message> {
        let mut message = Message::compose(
            request.sender,
            request.receiver,
            request.content,
            &*self.clock,
        )?;
        let hooks = self.hooks.clone();
        let at = message.sent_at();
        let sent = self
            .store
            .transaction(move |tx| {
                for party in [message.sender(), message.receiver()] {
                    if tx.find_user(party)?.is_none() {
                        return Err(MessagingError::UnknownUser(party));
                    }
                }
                hooks.save(tx, &mut message, None, at)?;
                Ok(message)
            })
            .await?;
        tracing::debug!(message_id = %sent.id(), "sent message");
        Ok(sent)
    }

    /// Replies to a message. The reply goes to the other party of `parent_id`
    /// and notifies them like any new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the parent is
    /// missing, [`MessagingError::NotInThread`] when `sender` is not a party
    /// to it and [`MessagingError::Domain`] for blank content.
    pub async fn reply_to_message(
        &self,
        parent_id: MessageId,
        sender: UserId,
        content: impl Into<String>,
    ) -> MessagingResult<Message> {
        let content = content.into();
        let hooks = self.hooks.clone();
        let clock = Arc::clone(&self.clock);
        let reply = self
            .store
            .transaction(move |tx| {
                let parent = load_message(tx, parent_id)?;
                let mut reply = Message::reply_to(&parent, sender, content, &*clock)?.ok_or(
                    MessagingError::NotInThread {
                        message_id: parent_id,
                        user: sender,
                    },
                )?;
                let at = reply.sent_at();
                hooks.save(tx, &mut reply, None, at)?;
                Ok::<_, MessagingError>(reply)
            })
            .await?;
        tracing::debug!(message_id = %reply.id(), parent_id = %parent_id, "sent reply");
        Ok(reply)
    }

    /// Replaces the content of a message.
    ///
    /// A changed content is snapshotted into the history and flags the
    /// message as edited; unchanged content is saved without either.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing, [`MessagingError::NotSender`] when `editor` did not send it
    /// and [`MessagingError::Domain`] for blank content.
    pub async fn edit_message(
        &self,
        message_id: MessageId,
        editor: UserId,
        content: impl Into<String>,
    ) -> MessagingResult<Message> {
        let revised = content.into();
        let hooks = self.hooks.clone();
        let at = self.clock.utc();
        let edited = self
            .store
            .transaction(move |tx| {
                let mut message = tx
                    .find_message(message_id)?
                    .ok_or(MessagingError::MessageNotFound(message_id))?;
                if message.sender() != editor {
                    return Err(MessagingError::NotSender {
                        message_id,
                        user: editor,
                    });
                }
                message.revise(revised)?;
                hooks.save(tx, &mut message, Some(editor), at)?;
                Ok(message)
            })
            .await?;
        tracing::debug!(
            message_id = %edited.id(),
            edited = edited.is_edited(),
            "saved message edit"
        );
        Ok(edited)
    }

    /// Deletes a message together with its history and notifications.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing and [`MessagingError::NotSender`] when `actor` did not send
    /// it.
    pub async fn delete_message(
        &self,
        message_id: MessageId,
        actor: UserId,
    ) -> MessagingResult<()> {
        self.store
            .transaction(move |tx| {
                let message = tx
                    .find_message(message_id)?
                    .ok_or(MessagingError::MessageNotFound(message_id))?;
                if message.sender() != actor {
                    return Err(MessagingError::NotSender {
                        message_id,
                        user: actor,
                    });
                }
                tx.delete_message(message_id)?;
                Ok(())
            })
            .await?;
        tracing::info!(message_id = %message_id, "deleted message");
        Ok(())
    }

    /// Returns a message with its history, direct replies and the
    /// notifications it raised.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing.
    pub async fn message_detail(&self, message_id: MessageId) -> MessagingResult<MessageDetail> {
        self.store
            .transaction(move |tx| {
                let message = load_message(tx, message_id)?;
                Ok(MessageDetail {
                    message,
                    history: tx.history_for(message_id)?,
                    replies: tx.replies_to(message_id)?,
                    notifications: tx.notifications_for_message(message_id)?,
                })
            })
            .await
    }

    /// Returns the whole reply thread `message_id` belongs to, starting from
    /// its root.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing.
    pub async fn thread(&self, message_id: MessageId) -> MessagingResult<MessageThread> {
        self.store
            .transaction(move |tx| {
                let mut root = load_message(tx, message_id)?;
                while let Some(parent_id) = root.parent() {
                    let Some(parent) = tx.find_message(parent_id)? else {
                        break;
                    };
                    root = parent;
                }

                let mut messages = vec![root.clone()];
                let mut frontier = vec![root.id()];
                while let Some(id) = frontier.pop() {
                    let replies = tx.replies_to(id)?;
                    frontier.extend(replies.iter().map(Message::id));
                    messages.extend(replies);
                }
                messages.sort_by_key(|message| (message.sent_at(), message.id()));
                let participants: BTreeSet<UserId> = messages
                    .iter()
                    .flat_map(|message| [message.sender(), message.receiver()])
                    .collect();
                Ok(MessageThread {
                    root,
                    messages,
                    participants: participants.into_iter().collect(),
                })
            })
            .await
    }

    /// Lists the thread roots `user` sent or received, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UserNotFound`] when the user is missing.
    pub async fn user_threads(&self, user: UserId) -> MessagingResult<Vec<Message>> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                let mut roots: BTreeMap<MessageId, Message> = BTreeMap::new();
                for message in tx
                    .messages_sent_by(user)?
                    .into_iter()
                    .chain(tx.messages_received_by(user)?)
                {
                    if message.parent().is_none() {
                        roots.insert(message.id(), message);
                    }
                }
                let mut threads: Vec<Message> = roots.into_values().collect();
                threads.sort_by_key(|message| Reverse((message.sent_at(), message.id())));
                Ok(threads)
            })
            .await
    }

    /// Returns the most recent messages `user` received with their unread
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UserNotFound`] when the user is missing.
    pub async fn inbox(&self, user: UserId) -> MessagingResult<Inbox> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                let mut messages = tx.messages_received_by(user)?;
                let unread_count = messages.iter().filter(|message| !message.is_read()).count();
                messages.truncate(INBOX_LIMIT);
                Ok(Inbox {
                    messages,
                    unread_count,
                })
            })
            .await
    }

    /// Marks a received message as read. Already-read messages are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing and [`MessagingError::NotReceiver`] when it was sent to
    /// someone else.
    pub async fn mark_message_read(
        &self,
        message_id: MessageId,
        user: UserId,
    ) -> MessagingResult<Message> {
        let hooks = self.hooks.clone();
        let at = self.clock.utc();
        self.store
            .transaction(move |tx| {
                let mut message = load_message(tx, message_id)?;
                if message.receiver() != user {
                    return Err(MessagingError::NotReceiver { message_id, user });
                }
                if message.mark_read() {
                    hooks.save(tx, &mut message, None, at)?;
                }
                Ok(message)
            })
            .await
    }

    /// Returns the edit history of a message in a serialisable shape.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::MessageNotFound`] when the message is
    /// missing.
    pub async fn history_view(&self, message_id: MessageId) -> MessagingResult<MessageHistoryView> {
        self.store
            .transaction(move |tx| {
                let message = load_message(tx, message_id)?;
                let history = tx.history_for(message_id)?;
                let editor_ids: Vec<UserId> =
                    history.iter().filter_map(|entry| entry.edited_by()).collect();
                let editors: BTreeMap<UserId, String> = tx
                    .find_users(&editor_ids)?
                    .into_iter()
                    .map(|user| (user.id(), user.username().as_str().to_owned()))
                    .collect();
                let entries = history
                    .into_iter()
                    .map(|entry| HistoryEntryView {
                        history_id: entry.id(),
                        edited_by: entry
                            .edited_by()
                            .and_then(|editor| editors.get(&editor).cloned()),
                        edited_at: entry.edited_at(),
                        old_content: entry.old_content().to_owned(),
                    })
                    .collect();
                Ok(MessageHistoryView {
                    message_id,
                    current_content: message.content().to_owned(),
                    edited: message.is_edited(),
                    last_edited_at: message.last_edited_at(),
                    history: entries,
                })
            })
            .await
    }

    /// Lists messages `user` sent and received, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UserNotFound`] when the user is missing.
    pub async fn user_messages(&self, user: UserId) -> MessagingResult<UserMessages> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                Ok(UserMessages {
                    sent: tx.messages_sent_by(user)?,
                    received: tx.messages_received_by(user)?,
                })
            })
            .await
    }

    /// Lists notifications addressed to `user`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UserNotFound`] when the user is missing.
    pub async fn notifications(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> MessagingResult<Vec<Notification>> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                Ok(tx.notifications_for(user, unread_only)?)
            })
            .await
    }

    /// Sends a system notification not tied to any message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Domain`] for blank content and
    /// [`MessagingError::UnknownUser`] when the recipient does not exist.
    pub async fn notify_system(
        &self,
        recipient: UserId,
        content: impl Into<String>,
    ) -> MessagingResult<Notification> {
        let notification = Notification::system(recipient, content, self.clock.utc())?;
        self.store
            .transaction(move |tx| {
                if tx.find_user(recipient)?.is_none() {
                    return Err(MessagingError::UnknownUser(recipient));
                }
                tx.insert_notification(&notification)?;
                Ok(notification)
            })
            .await
    }

    /// Marks a notification as read. Already-read notifications are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotificationNotFound`] when the
    /// notification is missing and [`MessagingError::NotRecipient`] when it
    /// is addressed to someone else.
    pub async fn mark_notification_read(
        &self,
        notification_id: NotificationId,
        user: UserId,
    ) -> MessagingResult<Notification> {
        self.store
            .transaction(move |tx| {
                let mut notification = tx
                    .find_notification(notification_id)?
                    .ok_or(MessagingError::NotificationNotFound(notification_id))?;
                if notification.user_id() != user {
                    return Err(MessagingError::NotRecipient {
                        notification_id,
                        user,
                    });
                }
                if notification.mark_as_read() {
                    tx.update_notification(&notification)?;
                }
                Ok(notification)
            })
            .await
    }

    /// Summarises what an account holds.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UserNotFound`] when the user is missing.
    pub async fn user_data_summary(&self, user: UserId) -> MessagingResult<UserDataSummary> {
        self.store
            .transaction(move |tx| {
                let account = load_user(tx, user)?;
                let sent = tx.messages_sent_by(user)?.len();
                let received = tx.messages_received_by(user)?.len();
                let notifications = tx.notifications_for(user, false)?;
                let unread = notifications.iter().filter(|item| !item.is_read()).count();
                Ok(UserDataSummary {
                    username: account.username().as_str().to_owned(),
                    email: account.email().as_str().to_owned(),
                    sent_messages_count: sent,
                    received_messages_count: received,
                    total_messages: sent + received,
                    notifications_count: notifications.len(),
                    unread_notifications_count: unread,
                    message_edits_count: tx.count_edits_by(user)?,
                    account_created: account.created_at(),
                })
            })
            .await
    }

    /// Deletes an account and everything that cascades from it.
    ///
    /// `confirmation` must equal `delete`, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::ConfirmationRequired`] for a missing or
    /// wrong confirmation and [`MessagingError::UserNotFound`] when the user
    /// is missing.
    pub async fn delete_user(
        &self,
        user: UserId,
        confirmation: &str,
    ) -> MessagingResult<UserDeletionReport> {
        if !confirmation.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
            return Err(MessagingError::ConfirmationRequired);
        }
        let report = self
            .store
            .transaction(move |tx| {
                let account = load_user(tx, user)?;
                let report = UserDeletionReport {
                    username: account.username().as_str().to_owned(),
                    sent_messages_removed: tx.messages_sent_by(user)?.len(),
                    received_messages_removed: tx.messages_received_by(user)?.len(),
                    notifications_removed: tx.notifications_for(user, false)?.len(),
                };
                tx.delete_user(user)?;
                Ok::<_, MessagingError>(report)
            })
            .await?;
        tracing::info!(
            user_id = %user,
            username = %report.username,
            sent = report.sent_messages_removed,
            received = report.received_messages_removed,
            notifications = report.notifications_removed,
            "deleted user account"
        );
        Ok(report)
    }
}

fn load_message(tx: &mut dyn StoreTx, message_id: MessageId) -> MessagingResult<Message> {
    tx.find_message(message_id)?
        .ok_or(MessagingError::MessageNotFound(message_id))
}

fn load_user(tx: &mut dyn StoreTx, user: UserId) -> MessagingResult<User> {
    tx.find_user(user)?.ok_or(MessagingError::UserNotFound(user))
}
