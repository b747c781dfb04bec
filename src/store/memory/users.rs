//! User rows and the account-deletion cascade.

use super::MemoryTx;
use crate::chat::domain::ChatMessage;
use crate::messaging::domain::Message;
use crate::store::{StoreError, StoreResult};
use crate::user::domain::{User, UserId, Username};
use crate::user::ports::UserRecords;

impl UserRecords for MemoryTx<'_> {
    fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        if self.state.has_user(user.id()) {
            return Err(StoreError::Conflict(format!("user {} already exists", user.id())));
        }
        if self
            .state
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(StoreError::Conflict(format!(
                "username {} is already taken",
                user.username()
            )));
        }
        self.state.users.push(user.clone());
        Ok(())
    }

    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.state.users.iter().find(|user| user.id() == id).cloned())
    }

    fn find_user_by_username(&mut self, username: &Username) -> StoreResult<Option<User>> {
        Ok(self
            .state
            .users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    fn find_users(&mut self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        Ok(self
            .state
            .users
            .iter()
            .filter(|user| ids.contains(&user.id()))
            .cloned()
            .collect())
    }

    fn delete_user(&mut self, id: UserId) -> StoreResult<bool> {
        let state = &mut *self.state;
        let before = state.users.len();
        state.users.retain(|user| user.id() != id);
        if state.users.len() == before {
            return Ok(false);
        }

        let involved = state
            .messages
            .iter()
            .filter(|message| message.involves(id))
            .map(Message::id)
            .collect();
        let doomed_messages = state.with_replies(involved);
        state.remove_messages(&doomed_messages);
        for entry in &mut state.histories {
            if entry.edited_by() == Some(id) {
                entry.clear_editor();
            }
        }
        state.notifications.retain(|notification| notification.user_id() != id);

        for conversation in &mut state.conversations {
            conversation.forget_participant(id);
        }
        let doomed_chat: Vec<_> = state
            .chat_messages
            .iter()
            .filter(|message| message.sender() == id)
            .map(ChatMessage::id)
            .collect();
        state.chat_messages.retain(|message| message.sender() != id);
        state
            .read_statuses
            .retain(|(message_id, reader), _| *reader != id && !doomed_chat.contains(message_id));
        Ok(true)
    }
}
