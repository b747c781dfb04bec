//! Domain types for direct messaging.
//!
//! Pure value and aggregate types with no infrastructure dependencies.

mod error;
mod history;
mod ids;
mod message;
mod notification;

pub use error::{MessageDomainError, ParseNotificationTypeError};
pub use history::MessageHistory;
pub use ids::{HistoryId, MessageId, NotificationId};
pub use message::{Message, PersistedMessageData};
pub use notification::{Notification, NotificationType, PersistedNotificationData};
