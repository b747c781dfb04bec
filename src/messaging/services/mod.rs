//! Application services for direct messaging.

mod error;
mod service;
mod views;

pub use error::{MessagingError, MessagingResult};
pub use service::{INBOX_LIMIT, MessagingService, SendMessageRequest};
pub use views::{
    HistoryEntryView, Inbox, MessageDetail, MessageHistoryView, MessageThread, UserDataSummary,
    UserDeletionReport, UserMessages,
};
