//! Account deletion cascades across both pipelines.

use super::helpers::{Services, services};
use postbox::chat::services::{CreateConversationRequest, SendChatMessageRequest};
use postbox::messaging::services::{MessagingError, SendMessageRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_account_removes_everything_it_owned(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;
    let carol = services.register("carol", "Carol", "Singer").await;
    services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "hello"))
        .await
        .expect("send should succeed");
    services
        .messaging
        .send_message(SendMessageRequest::new(carol, alice, "hey alice"))
        .await
        .expect("send should succeed");
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new("trio", [alice, bob, carol]))
        .await
        .expect("conversation should be created");
    services
        .chat
        .send(SendChatMessageRequest::new(alice, conversation.id(), "bye all"))
        .await
        .expect("chat send should succeed");
    let kept = services
        .chat
        .send(SendChatMessageRequest::new(bob, conversation.id(), "see you"))
        .await
        .expect("chat send should succeed");

    let refused = services.messaging.delete_user(alice, "nope").await;
    assert!(matches!(refused, Err(MessagingError::ConfirmationRequired)));

    let report = services
        .messaging
        .delete_user(alice, "Delete")
        .await
        .expect("deletion should succeed");
    assert_eq!(report.sent_messages_removed, 1);
    assert_eq!(report.received_messages_removed, 1);
    assert_eq!(report.notifications_removed, 1);

    let bob_inbox = services
        .messaging
        .notifications(bob, false)
        .await
        .expect("notifications should load");
    assert!(bob_inbox.is_empty());
    let carol_messages = services
        .messaging
        .user_messages(carol)
        .await
        .expect("messages should load");
    assert!(carol_messages.sent.is_empty());

    let remaining = services
        .conversations
        .get(conversation.id())
        .await
        .expect("conversation survives");
    assert!(!remaining.is_participant(alice));
    assert_eq!(remaining.participants().len(), 2);
    let chat = services
        .chat
        .list(Some(conversation.id()))
        .await
        .expect("listing should succeed");
    assert_eq!(chat, vec![kept]);
}
