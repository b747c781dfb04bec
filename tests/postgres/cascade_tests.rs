//! Foreign-key cascades and constraint mapping against `PostgreSQL`.

use super::helpers::services;
use postbox::ErrorKind;
use postbox::chat::services::{CreateConversationRequest, SendChatMessageRequest};
use postbox::messaging::services::SendMessageRequest;
use postbox::user::services::{RegisterUserRequest, UserServiceError};

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_a_conflict() {
    let Some(services) = services() else {
        return;
    };
    let (_, username) = services.register("alice").await;

    let err = services
        .users
        .register(RegisterUserRequest::new(
            username.as_str(),
            "other@example.com",
            "Other",
            "Person",
        ))
        .await
        .expect_err("duplicate username should fail");

    assert!(matches!(err, UserServiceError::DuplicateUsername(_)));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_cascades_through_foreign_keys() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "to bob"))
        .await
        .expect("send should succeed");
    services
        .messaging
        .send_message(SendMessageRequest::new(bob, alice, "to alice"))
        .await
        .expect("send should succeed");
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new("pg", [alice, bob]))
        .await
        .expect("conversation should be created");
    services
        .chat
        .send(SendChatMessageRequest::new(alice, conversation.id(), "bye"))
        .await
        .expect("chat send should succeed");

    let report = services
        .messaging
        .delete_user(alice, "delete")
        .await
        .expect("deletion should succeed");

    assert_eq!(report.sent_messages_removed, 1);
    assert_eq!(report.received_messages_removed, 1);
    let bob_messages = services
        .messaging
        .user_messages(bob)
        .await
        .expect("messages should load");
    assert!(bob_messages.sent.is_empty());
    assert!(bob_messages.received.is_empty());
    let bob_inbox = services
        .messaging
        .notifications(bob, false)
        .await
        .expect("notifications should load");
    assert!(bob_inbox.is_empty());
    let remaining = services
        .conversations
        .get(conversation.id())
        .await
        .expect("conversation survives");
    assert!(!remaining.is_participant(alice));
    let chat = services
        .chat
        .list(Some(conversation.id()))
        .await
        .expect("listing should succeed");
    assert!(chat.is_empty());
}
