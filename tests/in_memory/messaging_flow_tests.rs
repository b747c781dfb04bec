//! End-to-end direct messaging through the public services.

use super::helpers::{Services, services};
use postbox::ErrorKind;
use postbox::messaging::domain::NotificationType;
use postbox::messaging::services::SendMessageRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_between_two_users(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;

    let greeting = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "Hi Bob, lunch?"))
        .await
        .expect("send should succeed");
    services
        .messaging
        .send_message(SendMessageRequest::new(bob, alice, "Sure!"))
        .await
        .expect("reply should succeed");

    let bob_inbox = services
        .messaging
        .notifications(bob, true)
        .await
        .expect("notifications should load");
    assert_eq!(bob_inbox.len(), 1);
    let notice = bob_inbox.first().expect("one notification");
    assert_eq!(notice.notification_type(), NotificationType::Message);
    assert_eq!(notice.content(), "You have a new message from alice");
    assert_eq!(notice.message_id(), Some(greeting.id()));

    let bob_messages = services
        .messaging
        .user_messages(bob)
        .await
        .expect("messages should load");
    assert_eq!(bob_messages.sent.len(), 1);
    assert_eq!(bob_messages.received.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_build_a_history_readable_as_json(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;
    let message = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "Meet at 12"))
        .await
        .expect("send should succeed");

    services
        .messaging
        .edit_message(message.id(), alice, "Meet at 1")
        .await
        .expect("first edit should succeed");
    services
        .messaging
        .edit_message(message.id(), alice, "Meet at 1")
        .await
        .expect("no-op edit should succeed");
    services
        .messaging
        .edit_message(message.id(), alice, "Meet at 2")
        .await
        .expect("second edit should succeed");

    let view = services
        .messaging
        .history_view(message.id())
        .await
        .expect("history should load");
    let json = serde_json::to_value(&view).expect("view should serialise");

    assert_eq!(json["current_content"], "Meet at 2");
    assert_eq!(json["edited"], true);
    let history = json["history"].as_array().expect("history array");
    let contents: Vec<&str> = history
        .iter()
        .filter_map(|entry| entry["old_content"].as_str())
        .collect();
    assert_eq!(contents, vec!["Meet at 1", "Meet at 12"]);
    assert!(history.iter().all(|entry| entry["edited_by"] == "alice"));

    let summary = services
        .messaging
        .user_data_summary(alice)
        .await
        .expect("summary should load");
    assert_eq!(summary.message_edits_count, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn receivers_cannot_rewrite_messages(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;
    let message = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "original"))
        .await
        .expect("send should succeed");

    let err = services
        .messaging
        .edit_message(message.id(), bob, "forged")
        .await
        .expect_err("receiver edit should fail");

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(err.kind().http_status(), 403);
    let detail = services
        .messaging
        .message_detail(message.id())
        .await
        .expect("detail should load");
    assert_eq!(detail.message.content(), "original");
    assert!(detail.history.is_empty());
}
