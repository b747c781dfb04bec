//! Conversations and read tracking against `PostgreSQL`.

use super::helpers::services;
use mockable::DefaultClock;
use postbox::chat::domain::{ChatMessage, ChatMessageType};
use postbox::chat::services::{CreateConversationRequest, SendChatMessageRequest};
use postbox::store::{Store, StoreError};

/// More unread messages than one `INSERT` could carry at three binds a row.
const OVERSIZED_BACKLOG: usize = 22_000;

#[tokio::test(flavor = "multi_thread")]
async fn read_markers_are_written_once_per_reader() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new("pg", [alice, bob]))
        .await
        .expect("conversation should be created");
    for (sender, body) in [(alice, "ping"), (alice, "ping again"), (bob, "pong")] {
        services
            .chat
            .send(SendChatMessageRequest::new(sender, conversation.id(), body))
            .await
            .expect("send should succeed");
    }

    let first = services
        .conversations
        .mark_read(conversation.id(), bob)
        .await
        .expect("mark read should succeed");
    let second = services
        .conversations
        .mark_read(conversation.id(), bob)
        .await
        .expect("mark read should succeed");

    assert_eq!((first, second), (2, 0));
    let unread_for_alice = services
        .conversations
        .unread_count(conversation.id(), alice)
        .await
        .expect("count should succeed");
    assert_eq!(unread_for_alice, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn participants_round_trip_through_join_table() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let (carol, _) = services.register("carol").await;
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new("pg", [alice, bob]))
        .await
        .expect("conversation should be created");

    services
        .conversations
        .add_participant(conversation.id(), carol)
        .await
        .expect("add should succeed");
    services
        .conversations
        .remove_participant(conversation.id(), alice)
        .await
        .expect("remove should succeed");

    let stored = services
        .conversations
        .get(conversation.id())
        .await
        .expect("conversation should load");
    assert!(!stored.is_participant(alice));
    assert!(stored.is_participant(bob));
    assert!(stored.is_participant(carol));
}

#[tokio::test(flavor = "multi_thread")]
async fn marking_a_large_backlog_read_is_batched() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new("backlog", [alice, bob]))
        .await
        .expect("conversation should be created");
    let conversation_id = conversation.id();
    services
        .store
        .transaction(move |tx| {
            for index in 0..OVERSIZED_BACKLOG {
                let message = ChatMessage::post(
                    conversation_id,
                    alice,
                    format!("backlog {index}"),
                    ChatMessageType::Text,
                    &DefaultClock,
                )
                .expect("valid chat message");
                tx.insert_chat_message(&message)?;
            }
            Ok::<_, StoreError>(())
        })
        .await
        .expect("backlog should be stored");

    let marked = services
        .conversations
        .mark_read(conversation_id, bob)
        .await
        .expect("mark read should succeed");

    assert_eq!(marked, OVERSIZED_BACKLOG);
    let unread = services
        .conversations
        .unread_count(conversation_id, bob)
        .await
        .expect("count should succeed");
    assert_eq!(unread, 0);
}
