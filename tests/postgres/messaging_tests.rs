//! Hook behaviour against `PostgreSQL`.

use super::helpers::services;
use mockable::{Clock, DefaultClock};
use postbox::messaging::domain::{Message, MessageId, PersistedMessageData};
use postbox::messaging::services::SendMessageRequest;
use postbox::store::Store;
use uuid::Uuid;

#[tokio::test(flavor = "multi_thread")]
async fn sending_persists_message_and_notification() {
    let Some(services) = services() else {
        return;
    };
    let (alice, alice_name) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;

    let message = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "Hello from Postgres"))
        .await
        .expect("send should succeed");

    let inbox = services
        .messaging
        .notifications(bob, true)
        .await
        .expect("notifications should load");
    assert_eq!(inbox.len(), 1);
    let notice = inbox.first().expect("one notification");
    assert_eq!(
        notice.content(),
        format!("You have a new message from {alice_name}")
    );
    assert_eq!(notice.message_id(), Some(message.id()));
}

#[tokio::test(flavor = "multi_thread")]
async fn edits_are_snapshotted_newest_first() {
    let Some(services) = services() else {
        return;
    };
    let (alice, alice_name) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let message = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "one"))
        .await
        .expect("send should succeed");

    for content in ["two", "two", "three"] {
        services
            .messaging
            .edit_message(message.id(), alice, content)
            .await
            .expect("edit should succeed");
    }

    let view = services
        .messaging
        .history_view(message.id())
        .await
        .expect("history should load");
    assert_eq!(view.current_content, "three");
    assert!(view.edited);
    assert!(view.last_edited_at.is_some());
    let snapshots: Vec<&str> = view
        .history
        .iter()
        .map(|entry| entry.old_content.as_str())
        .collect();
    assert_eq!(snapshots, vec!["two", "one"]);
    assert!(
        view.history
            .iter()
            .all(|entry| entry.edited_by.as_deref() == Some(alice_name.as_str()))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn replies_and_read_flags_are_persisted() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let root = services
        .messaging
        .send_message(SendMessageRequest::new(alice, bob, "root"))
        .await
        .expect("send should succeed");
    let answer = services
        .messaging
        .reply_to_message(root.id(), bob, "answer")
        .await
        .expect("reply should succeed");
    services
        .messaging
        .mark_message_read(root.id(), bob)
        .await
        .expect("receiver may mark read");

    let thread = services
        .messaging
        .thread(answer.id())
        .await
        .expect("thread should load");
    let ids: Vec<MessageId> = thread.messages.iter().map(Message::id).collect();
    assert_eq!(ids, vec![root.id(), answer.id()]);
    assert!(thread.root.is_read());
    let inbox = services.messaging.inbox(bob).await.expect("inbox should load");
    assert_eq!(inbox.unread_count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn equal_timestamps_list_by_descending_id() {
    let Some(services) = services() else {
        return;
    };
    let (alice, _) = services.register("alice").await;
    let (bob, _) = services.register("bob").await;
    let sent_at = DefaultClock.utc();
    let at_same_instant = |id: u128| {
        Message::from_persisted(PersistedMessageData {
            id: MessageId::from_uuid(Uuid::from_u128(id)),
            sender: alice,
            receiver: bob,
            content: format!("message {id}"),
            sent_at,
            edited: false,
            last_edited_at: None,
            parent: None,
            read: false,
        })
    };
    let (high, low) = (at_same_instant(2), at_same_instant(1));
    let expected = vec![high.id(), low.id()];

    let listed = services
        .store
        .transaction(move |tx| {
            tx.insert_message(&high)?;
            tx.insert_message(&low)?;
            tx.messages_sent_by(alice)
        })
        .await
        .expect("listing should succeed");

    let ids: Vec<MessageId> = listed.iter().map(Message::id).collect();
    assert_eq!(ids, expected);
}
