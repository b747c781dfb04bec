//! End-to-end conversations and read tracking through the public services.

use super::helpers::{Services, services};
use postbox::chat::domain::ChatMessageType;
use postbox::chat::services::{CreateConversationRequest, SendChatMessageRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_chat_read_tracking(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;
    let carol = services.register("carol", "Carol", "Singer").await;
    let conversation = services
        .conversations
        .create(CreateConversationRequest::new(
            "Weekend plans",
            [alice, bob, carol, bob],
        ))
        .await
        .expect("conversation should be created");
    assert_eq!(conversation.participants().len(), 3);

    for (sender, body) in [(alice, "Hiking?"), (bob, "Yes!"), (carol, "Count me in")] {
        services
            .chat
            .send(SendChatMessageRequest::new(sender, conversation.id(), body))
            .await
            .expect("send should succeed");
    }
    services
        .chat
        .send(
            SendChatMessageRequest::new(alice, conversation.id(), "map.pdf")
                .with_type(ChatMessageType::File),
        )
        .await
        .expect("file message should succeed");

    let before = services
        .conversations
        .summary(conversation.id(), Some(carol))
        .await
        .expect("summary should load");
    assert_eq!(before.message_count, 4);
    assert_eq!(before.unread_count, 3);
    let last = before.last_message.expect("last message present");
    assert_eq!(last.preview, "map.pdf");
    assert_eq!(last.sender_name, "Alice Liddell");
    assert_eq!(last.message_type, ChatMessageType::File);

    let written = services
        .conversations
        .mark_read(conversation.id(), carol)
        .await
        .expect("mark read should succeed");
    assert_eq!(written, 3);
    let rewritten = services
        .conversations
        .mark_read(conversation.id(), carol)
        .await
        .expect("repeat mark read should succeed");
    assert_eq!(rewritten, 0);

    let carol_unread = services
        .chat
        .unread_for(carol)
        .await
        .expect("unread should load");
    assert_eq!(carol_unread.count, 0);
    let bob_unread = services
        .chat
        .unread_for(bob)
        .await
        .expect("unread should load");
    assert_eq!(bob_unread.count, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversations_are_listed_per_participant(services: Services) {
    let alice = services.register("alice", "Alice", "Liddell").await;
    let bob = services.register("bob", "Bob", "Builder").await;
    let carol = services.register("carol", "Carol", "Singer").await;
    let shared = services
        .conversations
        .create(CreateConversationRequest::new("shared", [alice, bob]))
        .await
        .expect("conversation should be created");
    services
        .conversations
        .create(CreateConversationRequest::new("private", [carol]))
        .await
        .expect("conversation should be created");

    let bobs = services
        .conversations
        .for_user(bob)
        .await
        .expect("listing should succeed");
    let all = services
        .conversations
        .list()
        .await
        .expect("listing should succeed");

    assert_eq!(bobs, vec![shared]);
    assert_eq!(all.len(), 2);
}
