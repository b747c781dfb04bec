//! BDD scenarios for the message notification and edit-history hooks.

#[path = "message_hooks_steps/given.rs"]
mod given;
#[path = "message_hooks_steps/then.rs"]
mod then;
#[path = "message_hooks_steps/when.rs"]
mod when;
#[path = "message_hooks_steps/world.rs"]
mod world_state;

use rstest_bdd_macros::scenario;
use world_state::{MessagingWorld, world};

#[scenario(
    path = "tests/features/message_notifications.feature",
    name = "Receiver is notified of a new message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn receiver_is_notified(world: MessagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_notifications.feature",
    name = "Editing a message does not notify again"
)]
#[tokio::test(flavor = "multi_thread")]
async fn editing_does_not_notify(world: MessagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_edit_history.feature",
    name = "Each content change is recorded"
)]
#[tokio::test(flavor = "multi_thread")]
async fn each_change_is_recorded(world: MessagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_edit_history.feature",
    name = "Saving unchanged content records nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_content_records_nothing(world: MessagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_edit_history.feature",
    name = "Only the sender may edit a message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn only_sender_may_edit(world: MessagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_edit_history.feature",
    name = "Deleting a user removes their messages and notifications"
)]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_user_cascades(world: MessagingWorld) {
    let _ = world;
}
