//! Then steps for message hook BDD scenarios.

use super::world_state::{MessagingWorld, run_async};
use eyre::WrapErr;
use postbox::ErrorKind;
use rstest_bdd_macros::then;

#[then(r#"the notification count for "{username}" is {count:usize}"#)]
fn notification_count(
    world: &MessagingWorld,
    username: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let user = world.account(&username)?;
    let notifications = run_async(world.messaging.notifications(user, false))
        .wrap_err("list notifications")?;
    if notifications.len() != count {
        return Err(eyre::eyre!(
            "expected {count} notifications for {username}, found {}",
            notifications.len()
        ));
    }
    Ok(())
}

#[then(r#"the newest notification for "{username}" mentions "{text}""#)]
fn newest_notification_mentions(
    world: &MessagingWorld,
    username: String,
    text: String,
) -> Result<(), eyre::Report> {
    let user = world.account(&username)?;
    let notifications = run_async(world.messaging.notifications(user, false))
        .wrap_err("list notifications")?;
    let newest = notifications
        .first()
        .ok_or_else(|| eyre::eyre!("no notifications for {username}"))?;
    if !newest.content().contains(&text) {
        return Err(eyre::eyre!(
            "expected notification to mention {text}, got {:?}",
            newest.content()
        ));
    }
    Ok(())
}

#[then("the message history holds {count:usize} entries")]
fn history_holds(world: &MessagingWorld, count: usize) -> Result<(), eyre::Report> {
    let message_id = world.message()?.id();
    let detail =
        run_async(world.messaging.message_detail(message_id)).wrap_err("load message detail")?;
    if detail.history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            detail.history.len()
        ));
    }
    Ok(())
}

#[then(r#"the newest history entry holds "{content}""#)]
fn newest_history_entry(world: &MessagingWorld, content: String) -> Result<(), eyre::Report> {
    let message_id = world.message()?.id();
    let detail =
        run_async(world.messaging.message_detail(message_id)).wrap_err("load message detail")?;
    let newest = detail
        .history
        .first()
        .ok_or_else(|| eyre::eyre!("message has no history"))?;
    if newest.old_content() != content {
        return Err(eyre::eyre!(
            "expected newest snapshot {content:?}, found {:?}",
            newest.old_content()
        ));
    }
    Ok(())
}

#[then("the message is flagged as edited")]
fn message_is_edited(world: &MessagingWorld) -> Result<(), eyre::Report> {
    let message = world.message()?;
    if !message.is_edited() || message.last_edited_at().is_none() {
        return Err(eyre::eyre!("expected message to be flagged as edited"));
    }
    Ok(())
}

#[then("the message is not flagged as edited")]
fn message_is_not_edited(world: &MessagingWorld) -> Result<(), eyre::Report> {
    if world.message()?.is_edited() {
        return Err(eyre::eyre!("expected message to remain unedited"));
    }
    Ok(())
}

#[then("the edit is rejected as forbidden")]
fn edit_is_forbidden(world: &MessagingWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the edit to fail"))?;
    if err.kind() != ErrorKind::Forbidden {
        return Err(eyre::eyre!("expected a forbidden error, got {err:?}"));
    }
    Ok(())
}

#[then("the deletion report lists {sent:usize} sent and {received:usize} received messages")]
fn deletion_report(
    world: &MessagingWorld,
    sent: usize,
    received: usize,
) -> Result<(), eyre::Report> {
    let report = world
        .deletion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deletion report"))?;
    if (report.sent_messages_removed, report.received_messages_removed) != (sent, received) {
        return Err(eyre::eyre!("unexpected deletion report {report:?}"));
    }
    Ok(())
}

#[then(r#""{username}" has no messages"#)]
fn has_no_messages(world: &MessagingWorld, username: String) -> Result<(), eyre::Report> {
    let user = world.account(&username)?;
    let messages = run_async(world.messaging.user_messages(user)).wrap_err("list messages")?;
    if !messages.sent.is_empty() || !messages.received.is_empty() {
        return Err(eyre::eyre!("expected {username} to have no messages"));
    }
    Ok(())
}
