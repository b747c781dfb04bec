//! When steps for message hook BDD scenarios.

use super::world_state::{MessagingWorld, run_async};
use eyre::WrapErr;
use postbox::messaging::services::SendMessageRequest;
use rstest_bdd_macros::when;

#[when(r#""{sender}" sends "{content}" to "{receiver}""#)]
fn send_message(
    world: &mut MessagingWorld,
    sender: String,
    content: String,
    receiver: String,
) -> Result<(), eyre::Report> {
    let request = SendMessageRequest::new(
        world.account(&sender)?,
        world.account(&receiver)?,
        content,
    );
    let message =
        run_async(world.messaging.send_message(request)).wrap_err("send message")?;
    world.last_message = Some(message);
    Ok(())
}

#[when(r#""{editor}" edits the message to "{content}""#)]
fn edit_message(
    world: &mut MessagingWorld,
    editor: String,
    content: String,
) -> Result<(), eyre::Report> {
    let message_id = world.message()?.id();
    let editor_id = world.account(&editor)?;
    match run_async(world.messaging.edit_message(message_id, editor_id, content)) {
        Ok(saved) => world.last_message = Some(saved),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#""{username}" deletes their account"#)]
fn delete_account(world: &mut MessagingWorld, username: String) -> Result<(), eyre::Report> {
    let user = world.account(&username)?;
    let report = run_async(world.messaging.delete_user(user, "delete"))
        .wrap_err("delete scenario account")?;
    world.deletion = Some(report);
    Ok(())
}
