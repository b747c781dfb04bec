//! Given steps for message hook BDD scenarios.

use super::world_state::{MessagingWorld, run_async};
use eyre::WrapErr;
use postbox::messaging::services::SendMessageRequest;
use postbox::user::services::RegisterUserRequest;
use rstest_bdd_macros::given;

#[given(r#"a registered user "{username}""#)]
fn registered_user(world: &mut MessagingWorld, username: String) -> Result<(), eyre::Report> {
    let user = run_async(world.users.register(RegisterUserRequest::new(
        username.as_str(),
        format!("{username}@example.com"),
        username.as_str(),
        "Tester",
    )))
    .wrap_err("register scenario user")?;
    world.accounts.insert(username, user.id());
    Ok(())
}

#[given(r#""{sender}" has sent "{content}" to "{receiver}""#)]
fn message_already_sent(
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
    let message = run_async(world.messaging.send_message(request))
        .wrap_err("send message in scenario setup")?;
    world.last_message = Some(message);
    Ok(())
}
