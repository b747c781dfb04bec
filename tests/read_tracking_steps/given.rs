//! Given steps for read tracking BDD scenarios.

use super::world_state::{ReadTrackingWorld, run_async};
use eyre::WrapErr;
use postbox::chat::services::CreateConversationRequest;
use rstest_bdd_macros::given;

#[given(r#"a conversation between "{first}" and "{second}""#)]
fn conversation_between(
    world: &mut ReadTrackingWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let members = [world.register(&first)?, world.register(&second)?];
    let conversation = run_async(
        world
            .conversations
            .create(CreateConversationRequest::new("scenario", members)),
    )
    .wrap_err("create scenario conversation")?;
    world.conversation = Some(conversation.id());
    Ok(())
}

#[given(r#"a registered outsider "{username}""#)]
fn registered_outsider(
    world: &mut ReadTrackingWorld,
    username: String,
) -> Result<(), eyre::Report> {
    world.register(&username)?;
    Ok(())
}

#[given(r#""{username}" posts "{body}""#)]
fn posts(
    world: &mut ReadTrackingWorld,
    username: String,
    body: String,
) -> Result<(), eyre::Report> {
    world.post(&username, body)
}

#[given(r#""{username}" has read the conversation"#)]
fn has_read(world: &mut ReadTrackingWorld, username: String) -> Result<(), eyre::Report> {
    world
        .mark_read(&username)?
        .wrap_err("mark conversation read in scenario setup")?;
    Ok(())
}
