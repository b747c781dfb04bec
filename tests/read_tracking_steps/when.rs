//! When steps for read tracking BDD scenarios.

use super::world_state::ReadTrackingWorld;
use rstest_bdd_macros::when;

#[when(r#""{username}" marks the conversation as read"#)]
fn marks_read(world: &mut ReadTrackingWorld, username: String) -> Result<(), eyre::Report> {
    world.last_mark = Some(world.mark_read(&username)?);
    Ok(())
}

#[when(r#""{username}" posts a follow-up "{body}""#)]
fn posts_follow_up(
    world: &mut ReadTrackingWorld,
    username: String,
    body: String,
) -> Result<(), eyre::Report> {
    world.post(&username, body)
}
