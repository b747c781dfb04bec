//! Then steps for read tracking BDD scenarios.

use super::world_state::{ReadTrackingWorld, run_async};
use eyre::WrapErr;
use postbox::ErrorKind;
use rstest_bdd_macros::then;

#[then("{count:usize} read markers were written")]
fn markers_written(world: &ReadTrackingWorld, count: usize) -> Result<(), eyre::Report> {
    let result = world
        .last_mark
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mark-read result"))?;
    match result {
        Ok(written) if *written == count => Ok(()),
        other => Err(eyre::eyre!("expected {count} markers, got {other:?}")),
    }
}

#[then(r#"the unread count for "{username}" is {count:usize}"#)]
fn unread_count_is(
    world: &ReadTrackingWorld,
    username: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let reader = world.account(&username)?;
    let unread = run_async(world.conversations.unread_count(world.conversation()?, reader))
        .wrap_err("count unread messages")?;
    if unread != count {
        return Err(eyre::eyre!(
            "expected {count} unread messages for {username}, found {unread}"
        ));
    }
    Ok(())
}

#[then("the request is rejected as forbidden")]
fn rejected_as_forbidden(world: &ReadTrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_mark
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mark-read result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::Forbidden => Ok(()),
        other => Err(eyre::eyre!("expected a forbidden error, got {other:?}")),
    }
}
