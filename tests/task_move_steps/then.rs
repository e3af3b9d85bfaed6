//! Then steps for task move BDD scenarios.

use super::world::{PROJECT, TaskMoveWorld, column};
use rstest_bdd_macros::then;
use sprintboard::board::{
    domain::{Column, MemberId, TaskId},
    ports::TaskStore,
    services::MoveTaskError,
};

#[then("the move succeeds")]
fn move_succeeds(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("expected the move to succeed, got {err:?}"));
    }
    Ok(())
}

#[then("the move fails as unauthorized")]
fn move_fails_unauthorized(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(MoveTaskError::Unauthorized { .. })) {
        return Err(eyre::eyre!("expected Unauthorized error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the move is rejected for column "{column_key}""#)]
fn move_rejected_for(world: &TaskMoveWorld, column_key: String) -> Result<(), eyre::Report> {
    let expected = column(&column_key)?;
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    let attempted = result
        .as_ref()
        .err()
        .and_then(MoveTaskError::attempted_destination);
    if attempted != Some(expected) {
        return Err(eyre::eyre!(
            "expected MoveRejected for {expected}, got {result:?}"
        ));
    }
    Ok(())
}

#[then(
    r#"the backend was called with task {task_id:u64}, column "{display_name}" and member {member:u64}"#
)]
fn backend_called_with(
    world: &TaskMoveWorld,
    task_id: u64,
    display_name: String,
    member: u64,
) -> Result<(), eyre::Report> {
    let calls = world
        .remote
        .calls
        .lock()
        .map_err(|_| eyre::eyre!("calls lock poisoned"))?
        .clone();
    let Some(&(called_task, called_column, called_member)) = calls.first() else {
        return Err(eyre::eyre!("backend was never called"));
    };
    eyre::ensure!(calls.len() == 1, "expected one backend call, got {calls:?}");
    eyre::ensure!(called_task == TaskId::new(task_id), "wrong task {called_task}");
    eyre::ensure!(
        called_column.display_name() == display_name,
        "wrong column {}",
        called_column.display_name()
    );
    eyre::ensure!(called_member == MemberId::new(member), "wrong member {called_member}");
    Ok(())
}

#[then("the backend was not called")]
fn backend_not_called(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let calls = world
        .remote
        .calls
        .lock()
        .map_err(|_| eyre::eyre!("calls lock poisoned"))?;
    eyre::ensure!(calls.is_empty(), "unexpected backend calls {calls:?}");
    Ok(())
}

#[then(r#"the board showed column "{column_key}" while the backend was busy"#)]
fn board_showed_column(world: &TaskMoveWorld, column_key: String) -> Result<(), eyre::Report> {
    let expected = column(&column_key)?;
    let seen: Vec<Option<Column>> = world
        .remote
        .columns_seen
        .lock()
        .map_err(|_| eyre::eyre!("columns lock poisoned"))?
        .clone();
    eyre::ensure!(
        seen == vec![Some(expected)],
        "expected the board to show {expected} during the call, saw {seen:?}"
    );
    Ok(())
}

#[then(r#"task {task_id:u64} is stored in column "{column_key}""#)]
fn task_stored_in(
    world: &TaskMoveWorld,
    task_id: u64,
    column_key: String,
) -> Result<(), eyre::Report> {
    let expected = column(&column_key)?;
    let stored = world
        .store
        .get(PROJECT, TaskId::new(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from store"))?;
    if stored.column() != expected {
        return Err(eyre::eyre!(
            "expected column {}, found {}",
            expected.key(),
            stored.column().key()
        ));
    }
    Ok(())
}
