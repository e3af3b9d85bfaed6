//! Given steps for task move BDD scenarios.

use super::world::{PROJECT, TaskMoveWorld, column};
use chrono::Utc;
use rstest_bdd_macros::given;
use serde_json::{Value, json};
use sprintboard::board::{
    domain::{MemberId, Session, Task, TaskId},
    ports::{RemoteTask, RemoteTaskError, TaskStore},
};

#[given(r#"a task {task_id:u64} in column "{column_key}" assigned to member {member:u64}"#)]
fn task_in_column(
    world: &mut TaskMoveWorld,
    task_id: u64,
    column_key: String,
    member: u64,
) -> Result<(), eyre::Report> {
    let task = Task::new(
        TaskId::new(task_id),
        PROJECT,
        "Scenario task",
        column(&column_key)?,
        Utc::now(),
    )
    .with_points(3)
    .with_assigned_member(MemberId::new(member));
    world.store.write(PROJECT, task)?;
    Ok(())
}

#[given("the signed-in member is {member:u64}")]
fn signed_in_member(world: &mut TaskMoveWorld, member: u64) {
    world.session = Some(Session::member(MemberId::new(member)));
}

#[given("the signed-in team leader is member {member:u64}")]
fn signed_in_leader(world: &mut TaskMoveWorld, member: u64) {
    world.session = Some(Session::leader(MemberId::new(member)));
}

fn script(world: &TaskMoveWorld, body: Value) -> Result<(), eyre::Report> {
    let document = RemoteTask::from_value(body)?;
    let mut response = world
        .remote
        .response
        .lock()
        .map_err(|_| eyre::eyre!("scripted response lock poisoned"))?;
    *response = Some(Ok(document));
    Ok(())
}

#[given(r#"the backend answers with column "{name}""#)]
fn backend_answers_with_column(world: &mut TaskMoveWorld, name: String) -> Result<(), eyre::Report> {
    script(world, json!({"id": 42, "column": name}))
}

#[given(r#"the backend reports column "{name}" and status "{status}""#)]
fn backend_reports_column_and_status(
    world: &mut TaskMoveWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    script(world, json!({"id": 42, "column": name, "status": status}))
}

#[given("the backend replies without any column field")]
fn backend_replies_without_column(world: &mut TaskMoveWorld) -> Result<(), eyre::Report> {
    script(world, json!({"id": 42, "title": "Scenario task"}))
}

#[given("the backend rejects the move")]
fn backend_rejects(world: &mut TaskMoveWorld) -> Result<(), eyre::Report> {
    let mut response = world
        .remote
        .response
        .lock()
        .map_err(|_| eyre::eyre!("scripted response lock poisoned"))?;
    *response = Some(Err(RemoteTaskError::Rejected {
        status: 422,
        message: "transition not allowed".to_owned(),
    }));
    Ok(())
}
