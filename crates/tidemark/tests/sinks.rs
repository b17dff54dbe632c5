mod support;

use pretty_assertions::assert_eq;
use support::FakeMySql;
use tidemark::{
    migration::{DirectSink, QueueingSink, StatementSink, Step},
    Driver,
};

fn step(sql: &str) -> Step {
    Step::Execute {
        sql: sql.to_string(),
        params: vec![],
    }
}

#[tokio::test]
async fn queue_holds_until_drained() {
    let server = FakeMySql::new();
    let mut conn = server.connect().await.unwrap();

    let mut queue = QueueingSink::new();
    for sql in ["SELECT 1", "SELECT 2", "SELECT 3"] {
        queue.submit(step(sql)).await.unwrap();
    }

    assert_eq!(queue.len(), 3);
    assert!(server.log().is_empty());

    assert_eq!(queue.drain(&mut *conn).await.unwrap(), 3);
    assert!(queue.is_empty());
    assert_eq!(server.log(), ["SELECT 1", "SELECT 2", "SELECT 3"]);
}

#[tokio::test]
async fn first_failure_abandons_the_rest() {
    let server = FakeMySql::new();
    let mut conn = server.connect().await.unwrap();
    server.fail_on("SELECT 2");

    let mut queue = QueueingSink::new();
    queue.push(step("SELECT 1"));
    queue.push(step("SELECT 2"));
    queue.push(step("SELECT 3"));

    let err = queue.drain(&mut *conn).await.unwrap_err();

    assert!(err.is_driver());
    assert!(queue.is_empty());
    assert_eq!(server.log(), ["SELECT 1", "SELECT 2"]);

    // Nothing is left to resume
    assert_eq!(queue.drain(&mut *conn).await.unwrap(), 0);
}

#[tokio::test]
async fn direct_sink_runs_on_submit() {
    let server = FakeMySql::new();
    let mut conn = server.connect().await.unwrap();

    let mut sink = DirectSink::new(&mut *conn);
    sink.submit(step("SELECT 1")).await.unwrap();
    assert_eq!(server.log(), ["SELECT 1"]);

    server.fail_on("SELECT 2");
    assert!(sink.submit(step("SELECT 2")).await.is_err());
}

#[test]
fn steps_display() {
    assert_eq!(step("SELECT 1").to_string(), "SELECT 1");
    assert_eq!(
        Step::rename_column("user", "a", "b").to_string(),
        "rename `a` to `b` in `user`"
    );
}
