//! End-to-end pipeline tests: parse → arguments → includes → commands.

use pretty_assertions::assert_eq;
use strudel::engine::ExecutionOptions;
use strudel::{Engine, EngineConfig, StrudelError};
use tempfile::TempDir;

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

#[tokio::test]
async fn arguments_and_includes_compose() {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("notes.txt"), "done")
        .await
        .unwrap();

    let options = ExecutionOptions::new(dir.path());
    let result = engine()
        .expand(
            "Hello $1, see @notes.txt",
            &["world".to_string()],
            dir.path(),
            &options,
        )
        .await
        .unwrap();

    assert_eq!(result, "Hello world, see done");
}

#[tokio::test]
async fn command_markers_execute_during_expand() {
    let dir = TempDir::new().unwrap();
    let options = ExecutionOptions::new(dir.path());

    let result = engine()
        .expand("!echo hi\n", &[], dir.path(), &options)
        .await
        .unwrap();

    assert_eq!(result, "hi\n");
}

#[tokio::test]
async fn full_template_expands_in_order() {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("steps.txt"), "review the diff")
        .await
        .unwrap();

    let raw = "---\ndescription: demo\n---\nTask for $1: @steps.txt\n!echo ready\n";
    let options = ExecutionOptions::new(dir.path());

    let engine = engine();
    let template = engine.parse(raw).unwrap();
    assert_eq!(template.metadata["description"], "demo");

    let result = engine
        .expand(raw, &["alice".to_string()], dir.path(), &options)
        .await
        .unwrap();
    assert_eq!(result, "Task for alice: review the diff\nready\n");
}

#[tokio::test]
async fn arguments_substitute_before_includes_resolve() {
    // A positional argument may select the file to include.
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("picked.txt"), "chosen")
        .await
        .unwrap();

    let options = ExecutionOptions::new(dir.path());
    let result = engine()
        .expand("@$1", &["picked.txt".to_string()], dir.path(), &options)
        .await
        .unwrap();

    assert_eq!(result, "chosen");
}

#[tokio::test]
async fn malformed_front_matter_aborts_before_any_work() {
    let dir = TempDir::new().unwrap();
    let options = ExecutionOptions::new(dir.path());

    let result = engine()
        .expand("---\n: [broken\n---\n!echo no\n", &[], dir.path(), &options)
        .await;

    assert!(matches!(result, Err(StrudelError::Parse(_))));
}

#[tokio::test]
async fn include_failure_prevents_command_execution() {
    let dir = TempDir::new().unwrap();
    let options = ExecutionOptions::new(dir.path());

    let result = engine()
        .expand("@ghost.txt\n!echo unreached\n", &[], dir.path(), &options)
        .await;

    assert!(matches!(result, Err(StrudelError::FileNotFound(_))));
}
