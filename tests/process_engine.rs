//! End-to-end tests against the bundled `stub-engine` process.

use repl_console::engine::{Engine, EngineFault, ProcessEngine};
use repl_console::schema::CommandSchemaDocument;
use repl_console::session::{LineKind, Session};

fn spawn_stub() -> ProcessEngine {
    ProcessEngine::spawn(env!("CARGO_BIN_EXE_stub-engine"), &[]).unwrap()
}

fn last_line(session: &Session) -> (LineKind, String) {
    let line = session.log().last().unwrap();
    (line.kind(), line.text().to_string())
}

#[test]
fn test_unknown_command_before_schema_load() {
    let engine = spawn_stub();
    let mut session = Session::default();

    session.command_input_mut().set("greet bob");
    session.submit(Some(&engine));

    assert_eq!(
        last_line(&session),
        (LineKind::Error, "❌ Unknown command: greet".to_string())
    );
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.stats().failed, 1);
}

#[test]
fn test_load_template_then_greet() {
    let engine = spawn_stub();
    let mut session = Session::default();

    session.schema_input_mut().set(CommandSchemaDocument::template_json());
    session.load_schema(Some(&engine));
    assert_eq!(
        last_line(&session),
        (LineKind::Success, "✅ Loaded 1 command(s)".to_string())
    );
    assert!(session.schema_input().is_empty());

    session.command_input_mut().set("greet bob");
    session.submit(Some(&engine));

    let texts: Vec<&str> = session.log().lines().iter().map(|l| l.text()).collect();
    assert_eq!(texts[texts.len() - 2..], ["> greet bob", "Hello bob"]);
    assert_eq!(last_line(&session).0, LineKind::Success);
}

#[test]
fn test_malformed_schema_keeps_editor() {
    let engine = spawn_stub();
    let mut session = Session::default();

    session.schema_input_mut().set("{ \"commands\": ");
    session.load_schema(Some(&engine));

    let (kind, text) = last_line(&session);
    assert_eq!(kind, LineKind::Error);
    assert!(text.starts_with("❌ parse error:"));
    assert_eq!(session.schema_input().text(), "{ \"commands\": ");
}

#[test]
fn test_engine_declared_fault() {
    let engine = spawn_stub();
    let doc = r#"{"commands":[{"name":"boom","namespace":[],"hint":"","description":"",
        "arguments":[],"properties":{},"routine":"fault"}]}"#;
    engine.load_commands_json(doc).unwrap();

    match engine.execute_command("boom") {
        Err(EngineFault::Engine(message)) => assert_eq!(message, "routine for 'boom' crashed"),
        other => panic!("expected engine fault, got {:?}", other),
    }

    let mut session = Session::default();
    session.command_input_mut().set("boom");
    session.submit(Some(&engine));
    assert_eq!(
        last_line(&session),
        (LineKind::Error, "Error: routine for 'boom' crashed".to_string())
    );
    assert_eq!(session.stats().faults, 1);
    assert_eq!(session.history().iter().collect::<Vec<_>>(), vec!["boom"]);
}

#[test]
fn test_process_survives_many_requests() {
    let engine = spawn_stub();
    engine
        .load_commands_json(&CommandSchemaDocument::template_json())
        .unwrap();
    for i in 0..50 {
        let reply = engine.execute_command(&format!("greet user{}", i)).unwrap();
        assert_eq!(reply, format!("Hello user{}", i));
    }
}
