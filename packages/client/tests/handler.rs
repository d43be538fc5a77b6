//! Event handling against resources loaded from disk

use std::fs;

use projson_client::prelude::*;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_event_from_disk_resources() {
    let root = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(root.path().join("reports")).expect("Failed to create resource directory");
    fs::write(
        root.path().join("reports/loan.json"),
        r#"[
            {"source": "$.loan.id", "target": "$.report.id"},
            {"source": "$.loan.fees[0].amount", "target": "$.report.charges[?(@.kind=='late')].amount"},
            {"source": "$.loan.fees[1].amount", "target": "$.report.charges[?(@.kind=='origination')].amount"},
            {"source": "$.loan.missing", "target": "$.report.missing"}
        ]"#,
    )
    .expect("Failed to write resource file");

    let store = ResourceStore::load(&ResourceConfig::with_root(root.path()))
        .expect("resource root should load");
    let handler = EventHandler::new(store, ProjectorConfig::default()).expect("default config is valid");

    let event = generate_event(&json!({
        "loan": {"id": "L-42", "fees": [{"amount": 25}, {"amount": 300}]}
    }));
    let response = handler.handle(&event).expect("event should be handled");

    assert_eq!(response.reports.len(), 1);
    let report = &response.reports[0];
    assert_eq!(report.resource, "reports.loan");
    assert_eq!(
        report.document,
        json!({"report": {
            "id": "L-42",
            "charges": [
                {"kind": "late", "amount": 25},
                {"kind": "origination", "amount": 300}
            ]
        }})
    );
    assert!(report.failures.is_empty());
}

#[test]
fn test_fail_fast_handler_propagates_rule_errors() {
    let store = ResourceStore::from_rule_sets([("bad", vec![Rule::new("$.a", "$.a[")])]);
    let config = ProjectorConfig {
        fail_fast: true,
        ..ProjectorConfig::default()
    };
    let handler = EventHandler::new(store, config).expect("config is valid");
    let err = handler
        .handle(&generate_event(&json!({"a": 1})))
        .expect_err("fail fast propagates the rule error");
    assert!(err.is_path());
}

#[test]
fn test_invalid_projector_config_is_rejected() {
    let config = ProjectorConfig {
        max_index: 0,
        ..ProjectorConfig::default()
    };
    assert!(matches!(
        EventHandler::new(ResourceStore::new(), config),
        Err(ProjectionError::Config(_))
    ));
}
