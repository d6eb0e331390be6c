//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use jdm_sdk::{DecisionEngine, DecisionEngineBuilder, MemoryLoader, Value};
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `input -> output`
pub fn passthrough() -> String {
    json!({
        "contentType": "application/vnd.gorules.decision",
        "nodes": [
            {"id": "input", "type": "inputNode", "name": "Request"},
            {"id": "output", "type": "outputNode", "name": "Response"}
        ],
        "edges": [{"id": "e1", "sourceId": "input", "targetId": "output", "type": "edge"}]
    })
    .to_string()
}

/// `result = value * 2`
pub fn doubler() -> String {
    json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {
                "id": "calc",
                "type": "expressionNode",
                "name": "Double",
                "content": {"expressions": [{"id": "x1", "key": "result", "value": "value * 2"}]}
            },
            {"id": "out", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "calc"},
            {"id": "e2", "sourceId": "calc", "targetId": "out"}
        ]
    })
    .to_string()
}

/// `input -> ref(key) -> output`
pub fn reference(key: &str) -> String {
    fan_out(&[("ref", key)])
}

/// `input` feeds one decision node per `(node_id, key)`, all joined at `output`
pub fn fan_out(references: &[(&str, &str)]) -> String {
    let mut nodes = vec![json!({"id": "input", "type": "inputNode"})];
    let mut edges = Vec::new();

    for (node_id, key) in references {
        nodes.push(json!({"id": node_id, "type": "decisionNode", "content": {"key": key}}));
        edges.push(json!({"id": format!("in-{node_id}"), "sourceId": "input", "targetId": node_id}));
        edges.push(json!({"id": format!("{node_id}-out"), "sourceId": node_id, "targetId": "output"}));
    }
    nodes.push(json!({"id": "output", "type": "outputNode"}));

    json!({"nodes": nodes, "edges": edges}).to_string()
}

/// Engine over an in-memory document set, counting loader calls
pub fn counting_engine(documents: &[(&str, String)]) -> (DecisionEngine, Arc<AtomicUsize>) {
    counting_engine_with(DecisionEngineBuilder::new(), documents)
}

pub fn counting_engine_with(
    builder: DecisionEngineBuilder,
    documents: &[(&str, String)],
) -> (DecisionEngine, Arc<AtomicUsize>) {
    let store: MemoryLoader = documents
        .iter()
        .map(|(key, text)| (key.to_string(), text.clone()))
        .collect();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let engine = builder
        .with_loader_fn(move |key: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            jdm_sdk::DocumentLoader::load(&store, key)
        })
        .build()
        .unwrap();

    (engine, calls)
}

pub fn to_json(value: Value) -> JsonValue {
    JsonValue::from(value)
}
