//! Graph evaluation tests: node kinds, routing and tracing

mod common;

use common::{doubler, passthrough, to_json};
use jdm_sdk::{
    traces_match, DecisionEngine, EngineError, EvaluationOptions, MatchedRule, TraceData, Value,
};
use serde_json::json;

fn traced() -> EvaluationOptions {
    EvaluationOptions::new().with_trace(true)
}

fn engine() -> DecisionEngine {
    DecisionEngine::new(Default::default())
}

// =============================================================================
// Input / output
// =============================================================================

#[test]
fn test_passthrough_returns_context_unchanged() {
    let decision = engine().create_decision(&passthrough()).unwrap();

    for context in [
        json!({}),
        json!({"a": 1, "b": [true, null, "x"], "c": {"d": 2.5}}),
        json!({"nested": {"deep": {"deeper": [1, 2, {"k": "v"}]}}}),
    ] {
        let result = decision
            .evaluate(context.clone(), EvaluationOptions::default())
            .unwrap();
        assert_eq!(to_json(result.output), context);
        assert!(result.trace.is_none());
    }
}

#[test]
fn test_passthrough_trace_has_both_nodes() {
    let decision = engine().create_decision(&passthrough()).unwrap();
    let result = decision.evaluate(json!({}), traced()).unwrap();

    assert_eq!(to_json(result.output), json!({}));
    let trace = result.trace.unwrap();
    assert_eq!(trace.len(), 2);

    let input = &trace["input"];
    assert_eq!(input.name, "Request");
    assert_eq!(input.order, 0);
    assert!(input.error.is_none());

    let output = &trace["output"];
    assert_eq!(output.order, 1);
    assert_eq!(output.input, Value::object());
}

#[test]
fn test_yaml_document() {
    let yaml = r#"
nodes:
  - id: input
    type: inputNode
  - id: output
    type: outputNode
edges:
  - id: e1
    sourceId: input
    targetId: output
"#;
    let result = engine()
        .evaluate(yaml, json!({"x": 1}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"x": 1}));
}

#[test]
fn test_multiple_outputs_keyed_by_node_id() {
    let document = json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {"id": "first", "type": "outputNode"},
            {"id": "second", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "first"},
            {"id": "e2", "sourceId": "in", "targetId": "second"}
        ]
    });
    let result = engine()
        .evaluate(&document.to_string(), json!({"v": 1}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(
        to_json(result.output),
        json!({"first": {"v": 1}, "second": {"v": 1}})
    );
}

// =============================================================================
// Expression nodes
// =============================================================================

#[test]
fn test_expression_node() {
    let decision = engine().create_decision(&doubler()).unwrap();
    let result = decision.evaluate(json!({"value": 21}), traced()).unwrap();

    assert_eq!(to_json(result.output), json!({"result": 42}));

    let trace = result.trace.unwrap();
    match &trace["calc"].trace_data {
        TraceData::Expression { expressions } => {
            assert_eq!(expressions["result"], Value::Number(42.0));
        }
        other => panic!("unexpected trace data {other:?}"),
    }
}

#[test]
fn test_merged_inputs_use_alias_or_source_id() {
    let document = json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {"id": "price", "type": "expressionNode",
             "content": {"expressions": [{"key": "value", "value": "amount * 1.5"}]}},
            {"id": "tax", "type": "expressionNode",
             "content": {"expressions": [{"key": "value", "value": "amount * 0.5"}]}},
            {"id": "total", "type": "expressionNode",
             "content": {"expressions": [{"key": "sum", "value": "price.value + levy.value"}]}},
            {"id": "out", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "price"},
            {"id": "e2", "sourceId": "in", "targetId": "tax"},
            {"id": "e3", "sourceId": "price", "targetId": "total"},
            {"id": "e4", "sourceId": "tax", "targetId": "total", "alias": "levy"},
            {"id": "e5", "sourceId": "total", "targetId": "out"}
        ]
    });

    let result = engine()
        .evaluate(&document.to_string(), json!({"amount": 10}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"sum": 20}));
}

#[test]
fn test_expression_syntax_error_surfaces_at_evaluation() {
    let document = doubler().replace("value * 2", "value *");
    let decision = engine().create_decision(&document).unwrap();

    let err = decision
        .evaluate(json!({"value": 1}), EvaluationOptions::default())
        .unwrap_err();
    match err {
        EngineError::Expression { node_id, error } => {
            assert_eq!(node_id, "calc");
            assert_eq!(error.position, 7);
        }
        other => panic!("expected expression error, got {other}"),
    }
}

#[test]
fn test_failure_is_traced_and_aborts() {
    let document = doubler().replace("value * 2", "value / 0");
    let decision = engine().create_decision(&document).unwrap();

    let err = decision.evaluate(json!({"value": 1}), traced()).unwrap_err();
    assert_eq!(err.node_id(), Some("calc"));
    assert!(matches!(err.root_cause(), EngineError::Expression { .. }));

    let trace = err.trace().unwrap();
    assert!(trace["in"].error.is_none());
    assert!(trace["calc"].error.as_deref().unwrap().contains("Division by zero"));
    assert!(!trace.contains_key("out"));
}

// =============================================================================
// Decision tables
// =============================================================================

fn discount_table(hit_policy: &str) -> String {
    json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {
                "id": "table",
                "type": "decisionTableNode",
                "content": {
                    "hitPolicy": hit_policy,
                    "inputs": [
                        {"id": "tier", "name": "Tier", "field": "customer.tier"},
                        {"id": "amount", "name": "Amount", "field": "amount"}
                    ],
                    "outputs": [{"id": "discount", "name": "Discount", "field": "discount"}],
                    "rules": [
                        {"_id": "gold-large", "tier": "\"gold\"", "amount": ">= 1000", "discount": "0.2"},
                        {"_id": "gold", "tier": "\"gold\"", "amount": "", "discount": "0.1"},
                        {"_id": "big", "tier": "", "amount": "[500..1000)", "discount": "0.05"}
                    ],
                    "defaultOutput": {"discount": 0}
                }
            },
            {"id": "out", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "table"},
            {"id": "e2", "sourceId": "table", "targetId": "out"}
        ]
    })
    .to_string()
}

#[test]
fn test_decision_table_first() {
    let decision = engine().create_decision(&discount_table("first")).unwrap();

    let result = decision
        .evaluate(json!({"customer": {"tier": "gold"}, "amount": 2000}), traced())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"discount": 0.2}));
    assert_eq!(
        result.trace.unwrap()["table"].trace_data,
        TraceData::DecisionTable {
            matched_rules: vec![MatchedRule {
                index: 0,
                rule_id: Some("gold-large".to_string())
            }]
        }
    );

    let result = decision
        .evaluate(json!({"customer": {"tier": "silver"}, "amount": 700}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"discount": 0.05}));
}

#[test]
fn test_decision_table_default_output() {
    let decision = engine().create_decision(&discount_table("first")).unwrap();
    let result = decision
        .evaluate(json!({"customer": {"tier": "silver"}, "amount": 10}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"discount": 0}));
}

#[test]
fn test_decision_table_collect() {
    let decision = engine().create_decision(&discount_table("collect")).unwrap();

    let result = decision
        .evaluate(json!({"customer": {"tier": "gold"}, "amount": 2000}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(
        to_json(result.output),
        json!([{"discount": 0.2}, {"discount": 0.1}])
    );

    let result = decision
        .evaluate(json!({"customer": {"tier": "silver"}, "amount": 10}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!([]));
}

// =============================================================================
// Switch routing
// =============================================================================

fn router(hit_policy: &str) -> String {
    json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {
                "id": "route",
                "type": "switchNode",
                "content": {
                    "hitPolicy": hit_policy,
                    "statements": [
                        {"id": "large", "condition": "amount > 100"},
                        {"id": "any", "condition": ""}
                    ]
                }
            },
            {"id": "high", "type": "expressionNode",
             "content": {"expressions": [{"key": "tier", "value": "'high'"}]}},
            {"id": "low", "type": "expressionNode",
             "content": {"expressions": [{"key": "tier", "value": "'low'"}]}},
            {"id": "out", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "route"},
            {"id": "e2", "sourceId": "route", "targetId": "high", "sourceHandle": "large"},
            {"id": "e3", "sourceId": "route", "targetId": "low", "sourceHandle": "any"},
            {"id": "e4", "sourceId": "high", "targetId": "out"},
            {"id": "e5", "sourceId": "low", "targetId": "out"}
        ]
    })
    .to_string()
}

#[test]
fn test_switch_first_takes_one_branch() {
    let decision = engine().create_decision(&router("first")).unwrap();

    let result = decision.evaluate(json!({"amount": 500}), traced()).unwrap();
    assert_eq!(to_json(result.output), json!({"tier": "high"}));

    let trace = result.trace.unwrap();
    assert!(!trace.contains_key("low"));
    assert_eq!(
        trace["route"].trace_data,
        TraceData::Switch {
            active_statements: vec!["large".to_string()]
        }
    );
    assert_eq!(trace["route"].output, trace["route"].input);

    let result = decision
        .evaluate(json!({"amount": 5}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(result.output), json!({"tier": "low"}));
}

#[test]
fn test_switch_collect_takes_every_branch() {
    let decision = engine().create_decision(&router("collect")).unwrap();
    let result = decision
        .evaluate(json!({"amount": 500}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(
        to_json(result.output),
        json!({"high": {"tier": "high"}, "low": {"tier": "low"}})
    );
}

#[test]
fn test_output_behind_untaken_branch_yields_null() {
    let document = json!({
        "nodes": [
            {"id": "in", "type": "inputNode"},
            {"id": "gate", "type": "switchNode",
             "content": {"statements": [{"id": "open", "condition": "open == true"}]}},
            {"id": "out", "type": "outputNode"}
        ],
        "edges": [
            {"id": "e1", "sourceId": "in", "targetId": "gate"},
            {"id": "e2", "sourceId": "gate", "targetId": "out", "sourceHandle": "open"}
        ]
    });
    let decision = engine().create_decision(&document.to_string()).unwrap();

    let closed = decision
        .evaluate(json!({"open": false}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(closed.output, Value::Null);

    let open = decision
        .evaluate(json!({"open": true}), EvaluationOptions::default())
        .unwrap();
    assert_eq!(to_json(open.output), json!({"open": true}));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_evaluation_is_idempotent() {
    let decision = engine().create_decision(&router("collect")).unwrap();
    let context = json!({"amount": 250});

    let first = decision.evaluate(context.clone(), traced()).unwrap();
    let second = decision.evaluate(context, traced()).unwrap();

    assert_eq!(first.output, second.output);
    assert!(traces_match(
        first.trace.as_ref().unwrap(),
        second.trace.as_ref().unwrap()
    ));
}

#[test]
fn test_tracing_does_not_change_output() {
    let decision = engine().create_decision(&discount_table("collect")).unwrap();
    let context = json!({"customer": {"tier": "gold"}, "amount": 800});

    let plain = decision
        .evaluate(context.clone(), EvaluationOptions::default())
        .unwrap();
    let with_trace = decision.evaluate(context, traced()).unwrap();

    assert_eq!(plain.output, with_trace.output);
    assert!(plain.trace.is_none());
    assert!(with_trace.trace.is_some());
}

#[test]
fn test_one_shot_matches_compiled_decision() {
    let engine = engine();
    let context = json!({"amount": 500});

    let one_shot = engine
        .evaluate(&router("first"), context.clone(), EvaluationOptions::default())
        .unwrap();
    let compiled = engine
        .create_decision(&router("first"))
        .unwrap()
        .evaluate(context, EvaluationOptions::default())
        .unwrap();

    assert_eq!(one_shot.output, compiled.output);
    assert!(engine.cached_keys().is_empty());
}

#[test]
fn test_result_serializes() {
    let decision = engine().create_decision(&doubler()).unwrap();
    let result = decision.evaluate(json!({"value": 2}), traced()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["output"], json!({"result": 4}));
    assert_eq!(json["trace"]["calc"]["trace_data"]["kind"], "expression");
}
