//! Trace Inspection Example
//!
//! Evaluates a decision with tracing enabled and prints each node's entry in
//! dispatch order, including the nested trace of referenced decisions. The
//! last case shows the partial trace attached to a failed evaluation.

use jdm_sdk::{
    DecisionEngine, EvaluationOptions, MemoryLoader, Trace, TraceData, TraceEntry,
};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let loader = MemoryLoader::new()
        .with_document("fastest.json", include_str!("rules/reusability/fastest.json"))
        .with_document("cheapest.json", include_str!("rules/reusability/cheapest.json"));
    let engine = DecisionEngine::with_loader(loader);
    let router = engine.create_decision(include_str!("rules/reusability/router.json"))?;

    let options = EvaluationOptions::new().with_trace(true);

    println!("=== Traced evaluation ===");
    let result = router.evaluate(json!({"preference": "fastest", "distance": 640}), options.clone())?;
    println!("Output: {}\n", serde_json::to_string(&result.output)?);
    if let Some(trace) = &result.trace {
        print_trace(trace, 0);
    }

    println!("\n=== Trace as JSON ===");
    println!("{}", serde_json::to_string_pretty(&result.trace)?);

    println!("\n=== Failed evaluation ===");
    // A string distance cannot be ordered against a number
    match router.evaluate(json!({"preference": "fastest", "distance": "far"}), options) {
        Ok(result) => println!("Unexpected success: {}", serde_json::to_string(&result.output)?),
        Err(err) => {
            println!("Error: {}", err);
            if let Some(trace) = err.trace() {
                print_trace(trace, 0);
            }
        }
    }

    Ok(())
}

fn print_trace(trace: &Trace, depth: usize) {
    let mut entries: Vec<&TraceEntry> = trace.values().collect();
    entries.sort_by_key(|entry| entry.order);

    let indent = "  ".repeat(depth);
    for entry in entries {
        println!(
            "{}[{}] {} ({}) {:?}",
            indent, entry.order, entry.node_id, entry.name, entry.performance
        );
        println!("{}    input:  {}", indent, entry.input);
        println!("{}    output: {}", indent, entry.output);
        if let Some(error) = &entry.error {
            println!("{}    error:  {}", indent, error);
        }

        match &entry.trace_data {
            TraceData::DecisionTable { matched_rules } => {
                let ids: Vec<String> = matched_rules
                    .iter()
                    .map(|rule| rule.rule_id.clone().unwrap_or_else(|| rule.index.to_string()))
                    .collect();
                println!("{}    matched: {:?}", indent, ids);
            }
            TraceData::Switch { active_statements } => {
                println!("{}    active: {:?}", indent, active_statements);
            }
            TraceData::Decision { key, trace } => {
                println!("{}    decision: {}", indent, key);
                print_trace(trace, depth + 2);
            }
            TraceData::Expression { .. } | TraceData::None => {}
        }
    }
}
