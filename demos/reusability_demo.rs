//! Reusability Example
//!
//! A router decision picks a carrier by delegating to one of two shared
//! decisions (`fastest.json`, `cheapest.json`) through decision nodes. The
//! shared documents are read by a file-system loader and cached by the
//! engine, so each one is loaded at most once however often it is used.

use jdm_sdk::{DecisionEngineBuilder, EngineError, EvaluationOptions, FileSystemLoader};
use serde_json::json;

const RULES_DIR: &str = "demos/rules/reusability";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let engine = DecisionEngineBuilder::new()
        .with_loader(FileSystemLoader::new(RULES_DIR)?)
        .with_max_depth(4)
        .build()?;

    // The router itself goes through the loader too
    let router = engine.get_decision("router.json")?;

    println!("--- Executing Reusability Demo: {}/router.json ---", RULES_DIR);

    let requests = [
        json!({"preference": "fastest", "distance": 12}),
        json!({"preference": "fastest", "distance": 4200}),
        json!({"preference": "cheapest", "distance": 300}),
        json!({"preference": "cheapest", "distance": 1800}),
        json!({"distance": 90}),
    ];

    for request in requests {
        println!("\nRequest:    {}", request);
        match router.evaluate(request, EvaluationOptions::default()) {
            Ok(result) => println!("Result:     {}", serde_json::to_string(&result.output)?),
            Err(err) => report(&err),
        }
    }

    println!("\nCached decisions: {:?}", engine.cached_keys());
    println!("\n--- Execution Complete ---");
    Ok(())
}

fn report(err: &EngineError) {
    match err.node_id() {
        Some(node_id) => println!("Error in node '{}': {}", node_id, err),
        None => println!("Error: {}", err),
    }
}
