//! Simple Decision Example
//!
//! Compiles one decision document (a fee table feeding an expression node)
//! and evaluates it for a handful of shipments.
//!
//! Run with `RUST_LOG=debug` to see per-node dispatch logs.

use jdm_sdk::{DecisionEngine, EngineConfig, EvaluationOptions};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    println!("=== Shipping Fee Decision ===\n");

    let content = std::fs::read_to_string("demos/rules/shipping_fees.json")?;
    let engine = DecisionEngine::new(EngineConfig::default());
    let decision = engine.create_decision(&content)?;
    println!("✓ Decision compiled ({} nodes)\n", decision.document().nodes().len());

    let shipments = [
        json!({"destination": "domestic", "weight": 1.2, "express": false}),
        json!({"destination": "domestic", "weight": 12, "express": true}),
        json!({"destination": "eu", "weight": 5}),
        json!({"destination": "other", "weight": 20, "express": true}),
        json!({"destination": "moon", "weight": 1}),
    ];

    for shipment in shipments {
        let result = decision.evaluate(shipment.clone(), EvaluationOptions::default())?;
        println!("Shipment: {}", shipment);
        println!("  Result:   {}", serde_json::to_string(&result.output)?);
        println!("  Time:     {:?}\n", result.performance);
    }

    // One-shot form: compiles the document on every call
    let result = engine.evaluate(
        &content,
        json!({"destination": "eu", "weight": 30, "express": true}),
        EvaluationOptions::default(),
    )?;
    println!("One-shot: {}", serde_json::to_string_pretty(&result.output)?);

    Ok(())
}
