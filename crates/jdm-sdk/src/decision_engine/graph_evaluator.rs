//! Graph evaluation for a single call
//!
//! Nodes are visited in the document's precomputed topological order. Each
//! node moves `Pending -> Running -> Done | Failed`, or straight to `Skipped`
//! when none of its incoming edges is live. The first failure aborts the call.

use super::engine::EngineInner;
use super::tracer::{NodeRecord, TraceRecorder};
use super::types::EvaluationOptions;
use crate::error::{EngineError, Result};
use jdm_core::graph::{DecisionRefContent, Document, Node, NodeKind};
use jdm_core::{ExpressionError, Value};
use jdm_runtime::{
    evaluate_decision_table, evaluate_expression_node, evaluate_switch, Trace, TraceData,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-call node state
#[derive(Debug, Clone, PartialEq)]
enum NodeState {
    Pending,
    Running,
    Done {
        output: Value,
        /// Statements taken by a switch node; empty for other kinds
        active: Vec<String>,
    },
    Skipped,
    Failed,
}

/// What a node produced
struct NodeOutcome {
    output: Value,
    active: Vec<String>,
    trace_data: TraceData,
}

impl NodeOutcome {
    fn value(output: Value) -> Self {
        Self {
            output,
            active: Vec::new(),
            trace_data: TraceData::None,
        }
    }
}

/// Output and optional trace of one document evaluation
pub(crate) struct Evaluated {
    pub output: Value,
    pub trace: Option<Trace>,
}

pub(crate) struct GraphEvaluator<'a> {
    engine: &'a EngineInner,
    options: &'a EvaluationOptions,
    /// Reference keys currently being evaluated, outermost first
    stack: &'a mut Vec<String>,
}

impl<'a> GraphEvaluator<'a> {
    pub(crate) fn new(
        engine: &'a EngineInner,
        options: &'a EvaluationOptions,
        stack: &'a mut Vec<String>,
    ) -> Self {
        Self {
            engine,
            options,
            stack,
        }
    }

    pub(crate) fn run(&mut self, document: &Document, context: &Value) -> Result<Evaluated> {
        let mut states = vec![NodeState::Pending; document.nodes().len()];
        let mut recorder = self.options.trace.then(TraceRecorder::new);

        for &index in document.evaluation_order() {
            if self.options.is_cancelled() {
                tracing::warn!("Evaluation cancelled before node '{}'", document.node(index).id);
                return Err(EngineError::Cancelled);
            }

            let node = document.node(index);
            let input = if node.is_input() {
                context.clone()
            } else {
                match merge_inputs(document, index, &states) {
                    Some(input) => input,
                    None => {
                        tracing::debug!("Skipping node '{}': no live input", node.id);
                        states[index] = NodeState::Skipped;
                        continue;
                    }
                }
            };

            tracing::debug!("Evaluating {} '{}'", node.kind.type_name(), node.id);
            states[index] = NodeState::Running;
            let started = recorder.as_ref().map(|_| Instant::now());

            match self.dispatch(node, &input, context) {
                Ok(outcome) => {
                    if let Some(recorder) = recorder.as_mut() {
                        recorder.record(
                            node,
                            NodeRecord {
                                input,
                                output: outcome.output.clone(),
                                performance: elapsed(started),
                                trace_data: outcome.trace_data,
                                error: None,
                            },
                        );
                    }
                    states[index] = NodeState::Done {
                        output: outcome.output,
                        active: outcome.active,
                    };
                }
                Err(error) => {
                    states[index] = NodeState::Failed;
                    tracing::warn!("Node '{}' failed: {}", node.id, error);

                    let (error, nested) = error.into_parts();
                    let Some(mut recorder) = recorder else {
                        return Err(error);
                    };

                    let trace_data = match (&node.kind, nested) {
                        (NodeKind::DecisionRef(content), Some(trace)) => TraceData::Decision {
                            key: content.key.clone(),
                            trace,
                        },
                        _ => TraceData::None,
                    };
                    recorder.record(
                        node,
                        NodeRecord {
                            input,
                            output: Value::Null,
                            performance: elapsed(started),
                            trace_data,
                            error: Some(error.to_string()),
                        },
                    );
                    return Err(EngineError::Traced {
                        source: Box::new(error),
                        trace: recorder.finish(),
                    });
                }
            }
        }

        Ok(Evaluated {
            output: collect_output(document, states),
            trace: recorder.map(TraceRecorder::finish),
        })
    }

    fn dispatch(&mut self, node: &Node, input: &Value, context: &Value) -> Result<NodeOutcome> {
        match &node.kind {
            NodeKind::Input | NodeKind::Output => Ok(NodeOutcome::value(input.clone())),

            NodeKind::Expression(content) => {
                let outcome = evaluate_expression_node(content, input, context)
                    .map_err(|e| expression_error(node, e))?;
                Ok(NodeOutcome {
                    output: outcome.output,
                    active: Vec::new(),
                    trace_data: TraceData::Expression {
                        expressions: outcome.results,
                    },
                })
            }

            NodeKind::DecisionTable(table) => {
                let outcome = evaluate_decision_table(table, input, context)
                    .map_err(|e| expression_error(node, e))?;
                Ok(NodeOutcome {
                    output: outcome.output,
                    active: Vec::new(),
                    trace_data: TraceData::DecisionTable {
                        matched_rules: outcome.matched,
                    },
                })
            }

            NodeKind::Switch(content) => {
                let active =
                    evaluate_switch(content, input, context).map_err(|e| expression_error(node, e))?;
                Ok(NodeOutcome {
                    output: input.clone(),
                    trace_data: TraceData::Switch {
                        active_statements: active.clone(),
                    },
                    active,
                })
            }

            NodeKind::DecisionRef(content) => self.evaluate_reference(node, content, input),
        }
    }

    /// Evaluate a referenced decision with `input` as its context
    fn evaluate_reference(
        &mut self,
        node: &Node,
        content: &DecisionRefContent,
        input: &Value,
    ) -> Result<NodeOutcome> {
        let key = content.key.as_str();

        if let Some(start) = self.stack.iter().position(|k| k == key) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(key.to_string());
            return Err(EngineError::CyclicReference { cycle });
        }

        let max_depth = self.engine.config.max_depth;
        if self.stack.len() >= max_depth {
            return Err(EngineError::DepthLimitExceeded {
                depth: max_depth,
                key: key.to_string(),
            });
        }

        let document = self.engine.resolve(key, Some(&node.id))?;

        self.stack.push(key.to_string());
        let result =
            GraphEvaluator::new(self.engine, self.options, &mut *self.stack).run(&document, input);
        self.stack.pop();

        let evaluated = result?;
        Ok(NodeOutcome {
            output: evaluated.output,
            active: Vec::new(),
            trace_data: match evaluated.trace {
                Some(trace) => TraceData::Decision {
                    key: key.to_string(),
                    trace,
                },
                None => TraceData::None,
            },
        })
    }
}

/// Merge the values of a node's live incoming edges.
///
/// One live edge passes its value through; several are combined into a
/// mapping keyed by edge alias or source id. `None` when no edge is live.
fn merge_inputs(document: &Document, index: usize, states: &[NodeState]) -> Option<Value> {
    let mut live = document.incoming(index).filter_map(|edge| {
        let source = document.node_index(&edge.source_id)?;
        match &states[source] {
            NodeState::Done { output, active } => {
                let taken = edge
                    .branch()
                    .map_or(true, |statement| active.iter().any(|id| id == statement));
                taken.then_some((edge.input_key(), output))
            }
            _ => None,
        }
    });

    let (first_key, first_value) = live.next()?;
    let Some((second_key, second_value)) = live.next() else {
        return Some(first_value.clone());
    };

    let mut merged = HashMap::new();
    merged.insert(first_key.to_string(), first_value.clone());
    merged.insert(second_key.to_string(), second_value.clone());
    for (key, value) in live {
        merged.insert(key.to_string(), value.clone());
    }
    Some(Value::Object(merged))
}

/// Final result: the single evaluated output node's value, a mapping keyed by
/// output node id when several ran, `null` when none did.
fn collect_output(document: &Document, mut states: Vec<NodeState>) -> Value {
    let mut outputs: Vec<(String, Value)> = document
        .outputs()
        .iter()
        .filter_map(|&index| match std::mem::replace(&mut states[index], NodeState::Pending) {
            NodeState::Done { output, .. } => Some((document.node(index).id.clone(), output)),
            _ => None,
        })
        .collect();

    match outputs.len() {
        0 => Value::Null,
        1 => outputs.pop().map(|(_, output)| output).unwrap_or_default(),
        _ => Value::Object(outputs.into_iter().collect()),
    }
}

fn expression_error(node: &Node, error: ExpressionError) -> EngineError {
    EngineError::Expression {
        node_id: node.id.clone(),
        error,
    }
}

fn elapsed(started: Option<Instant>) -> Duration {
    started.map(|s| s.elapsed()).unwrap_or_default()
}
