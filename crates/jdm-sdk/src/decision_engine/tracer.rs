//! Per-node trace recording
//!
//! A recorder exists only when the caller asked for a trace. The graph
//! evaluator holds it as an `Option`, so untraced calls never read the clock
//! or copy node inputs.

use jdm_core::{Node, Value};
use jdm_runtime::{Trace, TraceData, TraceEntry};
use std::time::Duration;

#[derive(Default)]
pub(crate) struct TraceRecorder {
    entries: Trace,
    next_order: usize,
}

/// Everything recorded for one dispatched node
pub(crate) struct NodeRecord {
    pub input: Value,
    pub output: Value,
    pub performance: Duration,
    pub trace_data: TraceData,
    pub error: Option<String>,
}

impl TraceRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, node: &Node, record: NodeRecord) {
        let entry = TraceEntry {
            node_id: node.id.clone(),
            name: node.name.clone(),
            order: self.next_order,
            input: record.input,
            output: record.output,
            performance: record.performance,
            trace_data: record.trace_data,
            error: record.error,
        };
        self.next_order += 1;
        self.entries.insert(node.id.clone(), entry);
    }

    pub(crate) fn finish(self) -> Trace {
        self.entries
    }
}
