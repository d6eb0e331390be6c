//! Execution trace types
//!
//! A [`Trace`] maps node id to the [`TraceEntry`] recorded when that node was
//! dispatched. Entries are plain data so callers can serialize them.

use jdm_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Trace of one evaluation call, keyed by node id
pub type Trace = HashMap<String, TraceEntry>;

/// Record of a single node dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub node_id: String,
    pub name: String,
    /// Position in the dispatch sequence, starting at 0
    pub order: usize,
    pub input: Value,
    pub output: Value,
    /// Wall time spent in the node
    pub performance: Duration,
    pub trace_data: TraceData,
    /// Set when the node failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraceEntry {
    /// Compare two entries ignoring timing, including nested sub-traces
    pub fn same_as(&self, other: &TraceEntry) -> bool {
        self.node_id == other.node_id
            && self.name == other.name
            && self.order == other.order
            && self.input == other.input
            && self.output == other.output
            && self.error == other.error
            && self.trace_data.same_as(&other.trace_data)
    }
}

/// Kind-specific detail attached to a trace entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceData {
    #[default]
    None,
    /// Result of every expression, by output key
    Expression { expressions: HashMap<String, Value> },
    /// Rows that matched, in declaration order
    DecisionTable {
        #[serde(rename = "matchedRules")]
        matched_rules: Vec<MatchedRule>,
    },
    /// Statements whose branches are live
    Switch {
        #[serde(rename = "activeStatements")]
        active_statements: Vec<String>,
    },
    /// Nested evaluation of a referenced decision
    Decision { key: String, trace: Trace },
}

impl TraceData {
    fn same_as(&self, other: &TraceData) -> bool {
        match (self, other) {
            (
                TraceData::Decision { key, trace },
                TraceData::Decision {
                    key: other_key,
                    trace: other_trace,
                },
            ) => key == other_key && traces_match(trace, other_trace),
            _ => self == other,
        }
    }
}

/// A decision-table row that matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRule {
    /// Zero-based row index
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

/// Whether two traces are structurally identical aside from timing
pub fn traces_match(a: &Trace, b: &Trace) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(id, entry)| b.get(id).is_some_and(|other| entry.same_as(other)))
}
