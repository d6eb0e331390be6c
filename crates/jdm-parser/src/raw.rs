//! Serde mirror of the JDM document format
//!
//! These structs only describe the wire shape. Semantic checks and expression
//! compilation happen in [`crate::document_parser`].

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<JsonValue>,
    /// Remaining fields; used as content when `content` is absent
    #[serde(flatten)]
    pub rest: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RawHitPolicy {
    #[default]
    First,
    Collect,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExpressionContent {
    #[serde(default)]
    pub expressions: Vec<RawExpression>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExpression {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub value: JsonValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTableContent {
    #[serde(default)]
    pub hit_policy: RawHitPolicy,
    #[serde(default)]
    pub inputs: Vec<RawColumn>,
    #[serde(default)]
    pub outputs: Vec<RawColumn>,
    #[serde(default)]
    pub rules: Vec<Map<String, JsonValue>>,
    #[serde(default)]
    pub default_output: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawColumn {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSwitchContent {
    #[serde(default)]
    pub hit_policy: RawHitPolicy,
    #[serde(default)]
    pub statements: Vec<RawStatement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatement {
    pub id: String,
    #[serde(default)]
    pub condition: JsonValue,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDecisionContent {
    pub key: String,
}

/// Source text of a cell or expression. Non-string scalars keep their JSON
/// spelling so `100` and `true` work unquoted.
pub(crate) fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
