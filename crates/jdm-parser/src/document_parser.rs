//! Decision document parser
//!
//! Turns JDM text (JSON, or YAML) into a validated [`Document`]. Every
//! expression is compiled here; syntax errors are kept on the node and only
//! reported when that node is evaluated.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use crate::raw::{
    cell_text, RawDecisionContent, RawDocument, RawEdge, RawExpressionContent, RawHitPolicy,
    RawNode, RawSwitchContent, RawTableContent,
};
use crate::unary_test::UnaryTestParser;
use jdm_core::graph::{
    CompiledExpression, DecisionRefContent, DecisionTableContent, ExpressionContent,
    ExpressionEntry, HitPolicy, RuleAssignment, RuleCondition, SwitchContent, SwitchStatement,
    TableInput, TableOutput, TableRule,
};
use jdm_core::{Document, Edge, Node, NodeKind, Value};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Decision document parser
pub struct DocumentParser;

impl DocumentParser {
    /// Parse document text. Text starting with `{` is read as JSON, anything
    /// else as YAML.
    pub fn parse(text: &str) -> Result<Document> {
        let raw: RawDocument = if text.trim_start().starts_with('{') {
            serde_json::from_str(text).map_err(|e| ParseError::MalformedDocument(e.to_string()))?
        } else {
            serde_yaml::from_str(text).map_err(|e| ParseError::MalformedDocument(e.to_string()))?
        };
        Self::build(raw)
    }

    /// Parse an already-decoded JSON document
    pub fn parse_value(value: JsonValue) -> Result<Document> {
        let raw: RawDocument =
            serde_json::from_value(value).map_err(|e| ParseError::MalformedDocument(e.to_string()))?;
        Self::build(raw)
    }

    fn build(raw: RawDocument) -> Result<Document> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(Self::build_node)
            .collect::<Result<Vec<_>>>()?;

        let switches: HashSet<&str> = nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Switch(_)))
            .map(|node| node.id.as_str())
            .collect();

        let edges = raw
            .edges
            .into_iter()
            .map(|edge| Self::build_edge(edge, &switches))
            .collect::<Vec<_>>();

        let document = Document::new(nodes, edges)?;
        log::debug!(
            "Parsed decision document: {} nodes, {} edges",
            document.nodes().len(),
            document.edges().len()
        );
        Ok(document)
    }

    fn build_edge(raw: RawEdge, switches: &HashSet<&str>) -> Edge {
        let mut edge = Edge::new(raw.id, raw.source_id, raw.target_id);
        if let Some(handle) = raw.source_handle {
            // handles on anything but a switch are UI-only
            if switches.contains(edge.source_id.as_str()) {
                edge = edge.with_branch(handle);
            }
        }
        if let Some(alias) = raw.alias.filter(|a| !a.is_empty()) {
            edge = edge.with_alias(alias);
        }
        edge
    }

    fn build_node(raw: RawNode) -> Result<Node> {
        let RawNode {
            id,
            node_type,
            name,
            content,
            rest,
        } = raw;

        let content = match content {
            Some(content) if !content.is_null() => content,
            _ => JsonValue::Object(rest),
        };

        let kind = match normalize_type(&node_type) {
            Some("inputNode") => NodeKind::Input,
            Some("outputNode") => NodeKind::Output,
            Some("expressionNode") => {
                let raw: RawExpressionContent = decode_content(&id, &node_type, content)?;
                NodeKind::Expression(build_expression_content(raw))
            }
            Some("decisionTableNode") => {
                let raw: RawTableContent = decode_content(&id, &node_type, content)?;
                NodeKind::DecisionTable(build_table_content(&id, raw)?)
            }
            Some("switchNode") => {
                let raw: RawSwitchContent = decode_content(&id, &node_type, content)?;
                NodeKind::Switch(build_switch_content(raw))
            }
            Some("decisionNode") => {
                let raw: RawDecisionContent = decode_content(&id, &node_type, content)?;
                if raw.key.trim().is_empty() {
                    return Err(ParseError::InvalidGraph(format!(
                        "decision node '{}' has an empty key",
                        id
                    )));
                }
                NodeKind::DecisionRef(DecisionRefContent { key: raw.key })
            }
            _ => {
                return Err(ParseError::InvalidGraph(format!(
                    "node '{}' has unsupported node type '{}'",
                    id, node_type
                )))
            }
        };

        let name = name.unwrap_or_else(|| id.clone());
        Ok(Node::new(id, name, kind))
    }
}

/// Canonical type name for a node type or one of its short aliases
fn normalize_type(node_type: &str) -> Option<&'static str> {
    match node_type {
        "inputNode" | "input" => Some("inputNode"),
        "outputNode" | "output" => Some("outputNode"),
        "expressionNode" | "expression" => Some("expressionNode"),
        "decisionTableNode" | "decisionTable" => Some("decisionTableNode"),
        "switchNode" | "switch" => Some("switchNode"),
        "decisionNode" | "decisionRef" => Some("decisionNode"),
        _ => None,
    }
}

fn decode_content<T: DeserializeOwned>(id: &str, node_type: &str, content: JsonValue) -> Result<T> {
    serde_json::from_value(content).map_err(|e| {
        ParseError::InvalidGraph(format!("node '{}' has invalid {} content: {}", id, node_type, e))
    })
}

fn compile(source: String) -> CompiledExpression {
    let compiled = ExpressionParser::parse(&source);
    CompiledExpression::new(source, compiled)
}

fn hit_policy(raw: RawHitPolicy) -> HitPolicy {
    match raw {
        RawHitPolicy::First => HitPolicy::First,
        RawHitPolicy::Collect => HitPolicy::Collect,
    }
}

fn build_expression_content(raw: RawExpressionContent) -> ExpressionContent {
    let expressions = raw
        .expressions
        .into_iter()
        .enumerate()
        .map(|(i, entry)| ExpressionEntry {
            id: entry.id.unwrap_or_else(|| format!("expression-{}", i)),
            key: entry.key,
            value: compile(cell_text(&entry.value)),
        })
        .collect();
    ExpressionContent { expressions }
}

fn build_table_content(node_id: &str, raw: RawTableContent) -> Result<DecisionTableContent> {
    if raw.outputs.is_empty() {
        return Err(ParseError::InvalidGraph(format!(
            "decision table '{}' has no output columns",
            node_id
        )));
    }

    let inputs: Vec<TableInput> = raw
        .inputs
        .iter()
        .map(|column| TableInput {
            id: column.id.clone(),
            name: column.name.clone().unwrap_or_default(),
            field: column
                .field
                .as_deref()
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(|field| compile(field.to_string())),
        })
        .collect();

    let outputs = raw
        .outputs
        .iter()
        .map(|column| match column.field.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => Ok(TableOutput {
                id: column.id.clone(),
                name: column.name.clone().unwrap_or_default(),
                field: field.to_string(),
            }),
            _ => Err(ParseError::InvalidGraph(format!(
                "decision table '{}' output column '{}' has no field",
                node_id, column.id
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let rules = raw
        .rules
        .iter()
        .map(|rule| {
            let conditions = raw
                .inputs
                .iter()
                .enumerate()
                .filter_map(|(index, column)| {
                    let text = rule.get(&column.id).map(cell_text)?;
                    let test = match UnaryTestParser::parse(&text) {
                        Ok(None) => return None,
                        Ok(Some(expr)) => CompiledExpression::new(text, Ok(expr)),
                        Err(err) => CompiledExpression::new(text, Err(err)),
                    };
                    Some(RuleCondition { input: index, test })
                })
                .collect();

            let assignments = raw
                .outputs
                .iter()
                .enumerate()
                .filter_map(|(index, column)| {
                    let text = rule.get(&column.id).map(cell_text)?;
                    if text.trim().is_empty() {
                        return None;
                    }
                    Some(RuleAssignment {
                        output: index,
                        value: compile(text),
                    })
                })
                .collect();

            TableRule {
                id: rule.get("_id").and_then(JsonValue::as_str).map(str::to_string),
                conditions,
                assignments,
            }
        })
        .collect();

    Ok(DecisionTableContent {
        hit_policy: hit_policy(raw.hit_policy),
        inputs,
        outputs,
        rules,
        default_output: raw.default_output.map(Value::from),
    })
}

fn build_switch_content(raw: RawSwitchContent) -> SwitchContent {
    let statements = raw
        .statements
        .into_iter()
        .map(|statement| {
            let text = cell_text(&statement.condition);
            SwitchStatement {
                id: statement.id,
                condition: if text.trim().is_empty() {
                    None
                } else {
                    Some(compile(text))
                },
            }
        })
        .collect();

    SwitchContent {
        hit_policy: hit_policy(raw.hit_policy),
        statements,
    }
}
