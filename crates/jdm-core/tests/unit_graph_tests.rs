//! Unit tests for the graph model
//!
//! Builds documents directly from nodes and edges, without the parser.

use jdm_core::ast::Expression;
use jdm_core::graph::{CompiledExpression, ExpressionContent, ExpressionEntry};
use jdm_core::*;

fn expression_node(id: &str, key: &str, value: f64) -> Node {
    let content = ExpressionContent {
        expressions: vec![ExpressionEntry {
            id: format!("{}-0", id),
            key: key.to_string(),
            value: CompiledExpression::new(
                value.to_string(),
                Ok(Expression::literal(Value::Number(value), 0)),
            ),
        }],
    };
    Node::new(id, id, NodeKind::Expression(content))
}

fn diamond() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::new("in", "Input", NodeKind::Input),
        expression_node("left", "a", 1.0),
        expression_node("right", "b", 2.0),
        Node::new("out", "Output", NodeKind::Output),
    ];
    let edges = vec![
        Edge::new("e1", "in", "left"),
        Edge::new("e2", "in", "right"),
        Edge::new("e3", "left", "out"),
        Edge::new("e4", "right", "out").with_alias("second"),
    ];
    (nodes, edges)
}

#[test]
fn test_diamond_is_valid() {
    let (nodes, edges) = diamond();
    let doc = Document::new(nodes, edges).unwrap();

    let order: Vec<&str> = doc
        .evaluation_order()
        .iter()
        .map(|&i| doc.node(i).id.as_str())
        .collect();
    assert_eq!(order, vec!["in", "left", "right", "out"]);

    let out = doc.node_index("out").unwrap();
    let keys: Vec<&str> = doc.incoming(out).map(Edge::input_key).collect();
    assert_eq!(keys, vec!["left", "second"]);
}

#[test]
fn test_duplicate_ids_are_invalid() {
    let (mut nodes, edges) = diamond();
    nodes.push(Node::new("left", "again", NodeKind::Output));
    let err = Document::new(nodes, edges).unwrap_err();
    assert_eq!(err, CoreError::InvalidGraph("duplicate node id 'left'".to_string()));

    let (nodes, mut edges) = diamond();
    edges.push(Edge::new("e1", "left", "out"));
    assert!(Document::new(nodes, edges).is_err());
}

#[test]
fn test_output_with_outgoing_edge_is_invalid() {
    let (nodes, mut edges) = diamond();
    edges.push(Edge::new("e5", "out", "left"));
    assert!(matches!(
        Document::new(nodes, edges),
        Err(CoreError::InvalidGraph(_))
    ));
}

#[test]
fn test_input_with_incoming_edge_is_invalid() {
    let (nodes, mut edges) = diamond();
    edges.push(Edge::new("e5", "left", "in"));
    assert!(Document::new(nodes, edges).is_err());
}
