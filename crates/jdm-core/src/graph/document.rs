//! Validated decision graph
//!
//! Validation and topological sorting happen once, in [`Document::new`].
//! After construction a document is never mutated.

use super::edge::{Edge, EdgeKind};
use super::node::{Node, NodeKind};
use crate::error::{CoreError, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// Immutable, validated decision graph
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Node id -> index in `nodes`
    index: HashMap<String, usize>,
    /// Incoming edge indices per node, in edge declaration order
    incoming: Vec<Vec<usize>>,
    input: usize,
    outputs: Vec<usize>,
    /// Topological order of the nodes reachable from the input node
    order: Vec<usize>,
}

impl Document {
    /// Validate `nodes` and `edges` and build a document.
    ///
    /// Fails with [`CoreError::InvalidGraph`] when an id is duplicated, an edge
    /// references an unknown node, there is not exactly one input node, there
    /// is no output node, a switch branch names an unknown statement, or the
    /// graph contains a cycle.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(invalid(format!("duplicate node id '{}'", node.id)));
            }
        }

        let mut edge_ids = HashSet::with_capacity(edges.len());
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut outgoing = vec![Vec::new(); nodes.len()];

        for (i, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(invalid(format!("duplicate edge id '{}'", edge.id)));
            }
            let source = *index.get(&edge.source_id).ok_or_else(|| {
                invalid(format!(
                    "edge '{}' references unknown source node '{}'",
                    edge.id, edge.source_id
                ))
            })?;
            let target = *index.get(&edge.target_id).ok_or_else(|| {
                invalid(format!(
                    "edge '{}' references unknown target node '{}'",
                    edge.id, edge.target_id
                ))
            })?;
            validate_branch(&nodes[source], edge)?;
            outgoing[source].push(target);
            incoming[target].push(i);
        }

        let inputs: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_input()).collect();
        let input = match inputs.as_slice() {
            [single] => *single,
            [] => return Err(invalid("document has no input node")),
            _ => {
                return Err(invalid(format!(
                    "document has {} input nodes, expected exactly one",
                    inputs.len()
                )))
            }
        };
        if !incoming[input].is_empty() {
            return Err(invalid(format!(
                "input node '{}' must not have incoming edges",
                nodes[input].id
            )));
        }

        let outputs: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_output()).collect();
        if outputs.is_empty() {
            return Err(invalid("document has no output node"));
        }
        if let Some(&bad) = outputs.iter().find(|&&i| !outgoing[i].is_empty()) {
            return Err(invalid(format!(
                "output node '{}' must not have outgoing edges",
                nodes[bad].id
            )));
        }

        let sorted = topological_sort(&nodes, &incoming, &outgoing)?;
        let reachable = reachable_from(input, &outgoing);
        let order: Vec<usize> = sorted.into_iter().filter(|i| reachable.contains(i)).collect();

        for (i, node) in nodes.iter().enumerate() {
            if !reachable.contains(&i) {
                log::warn!(
                    "Node '{}' ({}) is not reachable from the input node and will never be evaluated",
                    node.id,
                    node.kind.type_name()
                );
            }
        }

        Ok(Self {
            nodes,
            edges,
            index,
            incoming,
            input,
            outputs,
            order,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Index of the input node
    pub fn input(&self) -> usize {
        self.input
    }

    /// Indices of the output nodes, in declaration order
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    /// Incoming edges of a node, in declaration order
    pub fn incoming(&self, node: usize) -> impl Iterator<Item = &Edge> {
        self.incoming[node].iter().map(move |&e| &self.edges[e])
    }

    /// Evaluation order: nodes reachable from the input, dependencies first
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Keys of every decision this document references, in node order
    pub fn referenced_keys(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::DecisionRef(content) => Some(content.key.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidGraph(message.into())
}

/// Edges leaving a switch must name one of its statements, and only switch
/// edges may carry a branch.
fn validate_branch(source: &Node, edge: &Edge) -> Result<()> {
    match (&source.kind, &edge.kind) {
        (NodeKind::Switch(content), EdgeKind::Branch(handle)) => {
            if content.statements.iter().any(|s| &s.id == handle) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "edge '{}' leaves switch '{}' through unknown statement '{}'",
                    edge.id, source.id, handle
                )))
            }
        }
        (NodeKind::Switch(_), EdgeKind::Plain) => Err(invalid(format!(
            "edge '{}' leaves switch '{}' without naming a statement",
            edge.id, source.id
        ))),
        (_, EdgeKind::Branch(_)) | (_, EdgeKind::Plain) => Ok(()),
    }
}

/// Kahn's algorithm over the whole graph, seeded in declaration order so the
/// resulting order is stable for a given document.
fn topological_sort(
    nodes: &[Node],
    incoming: &[Vec<usize>],
    outgoing: &[Vec<usize>],
) -> Result<Vec<usize>> {
    let mut in_degree: Vec<usize> = incoming.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(nodes.len());

    while let Some(node) = queue.pop_front() {
        sorted.push(node);
        for &next in &outgoing[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if sorted.len() < nodes.len() {
        let cyclic: Vec<&str> = (0..nodes.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].id.as_str())
            .collect();
        return Err(invalid(format!(
            "cycle detected among nodes [{}]",
            cyclic.join(", ")
        )));
    }

    Ok(sorted)
}

fn reachable_from(start: usize, outgoing: &[Vec<usize>]) -> HashSet<usize> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        queue.extend(outgoing[node].iter().copied().filter(|n| !visited.contains(n)));
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{DecisionRefContent, SwitchContent, SwitchStatement};
    use crate::graph::HitPolicy;

    fn input(id: &str) -> Node {
        Node::new(id, id, NodeKind::Input)
    }

    fn output(id: &str) -> Node {
        Node::new(id, id, NodeKind::Output)
    }

    fn reference(id: &str, key: &str) -> Node {
        Node::new(
            id,
            id,
            NodeKind::DecisionRef(DecisionRefContent {
                key: key.to_string(),
            }),
        )
    }

    #[test]
    fn test_two_node_document() {
        let doc = Document::new(
            vec![input("input"), output("output")],
            vec![Edge::new("e1", "input", "output")],
        )
        .unwrap();

        assert_eq!(doc.node(doc.input()).id, "input");
        assert_eq!(doc.outputs().len(), 1);
        assert_eq!(doc.evaluation_order(), &[0, 1]);
    }

    #[test]
    fn test_order_respects_dependencies() {
        // declared out of order on purpose
        let doc = Document::new(
            vec![output("out"), reference("b", "b.json"), reference("a", "a.json"), input("in")],
            vec![
                Edge::new("e1", "in", "a"),
                Edge::new("e2", "a", "b"),
                Edge::new("e3", "b", "out"),
            ],
        )
        .unwrap();

        let ids: Vec<&str> = doc
            .evaluation_order()
            .iter()
            .map(|&i| doc.node(i).id.as_str())
            .collect();
        assert_eq!(ids, vec!["in", "a", "b", "out"]);
        assert_eq!(doc.referenced_keys(), vec!["b.json", "a.json"]);
    }

    #[test]
    fn test_unknown_edge_target() {
        let err = Document::new(
            vec![input("input"), output("output")],
            vec![Edge::new("e1", "input", "missing")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown target node 'missing'"));
    }

    #[test]
    fn test_duplicate_node_id() {
        let err = Document::new(vec![input("x"), output("x")], vec![]).unwrap_err();
        assert!(err.to_string().contains("duplicate node id"));
    }

    #[test]
    fn test_input_node_count() {
        let err = Document::new(vec![output("out")], vec![]).unwrap_err();
        assert!(err.to_string().contains("no input node"));

        let err = Document::new(vec![input("a"), input("b"), output("out")], vec![]).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn test_missing_output_node() {
        let err = Document::new(vec![input("in")], vec![]).unwrap_err();
        assert!(err.to_string().contains("no output node"));
    }

    #[test]
    fn test_cycle_detected() {
        let err = Document::new(
            vec![input("in"), reference("a", "a"), reference("b", "b"), output("out")],
            vec![
                Edge::new("e1", "in", "a"),
                Edge::new("e2", "a", "b"),
                Edge::new("e3", "b", "a"),
                Edge::new("e4", "b", "out"),
            ],
        )
        .unwrap_err();
        match err {
            CoreError::InvalidGraph(message) => {
                assert!(message.contains("cycle"));
                assert!(message.contains('a') && message.contains('b'));
            }
            other => panic!("Expected InvalidGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_edges_need_known_statement() {
        let switch = Node::new(
            "sw",
            "Switch",
            NodeKind::Switch(SwitchContent {
                hit_policy: HitPolicy::First,
                statements: vec![SwitchStatement {
                    id: "s1".to_string(),
                    condition: None,
                }],
            }),
        );
        let nodes = vec![input("in"), switch, output("out")];

        let ok = Document::new(
            nodes.clone(),
            vec![
                Edge::new("e1", "in", "sw"),
                Edge::new("e2", "sw", "out").with_branch("s1"),
            ],
        );
        assert!(ok.is_ok());

        let unknown = Document::new(
            nodes.clone(),
            vec![
                Edge::new("e1", "in", "sw"),
                Edge::new("e2", "sw", "out").with_branch("s9"),
            ],
        );
        assert!(unknown.is_err());

        let plain = Document::new(
            nodes,
            vec![Edge::new("e1", "in", "sw"), Edge::new("e2", "sw", "out")],
        );
        assert!(plain.is_err());
    }

    #[test]
    fn test_unreachable_nodes_are_not_ordered() {
        let doc = Document::new(
            vec![input("in"), reference("orphan", "x"), output("out")],
            vec![Edge::new("e1", "in", "out"), Edge::new("e2", "orphan", "out")],
        )
        .unwrap();

        let ids: Vec<&str> = doc
            .evaluation_order()
            .iter()
            .map(|&i| doc.node(i).id.as_str())
            .collect();
        assert_eq!(ids, vec!["in", "out"]);
        assert_eq!(doc.incoming(2).count(), 2);
    }
}
