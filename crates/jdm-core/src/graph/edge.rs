//! Graph edges

use serde::{Deserialize, Serialize};

/// Directed data dependency between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
    /// Key under which the source output appears when the target has several
    /// live inputs. Defaults to the source node id.
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Unconditional data flow
    Plain,
    /// Leaves a switch node; live only when the named statement is active
    Branch(String),
}

impl Edge {
    pub fn new(id: impl Into<String>, source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: EdgeKind::Plain,
            alias: None,
        }
    }

    /// Turn this edge into a switch branch for `statement_id`
    pub fn with_branch(mut self, statement_id: impl Into<String>) -> Self {
        self.kind = EdgeKind::Branch(statement_id.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Key used for this edge's value in a merged node input
    pub fn input_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.source_id)
    }

    /// Statement id for branch edges
    pub fn branch(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Plain => None,
            EdgeKind::Branch(id) => Some(id),
        }
    }
}
