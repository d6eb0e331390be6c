//! Graph nodes and their kind-specific content

use crate::ast::Expression;
use crate::error::ExpressionError;
use crate::types::Value;

/// A typed unit of computation in a decision graph
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// Human label, not used during evaluation
    pub name: String,
    pub kind: NodeKind,
}

/// Closed set of node kinds, each carrying its own content
#[derive(Debug, Clone)]
pub enum NodeKind {
    Input,
    Output,
    Expression(ExpressionContent),
    DecisionTable(DecisionTableContent),
    Switch(SwitchContent),
    DecisionRef(DecisionRefContent),
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input)
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output)
    }
}

impl NodeKind {
    /// Document type name of this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Input => "inputNode",
            NodeKind::Output => "outputNode",
            NodeKind::Expression(_) => "expressionNode",
            NodeKind::DecisionTable(_) => "decisionTableNode",
            NodeKind::Switch(_) => "switchNode",
            NodeKind::DecisionRef(_) => "decisionNode",
        }
    }
}

/// Expression source paired with its compilation outcome.
///
/// Syntax errors are kept rather than raised so that a document with a broken
/// expression can still be loaded; the error surfaces when the owning node
/// is evaluated.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    pub source: String,
    pub compiled: Result<Expression, ExpressionError>,
}

impl CompiledExpression {
    pub fn new(source: impl Into<String>, compiled: Result<Expression, ExpressionError>) -> Self {
        Self {
            source: source.into(),
            compiled,
        }
    }

    pub fn expression(&self) -> Result<&Expression, ExpressionError> {
        self.compiled.as_ref().map_err(Clone::clone)
    }
}

/// Row/branch selection policy for tables and switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// Stop at the first match
    #[default]
    First,
    /// Use every match, in declaration order
    Collect,
}

#[derive(Debug, Clone)]
pub struct ExpressionContent {
    pub expressions: Vec<ExpressionEntry>,
}

/// One `key = value` assignment in an expression node
#[derive(Debug, Clone)]
pub struct ExpressionEntry {
    pub id: String,
    /// Dotted output path
    pub key: String,
    pub value: CompiledExpression,
}

#[derive(Debug, Clone)]
pub struct DecisionTableContent {
    pub hit_policy: HitPolicy,
    pub inputs: Vec<TableInput>,
    pub outputs: Vec<TableOutput>,
    pub rules: Vec<TableRule>,
    /// Returned under `First` when no row matches
    pub default_output: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct TableInput {
    pub id: String,
    pub name: String,
    /// Subject expression; `None` uses the whole node input
    pub field: Option<CompiledExpression>,
}

#[derive(Debug, Clone)]
pub struct TableOutput {
    pub id: String,
    pub name: String,
    /// Dotted output path
    pub field: String,
}

#[derive(Debug, Clone)]
pub struct TableRule {
    pub id: Option<String>,
    /// Non-empty input cells, implicitly ANDed
    pub conditions: Vec<RuleCondition>,
    pub assignments: Vec<RuleAssignment>,
}

#[derive(Debug, Clone)]
pub struct RuleCondition {
    /// Index into `DecisionTableContent::inputs`
    pub input: usize,
    pub test: CompiledExpression,
}

#[derive(Debug, Clone)]
pub struct RuleAssignment {
    /// Index into `DecisionTableContent::outputs`
    pub output: usize,
    pub value: CompiledExpression,
}

#[derive(Debug, Clone)]
pub struct SwitchContent {
    pub hit_policy: HitPolicy,
    pub statements: Vec<SwitchStatement>,
}

#[derive(Debug, Clone)]
pub struct SwitchStatement {
    pub id: String,
    /// `None` for an empty condition, which always holds
    pub condition: Option<CompiledExpression>,
}

/// Reference to another decision document, resolved through the loader
#[derive(Debug, Clone)]
pub struct DecisionRefContent {
    pub key: String,
}
