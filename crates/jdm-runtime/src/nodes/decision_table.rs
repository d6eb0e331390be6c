//! Decision table evaluation

use crate::engine::{Evaluator, Scope};
use crate::trace::MatchedRule;
use jdm_core::graph::{DecisionTableContent, HitPolicy, TableRule};
use jdm_core::{ExpressionError, Value};

/// Table output and the rows that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutcome {
    pub output: Value,
    pub matched: Vec<MatchedRule>,
}

/// Evaluate rows in declaration order.
///
/// `First` returns the first matching row's assignments, or the default
/// output (`null` when none is configured). `Collect` returns an array of
/// every matching row's assignments.
pub fn evaluate_decision_table(
    table: &DecisionTableContent,
    input: &Value,
    context: &Value,
) -> Result<TableOutcome, ExpressionError> {
    let scope = Scope::new(input, context);
    let mut columns = ColumnValues::new(table.inputs.len());
    let mut collected = Vec::new();
    let mut matched = Vec::new();

    for (index, rule) in table.rules.iter().enumerate() {
        if !rule_matches(table, rule, input, &scope, &mut columns)? {
            continue;
        }

        let row = assign_outputs(table, rule, &scope)?;
        matched.push(MatchedRule {
            index,
            rule_id: rule.id.clone(),
        });
        tracing::trace!("rule {} matched", index);

        if table.hit_policy == HitPolicy::First {
            return Ok(TableOutcome {
                output: row,
                matched,
            });
        }
        collected.push(row);
    }

    let output = match table.hit_policy {
        HitPolicy::First => table.default_output.clone().unwrap_or(Value::Null),
        HitPolicy::Collect => Value::Array(collected),
    };
    Ok(TableOutcome { output, matched })
}

/// Column subjects, computed on first use
struct ColumnValues {
    values: Vec<Option<Value>>,
}

impl ColumnValues {
    fn new(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    fn get(
        &mut self,
        table: &DecisionTableContent,
        column: usize,
        input: &Value,
        scope: &Scope<'_>,
    ) -> Result<&Value, ExpressionError> {
        let slot = &mut self.values[column];
        if slot.is_none() {
            // An empty field uses the whole node input
            let value = match &table.inputs[column].field {
                Some(field) => Evaluator::evaluate(field.expression()?, scope)?,
                None => input.clone(),
            };
            *slot = Some(value);
        }
        Ok(slot.get_or_insert(Value::Null))
    }
}

fn rule_matches(
    table: &DecisionTableContent,
    rule: &TableRule,
    input: &Value,
    scope: &Scope<'_>,
    columns: &mut ColumnValues,
) -> Result<bool, ExpressionError> {
    for condition in &rule.conditions {
        let subject = columns.get(table, condition.input, input, scope)?;
        let cell = scope.with_subject(subject);
        if !Evaluator::test(condition.test.expression()?, &cell)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn assign_outputs(
    table: &DecisionTableContent,
    rule: &TableRule,
    scope: &Scope<'_>,
) -> Result<Value, ExpressionError> {
    let mut row = Value::object();
    for assignment in &rule.assignments {
        let value = Evaluator::evaluate(assignment.value.expression()?, scope)?;
        row.set_path(&table.outputs[assignment.output].field, value);
    }
    Ok(row)
}
