use super::error::DialogError;
use super::event::{AskKind, Outbox};
use super::program::{Predicate, Program, Stage, StagePos};
use super::schema::{FilterOp, ValueType};
use super::slots::{coerce_literal, format_number};
use crate::intent::{Answer, FilterIntent, Special, Value, WireIntent};
use crate::outputs::realizer;

/// Three-step subflow: pick a stage, pick (field, operator), type a value.
pub struct FilterBuilder;

impl FilterBuilder {
    /// Stages with outputs to filter on: the trigger and the queries.
    pub fn targets(program: &Program) -> Vec<StagePos> {
        program
            .positions()
            .into_iter()
            .filter(|pos| *pos != StagePos::Action)
            .collect()
    }

    pub fn prompt_target(program: &Program, targets: &[StagePos], out: &mut Outbox) {
        out.send("Pick the command you want to add filters to:");
        out.ask(AskKind::Generic);
        let labels = targets
            .iter()
            .filter_map(|pos| program.stage(*pos))
            .map(realizer::menu_label)
            .chain(std::iter::once("Back".to_string()));
        out.choices(labels);
    }

    /// `Ok(None)` is "Back".
    pub fn choose_target(targets: &[StagePos], index: usize) -> Result<Option<StagePos>, DialogError> {
        if index == targets.len() {
            return Ok(None);
        }
        targets.get(index).copied().map(Some).ok_or_else(|| {
            DialogError::MalformedIntent(format!("choice {} out of range for {} option(s)", index, targets.len() + 1))
        })
    }

    /// Every valid (field, operator) pair, in output declaration order.
    pub fn options(stage: &Stage) -> Vec<(String, ValueType, FilterOp)> {
        stage
            .outputs()
            .iter()
            .flat_map(|field| field.ty.filter_ops().iter().map(move |op| (field.name.clone(), field.ty, *op)))
            .collect()
    }

    pub fn prompt_spec(stage: &Stage, out: &mut Outbox) {
        out.send("Pick the filter you want to add:");
        out.ask(AskKind::Command);
        for (field, ty, op) in Self::options(stage) {
            out.button(
                format!("{} {} ____", field, op.label()),
                WireIntent::filter_template(ty, op, &field).to_json(),
            );
        }
        out.button("Back", WireIntent::special(&Special::Back).to_json());
    }

    /// Only combinations that were offered are accepted.
    pub fn accept_spec(stage: &Stage, filter: &FilterIntent) -> Result<(String, ValueType, FilterOp), DialogError> {
        Self::options(stage)
            .into_iter()
            .find(|(field, ty, op)| *field == filter.field && *ty == filter.value_type && *op == filter.operator)
            .ok_or_else(|| {
                DialogError::MalformedIntent(format!(
                    "filter {} {} is not available on {}",
                    filter.field,
                    filter.operator.label(),
                    stage.schema.qualified_id()
                ))
            })
    }

    pub fn prompt_value(out: &mut Outbox) {
        out.send("What's the value of this filter?");
        out.ask(AskKind::Generic);
    }

    pub fn accept_value(ty: ValueType, answer: &Answer) -> Result<Value, DialogError> {
        match answer {
            Answer::String(text) => coerce_literal(ty, text),
            Answer::Number(n) if ty == ValueType::Number => Ok(Value::Number(*n)),
            Answer::Number(n) => Ok(Value::String(format_number(*n))),
            Answer::Choice(_) => Err(DialogError::MalformedIntent("a filter value cannot be a choice".to_string())),
        }
    }

    pub fn predicate(field: String, op: FilterOp, value: Value) -> Predicate {
        Predicate { field, op, value }
    }
}
