//! Slot filling: one unresolved parameter at a time, in declaration order,
//! stage by stage.
//!
//! Candidates for a slot are the type-compatible outputs of every earlier
//! stage (stage order, then output declaration order), then "A description
//! of the result" for text slots, then "None of above". With no compatible
//! output the slot is asked as a bare free-text question.

use super::error::DialogError;
use super::event::{AskKind, Outbox};
use super::program::{Program, StagePos};
use super::schema::{spoken, ParamSchema, ValueType};
use crate::intent::{Answer, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum SlotCandidate {
    /// Output `field` of an earlier stage of kind `source`.
    Binding { field: String, source: String },
    Description,
    NoneOfAbove,
}

impl SlotCandidate {
    pub fn title(&self) -> String {
        match self {
            SlotCandidate::Binding { field, source } => format!("Use the {} from {}", spoken(field), source),
            SlotCandidate::Description => "A description of the result".to_string(),
            SlotCandidate::NoneOfAbove => "None of above".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Filled(Value),
    /// "None of above": ask again, for a literal this time.
    AskFreeText,
}

pub struct SlotFiller;

impl SlotFiller {
    /// First unfilled parameter in program order. Stages are visited in order
    /// so a later stage is never asked before an earlier one is complete.
    pub fn next_slot(program: &Program) -> Option<(StagePos, ParamSchema)> {
        program.positions().into_iter().find_map(|pos| {
            program
                .stage(pos)
                .and_then(|stage| stage.next_unfilled())
                .map(|param| (pos, param.clone()))
        })
    }

    pub fn candidates(program: &Program, pos: StagePos, param: &ParamSchema) -> Vec<SlotCandidate> {
        let mut candidates: Vec<SlotCandidate> = program
            .stages_before(pos)
            .into_iter()
            .flat_map(|stage| {
                stage
                    .outputs()
                    .iter()
                    .filter(|out| param.ty.accepts(out.ty))
                    .map(move |out| SlotCandidate::Binding {
                        field: out.name.clone(),
                        source: stage.kind().to_string(),
                    })
            })
            .collect();

        if candidates.is_empty() {
            return candidates;
        }
        if param.ty == ValueType::String {
            candidates.push(SlotCandidate::Description);
        }
        candidates.push(SlotCandidate::NoneOfAbove);
        candidates
    }

    pub fn prompt(param: &ParamSchema, candidates: &[SlotCandidate], out: &mut Outbox) {
        out.send(param.question());
        out.ask(AskKind::Generic);
        out.choices(candidates.iter().map(SlotCandidate::title));
    }

    /// Interprets an answer for the pending slot. Leaves no trace on failure.
    pub fn accept(param: &ParamSchema, candidates: &[SlotCandidate], answer: &Answer) -> Result<SlotOutcome, DialogError> {
        match answer {
            Answer::Choice(index) => match candidates.get(*index) {
                Some(SlotCandidate::Binding { field, .. }) => Ok(SlotOutcome::Filled(Value::VarRef(field.clone()))),
                Some(SlotCandidate::Description) => Ok(SlotOutcome::Filled(Value::Event)),
                Some(SlotCandidate::NoneOfAbove) => Ok(SlotOutcome::AskFreeText),
                None => Err(DialogError::MalformedIntent(format!(
                    "choice {} out of range for {} option(s)",
                    index,
                    candidates.len()
                ))),
            },
            Answer::String(text) => coerce_literal(param.ty, text).map(SlotOutcome::Filled),
            Answer::Number(n) => match param.ty {
                ValueType::Number => Ok(SlotOutcome::Filled(Value::Number(*n))),
                ValueType::String => Ok(SlotOutcome::Filled(Value::String(format_number(*n)))),
                other => Err(DialogError::MalformedIntent(format!(
                    "a number does not fit a {} slot",
                    other.wire_name()
                ))),
            },
        }
    }
}

/// Free text into a literal of the declared type.
pub(crate) fn coerce_literal(ty: ValueType, text: &str) -> Result<Value, DialogError> {
    match ty {
        ValueType::Number => text
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| DialogError::MalformedIntent(format!("{:?} is not a number", text))),
        ValueType::Boolean => match text.trim().to_lowercase().as_str() {
            "yes" | "true" | "on" => Ok(Value::Boolean(true)),
            "no" | "false" | "off" => Ok(Value::Boolean(false)),
            _ => Err(DialogError::MalformedIntent(format!("{:?} is not yes or no", text))),
        },
        _ => Ok(Value::String(text.to_string())),
    }
}

/// Integers print without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
