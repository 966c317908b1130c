//! Natural-language realization of stages and programs.
//!
//! PURE FUNCTIONS: no state, no I/O. Used for builder labels, confirmation
//! prompts and the remote-dispatch notice.

use crate::intent::Value;
use crate::kernel::program::{Predicate, Program, Stage};
use crate::kernel::schema::{spoken, FilterOp};
use crate::kernel::slots::format_number;

/// How a value reads inside a sentence: literals quoted, bindings by field name.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => format_number(*n),
        Value::Boolean(true) => "yes".to_string(),
        Value::Boolean(false) => "no".to_string(),
        Value::VarRef(field) => spoken(field),
        Value::Event => "the result".to_string(),
    }
}

/// Value as typed by the user, for compact labels.
fn bare_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => describe_value(other),
    }
}

fn describe_predicate(predicate: &Predicate) -> String {
    let op = match predicate.op {
        FilterOp::Is => "is",
        FilterOp::Contains => "contains",
        FilterOp::Less => "is less than",
        FilterOp::Greater => "is greater than",
    };
    format!("{} {} {}", spoken(&predicate.field), op, describe_value(&predicate.value))
}

/// "<field> <op> <value>", as shown on builder labels.
pub fn predicate_label(predicate: &Predicate) -> String {
    format!("{} {} {}", predicate.field, predicate.op.label(), bare_value(&predicate.value))
}

/// The stage's confirmation phrase with its arguments substituted, without
/// the remote suffix. Arguments the template does not mention are appended
/// as "and <name> is <value>"; filters as "if ... and ...".
pub fn describe_local(stage: &Stage) -> String {
    let mut params: Vec<&str> = stage.schema.inputs.iter().map(|p| p.name.as_str()).collect();
    // Longest first, so "$picture_url" is not eaten by a "$picture" placeholder.
    params.sort_by_key(|p| std::cmp::Reverse(p.len()));

    let mut text = stage.schema.confirmation.clone();
    let mut mentioned = Vec::new();
    for name in params {
        let placeholder = format!("${}", name);
        if text.contains(&placeholder) {
            let rendered = stage.arg(name).map(describe_value).unwrap_or_else(|| "____".to_string());
            text = text.replace(&placeholder, &rendered);
            mentioned.push(name);
        }
    }

    for param in &stage.schema.inputs {
        if mentioned.contains(&param.name.as_str()) {
            continue;
        }
        if let Some(value) = stage.arg(&param.name) {
            text.push_str(&format!(" and {} is {}", param.spoken_name(), describe_value(value)));
        }
    }

    if !stage.filters.is_empty() {
        let filters: Vec<String> = stage.filters.iter().map(describe_predicate).collect();
        text.push_str(&format!(" if {}", filters.join(" and ")));
    }
    text
}

pub fn describe_stage(stage: &Stage, assistant_name: &str) -> String {
    let local = describe_local(stage);
    match &stage.remote {
        Some(contact) => format!("{} using {} of {}", local, assistant_name, contact.display_name),
        None => local,
    }
}

/// Whole rule in one sentence: "<queries> then <action> when <trigger>".
pub fn summarize(program: &Program, assistant_name: &str) -> String {
    let body: Vec<String> = program
        .queries
        .iter()
        .chain(program.action.iter())
        .map(|s| describe_stage(s, assistant_name))
        .collect();
    let body = body.join(" then ");

    match &program.trigger {
        Some(trigger) if body.is_empty() => format!("notify you when {}", describe_stage(trigger, assistant_name)),
        Some(trigger) => format!("{} when {}", body, describe_stage(trigger, assistant_name)),
        None => body,
    }
}

pub fn confirmation(program: &Program, assistant_name: &str) -> String {
    format!("Ok, so you want me to {}. Is that right?", summarize(program, assistant_name))
}

/// "comic on xkcd, title contains lol"
pub fn stage_label(stage: &Stage) -> String {
    let mut label = format!("{} on {}", stage.schema.canonical, spoken(stage.kind()));
    for predicate in &stage.filters {
        label.push_str(", ");
        label.push_str(&predicate_label(predicate));
    }
    label
}

/// "Get: comic on xkcd"
pub fn menu_label(stage: &Stage) -> String {
    format!("{}: {}", stage.role.menu_title(), stage_label(stage))
}
