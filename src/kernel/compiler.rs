//! Program text emission.
//!
//! ```text
//! AlmondGenerated() {
//!     now => @(type="xkcd",id="xkcd-6").get_comic() , v_number := number, ... => notify;
//! }
//! ```
//!
//! Deterministic for local programs. A program with a remote stage draws one
//! fresh flow token per compilation.

use super::error::DialogError;
use super::program::{Contact, Program, Stage};
use crate::intent::Value;
use crate::kernel::slots::format_number;
use crate::services::{FlowTokenGenerator, RemoteDispatch};

pub const PROGRAM_NAME: &str = "AlmondGenerated";

/// Addressing of a remote stage, produced alongside the program text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAddress {
    pub contact: Contact,
    pub token: String,
    pub kind_channel: String,
}

impl RemoteAddress {
    pub fn into_dispatch(self, description: String, program: String) -> RemoteDispatch {
        RemoteDispatch {
            principal: self.contact.principal,
            token: self.token,
            kind_channel: self.kind_channel,
            description,
            program,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    pub code: String,
    pub remote: Option<RemoteAddress>,
}

pub fn compile(program: &Program, tokens: &dyn FlowTokenGenerator) -> Result<CompiledProgram, DialogError> {
    if program.is_empty() {
        return Err(DialogError::IncompleteProgram("no stages".to_string()));
    }
    if let Some(stage) = program.stages().find(|s| !s.is_complete()) {
        return Err(DialogError::IncompleteProgram(format!(
            "{} has unresolved slots",
            stage.schema.qualified_id()
        )));
    }
    if let Some((pos, name)) = program.dangling_reference() {
        return Err(DialogError::IncompleteProgram(format!(
            "{} at {:?} refers to an output no earlier stage produces",
            name, pos
        )));
    }

    let mut remote = None;
    let mut segments = Vec::new();
    for stage in program.stages() {
        let call = match &stage.remote {
            Some(contact) => {
                let address = RemoteAddress {
                    contact: contact.clone(),
                    token: tokens.generate(),
                    kind_channel: format!("{}:{}:{}", stage.role.as_str(), stage.schema.kind, stage.schema.name),
                };
                let call = remote_receive(&address);
                remote = Some(address);
                call
            }
            None => local_call(stage)?,
        };
        segments.push(with_filters_and_bindings(call, stage));
    }

    // A remote stage leads the chain as the receiving trigger.
    let starts_with_event = program.trigger.is_some()
        || program.stages().next().map(|s| s.remote.is_some()).unwrap_or(false);
    let head = if starts_with_event { "" } else { "now => " };
    let tail = if program.action.is_some() { " ;" } else { " => notify;" };

    let code = format!("{}() {{\n    {}{}{}\n}}", PROGRAM_NAME, head, segments.join(" => "), tail);
    Ok(CompiledProgram { code, remote })
}

fn local_call(stage: &Stage) -> Result<String, DialogError> {
    let device = stage
        .device
        .as_ref()
        .ok_or_else(|| DialogError::IncompleteProgram(format!("{} has no device", stage.schema.qualified_id())))?;

    // Declaration order, not binding order.
    let args: Vec<String> = stage
        .schema
        .inputs
        .iter()
        .filter_map(|p| stage.arg(&p.name).map(|v| format!("{}={}", p.name, render_value(v))))
        .collect();

    Ok(format!(
        "@(type=\"{}\",id=\"{}\").{}({})",
        device.kind,
        device.id,
        stage.schema.name,
        args.join(", ")
    ))
}

fn remote_receive(address: &RemoteAddress) -> String {
    format!(
        "@remote.receive(__principal={}^^tt:contact({}), __token={}^^tt:flow_token, __kindChannel={}^^tt:function)",
        quote(&address.contact.principal),
        quote(&address.contact.display_name),
        quote(&address.token),
        quote(&address.kind_channel)
    )
}

/// `<call> , <field> <op> <value>, v_<out> := <out>, ...`
fn with_filters_and_bindings(call: String, stage: &Stage) -> String {
    let mut segment = call;
    for predicate in &stage.filters {
        segment.push_str(&format!(
            " , {} {} {}",
            predicate.field,
            predicate.op.program_token(),
            render_value(&predicate.value)
        ));
    }
    if !stage.outputs().is_empty() {
        let bindings: Vec<String> = stage
            .outputs()
            .iter()
            .map(|out| format!("v_{} := {}", out.name, out.name))
            .collect();
        segment.push_str(" , ");
        segment.push_str(&bindings.join(", "));
    }
    segment
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(n) => format_number(*n),
        Value::Boolean(b) => b.to_string(),
        Value::VarRef(field) => format!("v_{}", field),
        Value::Event => "$event".to_string(),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
