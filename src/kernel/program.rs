//! Resolved program IR: stages bound to devices and arguments, assembled into
//! a trigger / queries / action chain. The shape of [`Program`] enforces the
//! ordering invariant (at most one trigger, first; at most one action, last).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::DialogError;
use super::schema::{FilterOp, FunctionSchema, ParamSchema, Role, ValueType};
use crate::intent::{Invocation, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub kind: String,
    pub id: String,
    pub display_label: String,
}

/// A remote collaborator, addressable for delegated execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub principal: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub role: Role,
    pub schema: Arc<FunctionSchema>,
    pub device: Option<DeviceDescriptor>,
    pub remote: Option<Contact>,
    /// Filled arguments, in the order they were bound.
    pub args: Vec<(String, Value)>,
    /// Conjunctive filters, in attachment order.
    pub filters: Vec<Predicate>,
}

impl Stage {
    pub fn new(role: Role, schema: Arc<FunctionSchema>) -> Self {
        Self {
            role,
            schema,
            device: None,
            remote: None,
            args: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Builds a stage from an intent's explicit arguments. `is` arguments on
    /// declared inputs fill slots; any other argument on a trigger/query output
    /// field becomes a filter.
    pub fn from_invocation(role: Role, schema: Arc<FunctionSchema>, inv: &Invocation) -> Result<Self, DialogError> {
        let mut stage = Stage::new(role, schema);
        for arg in &inv.args {
            if stage.schema.input(&arg.name).is_some() && arg.operator == FilterOp::Is {
                stage.bind(&arg.name, arg.value.clone());
                continue;
            }
            let output = if role == Role::Action { None } else { stage.schema.output(&arg.name) };
            match output {
                Some(field) if field.ty.filter_ops().contains(&arg.operator) => stage.filters.push(Predicate {
                    field: arg.name.clone(),
                    op: arg.operator,
                    value: arg.value.clone(),
                }),
                _ => {
                    return Err(DialogError::MalformedIntent(format!(
                        "{} has no parameter {} accepting operator {}",
                        stage.schema.qualified_id(),
                        arg.name,
                        arg.operator.label()
                    )))
                }
            }
        }
        Ok(stage)
    }

    pub fn kind(&self) -> &str {
        &self.schema.kind
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn bind(&mut self, name: &str, value: Value) {
        match self.args.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.args.push((name.to_string(), value)),
        }
    }

    /// Remote stages are resolved on the collaborator's side.
    pub fn needs_device(&self) -> bool {
        self.remote.is_none() && self.device.is_none()
    }

    /// First declared input without a value, in declaration order.
    pub fn next_unfilled(&self) -> Option<&ParamSchema> {
        self.schema.inputs.iter().find(|p| self.arg(&p.name).is_none())
    }

    pub fn is_complete(&self) -> bool {
        !self.needs_device() && self.next_unfilled().is_none()
    }

    pub fn outputs(&self) -> &[ParamSchema] {
        &self.schema.outputs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePos {
    Trigger,
    Query(usize),
    Action,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub trigger: Option<Stage>,
    pub queries: Vec<Stage>,
    pub action: Option<Stage>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.trigger.is_none() && self.queries.is_empty() && self.action.is_none()
    }

    /// Stage positions in program order.
    pub fn positions(&self) -> Vec<StagePos> {
        let mut positions = Vec::new();
        if self.trigger.is_some() {
            positions.push(StagePos::Trigger);
        }
        positions.extend((0..self.queries.len()).map(StagePos::Query));
        if self.action.is_some() {
            positions.push(StagePos::Action);
        }
        positions
    }

    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.trigger.iter().chain(self.queries.iter()).chain(self.action.iter())
    }

    pub fn stage(&self, pos: StagePos) -> Option<&Stage> {
        match pos {
            StagePos::Trigger => self.trigger.as_ref(),
            StagePos::Query(i) => self.queries.get(i),
            StagePos::Action => self.action.as_ref(),
        }
    }

    pub fn stage_mut(&mut self, pos: StagePos) -> Option<&mut Stage> {
        match pos {
            StagePos::Trigger => self.trigger.as_mut(),
            StagePos::Query(i) => self.queries.get_mut(i),
            StagePos::Action => self.action.as_mut(),
        }
    }

    /// Places a stage by its role. A trigger or action replaces the existing
    /// one; queries accumulate.
    pub fn push(&mut self, stage: Stage) {
        match stage.role {
            Role::Trigger => self.trigger = Some(stage),
            Role::Query => self.queries.push(stage),
            Role::Action => self.action = Some(stage),
        }
    }

    /// Stages strictly before `pos`, in program order.
    pub fn stages_before(&self, pos: StagePos) -> Vec<&Stage> {
        self.positions()
            .into_iter()
            .take_while(|p| *p != pos)
            .filter_map(|p| self.stage(p))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.stages().all(Stage::is_complete)
    }

    /// Can `value`, used where a `ty` is expected at `pos`, be computed from
    /// what the stages before `pos` produce? Literals always can.
    pub fn resolves(&self, pos: StagePos, ty: ValueType, value: &Value) -> bool {
        let earlier = self.stages_before(pos);
        match value {
            Value::VarRef(field) => earlier
                .iter()
                .any(|stage| stage.schema.output(field).map_or(false, |out| ty.accepts(out.ty))),
            Value::Event => ty == ValueType::String && !earlier.is_empty(),
            _ => true,
        }
    }

    /// First argument or filter value at `pos` that no earlier output backs.
    pub fn dangling_at(&self, pos: StagePos) -> Option<String> {
        let stage = self.stage(pos)?;
        let arg = stage.args.iter().find_map(|(name, value)| {
            let ty = stage.schema.input(name)?.ty;
            (!self.resolves(pos, ty, value)).then(|| name.clone())
        });
        arg.or_else(|| {
            stage.filters.iter().find_map(|predicate| {
                let ty = stage.schema.output(&predicate.field)?.ty;
                (!self.resolves(pos, ty, &predicate.value)).then(|| predicate.field.clone())
            })
        })
    }

    /// First dangling reference in program order, with the stage it sits on.
    pub fn dangling_reference(&self) -> Option<(StagePos, String)> {
        self.positions()
            .into_iter()
            .find_map(|pos| self.dangling_at(pos).map(|name| (pos, name)))
    }

    /// Drops bindings and filters whose source stage is gone. The slot is
    /// asked again when the rule runs.
    pub fn unbind_dangling(&mut self) {
        let before = self.clone();
        for pos in self.positions() {
            let Some(stage) = self.stage_mut(pos) else { continue };
            let schema = stage.schema.clone();
            stage.args.retain(|(name, value)| match schema.input(name) {
                Some(param) => before.resolves(pos, param.ty, value),
                None => true,
            });
            stage.filters.retain(|predicate| match schema.output(&predicate.field) {
                Some(field) => before.resolves(pos, field.ty, &predicate.value),
                None => true,
            });
        }
    }

    pub fn remote_stage(&self) -> Option<&Stage> {
        self.stages().find(|s| s.remote.is_some())
    }

    /// Only local queries: nothing triggers, nothing acts, nobody else runs it.
    pub fn is_local_query_only(&self) -> bool {
        self.trigger.is_none() && self.action.is_none() && !self.queries.is_empty() && self.remote_stage().is_none()
    }
}
