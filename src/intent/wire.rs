//! JSON shape of parsed intents, as produced by the semantic parser and
//! echoed back by buttons. Exactly one top-level key is populated per
//! message; `into_intent` enforces that and lowers the JSON into [`Intent`].

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::types::{Answer, FilterIntent, FunctionRef, Intent, IntentArg, Invocation, Special, Value};
use crate::kernel::error::DialogError;
use crate::kernel::schema::{FilterOp, Role, ValueType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<WireSpecial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<WireRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<WireInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<WireInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<WireInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<WireAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<WireFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<WireCommand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireSpecial {
    Name(String),
    Id { id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireName {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<WireInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<WireInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<WireInvocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireInvocation {
    pub name: WireName,
    #[serde(default)]
    pub args: Vec<WireArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireArg {
    pub name: WireName,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Json,
}

fn default_operator() -> String {
    "is".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireAnswer {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Json,
}

// Field order matters: buttons echo this struct verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFilter {
    #[serde(rename = "type")]
    pub ty: String,
    pub operator: String,
    pub name: String,
    #[serde(default)]
    pub value: Option<Json>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCommand {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: WireName,
}

impl WireIntent {
    pub fn from_json(json: &str) -> Result<Self, DialogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        // Plain data, serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Payload for a special button, e.g. `{"special":"tt:root.special.back"}`.
    pub fn special(special: &Special) -> Self {
        Self {
            special: Some(WireSpecial::Name(special.wire_id().to_string())),
            ..Self::default()
        }
    }

    /// Payload for a category button.
    pub fn help_category(category: &str) -> Self {
        Self {
            command: Some(WireCommand {
                ty: "help".to_string(),
                value: WireName {
                    id: format!("tt:type.{}", category),
                },
            }),
            ..Self::default()
        }
    }

    /// Payload for a filter button; the value is left for the user to fill.
    pub fn filter_template(ty: ValueType, op: FilterOp, field: &str) -> Self {
        Self {
            filter: Some(WireFilter {
                ty: ty.wire_name().to_string(),
                operator: op.label().to_string(),
                name: field.to_string(),
                value: None,
            }),
            ..Self::default()
        }
    }

    /// Payload for picking a bare function of the given role.
    pub fn invocation(role: Role, function: &FunctionRef) -> Self {
        let inv = WireInvocation {
            name: WireName {
                id: function.qualified_id(),
            },
            args: Vec::new(),
            person: None,
        };
        let mut wire = Self::default();
        match role {
            Role::Trigger => wire.trigger = Some(inv),
            Role::Query => wire.query = Some(inv),
            Role::Action => wire.action = Some(inv),
        }
        wire
    }

    pub fn into_intent(self) -> Result<Intent, DialogError> {
        let populated = [
            self.special.is_some(),
            self.rule.is_some(),
            self.trigger.is_some(),
            self.query.is_some(),
            self.action.is_some(),
            self.answer.is_some(),
            self.filter.is_some(),
            self.command.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count();
        if populated != 1 {
            return Err(DialogError::MalformedIntent(format!(
                "expected exactly one top-level key, found {}",
                populated
            )));
        }

        if let Some(special) = self.special {
            let name = match special {
                WireSpecial::Name(name) => name,
                WireSpecial::Id { id } => id,
            };
            return Special::parse(&name)
                .map(Intent::Special)
                .ok_or_else(|| DialogError::MalformedIntent(format!("unknown special {}", name)));
        }
        if let Some(rule) = self.rule {
            let trigger = rule.trigger.map(lower_invocation).transpose()?;
            let query = rule.query.map(lower_invocation).transpose()?;
            let action = rule.action.map(lower_invocation).transpose()?;
            if trigger.is_none() && query.is_none() && action.is_none() {
                return Err(DialogError::MalformedIntent("empty rule".to_string()));
            }
            return Ok(Intent::Rule { trigger, query, action });
        }
        if let Some(inv) = self.trigger {
            return Ok(Intent::Trigger(lower_invocation(inv)?));
        }
        if let Some(inv) = self.query {
            return Ok(Intent::Query(lower_invocation(inv)?));
        }
        if let Some(inv) = self.action {
            return Ok(Intent::Action(lower_invocation(inv)?));
        }
        if let Some(answer) = self.answer {
            return Ok(Intent::Answer(lower_answer(answer)?));
        }
        if let Some(filter) = self.filter {
            return Ok(Intent::Filter(lower_filter(filter)?));
        }
        match self.command {
            Some(command) if command.ty == "help" => {
                let category = command
                    .value
                    .id
                    .strip_prefix("tt:type.")
                    .unwrap_or(&command.value.id)
                    .to_string();
                Ok(Intent::Command { category })
            }
            Some(command) => Err(DialogError::MalformedIntent(format!("unknown command type {}", command.ty))),
            None => Err(DialogError::MalformedIntent("empty intent".to_string())),
        }
    }
}

fn lower_invocation(wire: WireInvocation) -> Result<Invocation, DialogError> {
    let function = FunctionRef::parse(&wire.name.id)
        .ok_or_else(|| DialogError::MalformedIntent(format!("bad function id {}", wire.name.id)))?;
    let args = wire
        .args
        .into_iter()
        .map(lower_arg)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Invocation {
        function,
        args,
        person: wire.person,
    })
}

fn lower_arg(wire: WireArg) -> Result<IntentArg, DialogError> {
    let name = strip_param(&wire.name.id).to_string();
    let operator = FilterOp::from_wire(&wire.operator)
        .ok_or_else(|| DialogError::MalformedIntent(format!("unknown operator {}", wire.operator)))?;
    let value = lower_value(&wire.ty, &wire.value)?;
    Ok(IntentArg { name, operator, value })
}

fn strip_param(id: &str) -> &str {
    id.strip_prefix("tt:param.").unwrap_or(id)
}

/// Values arrive either bare or wrapped as `{"value": ...}`.
fn unwrap_value(json: &Json) -> &Json {
    match json.get("value") {
        Some(inner) => inner,
        None => json,
    }
}

fn lower_value(ty: &str, json: &Json) -> Result<Value, DialogError> {
    let malformed = || DialogError::MalformedIntent(format!("bad {} value {}", ty, json));
    match ty {
        "VarRef" => {
            let id = json.get("id").and_then(Json::as_str).ok_or_else(malformed)?;
            if id == "tt:param.$event" || id == "$event" {
                return Ok(Value::Event);
            }
            Ok(Value::VarRef(strip_param(id).to_string()))
        }
        "Number" | "Measure" => unwrap_value(json).as_f64().map(Value::Number).ok_or_else(malformed),
        "Bool" | "Boolean" => unwrap_value(json).as_bool().map(Value::Boolean).ok_or_else(malformed),
        _ => unwrap_value(json)
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(malformed),
    }
}

fn lower_answer(wire: WireAnswer) -> Result<Answer, DialogError> {
    let malformed = || DialogError::MalformedIntent(format!("bad {} answer {}", wire.ty, wire.value));
    match wire.ty.as_str() {
        "Choice" => {
            let index = unwrap_value(&wire.value).as_u64().ok_or_else(malformed)?;
            Ok(Answer::Choice(index as usize))
        }
        "Number" => unwrap_value(&wire.value).as_f64().map(Answer::Number).ok_or_else(malformed),
        _ => unwrap_value(&wire.value)
            .as_str()
            .map(|s| Answer::String(s.to_string()))
            .ok_or_else(malformed),
    }
}

fn lower_filter(wire: WireFilter) -> Result<FilterIntent, DialogError> {
    let value_type = ValueType::from_wire(&wire.ty)
        .ok_or_else(|| DialogError::MalformedIntent(format!("unknown filter type {}", wire.ty)))?;
    let operator = FilterOp::from_wire(&wire.operator)
        .ok_or_else(|| DialogError::MalformedIntent(format!("unknown operator {}", wire.operator)))?;
    let value = match wire.value {
        None | Some(Json::Null) => None,
        Some(json) => Some(lower_value(value_type.wire_name(), &json)?),
    };
    Ok(FilterIntent {
        value_type,
        operator,
        field: wire.name,
        value,
    })
}
