use crate::kernel::schema::{FilterOp, Role, ValueType};

/// Dotted function reference, `tt:<kind>.<function>` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    pub kind: String,
    pub channel: String,
}

impl FunctionRef {
    pub fn new(kind: &str, channel: &str) -> Self {
        Self {
            kind: kind.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Parses "tt:security-camera.new_event". The function name is the last
    /// dotted segment, so kinds may contain dots themselves.
    pub fn parse(id: &str) -> Option<Self> {
        let bare = id.strip_prefix("tt:").unwrap_or(id);
        let (kind, channel) = bare.rsplit_once('.')?;
        if kind.is_empty() || channel.is_empty() {
            return None;
        }
        Some(Self::new(kind, channel))
    }

    pub fn qualified_id(&self) -> String {
        format!("tt:{}.{}", self.kind, self.channel)
    }
}

/// Argument value carried by an intent or bound into a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Reference to an output field of an earlier stage, by field name.
    VarRef(String),
    /// The natural-language description of the triggering result.
    Event,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntentArg {
    pub name: String,
    pub operator: FilterOp,
    pub value: Value,
}

/// One trigger, query or action as requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub function: FunctionRef,
    pub args: Vec<IntentArg>,
    /// Contact whose account should run this (queries only).
    pub person: Option<String>,
}

impl Invocation {
    pub fn new(function: FunctionRef) -> Self {
        Self {
            function,
            args: Vec::new(),
            person: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Special {
    Help,
    MakeRule,
    Nevermind,
    Yes,
    No,
    Back,
    /// "Do it now": the rule has no trigger.
    Empty,
}

impl Special {
    /// Accepts both the bare name and the `tt:root.special.` form.
    pub fn parse(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("tt:root.special.").unwrap_or(name);
        match bare {
            "help" => Some(Special::Help),
            "makerule" => Some(Special::MakeRule),
            "nevermind" => Some(Special::Nevermind),
            "yes" => Some(Special::Yes),
            "no" => Some(Special::No),
            "back" => Some(Special::Back),
            "empty" => Some(Special::Empty),
            _ => None,
        }
    }

    pub fn wire_id(&self) -> &'static str {
        match self {
            Special::Help => "tt:root.special.help",
            Special::MakeRule => "tt:root.special.makerule",
            Special::Nevermind => "tt:root.special.nevermind",
            Special::Yes => "tt:root.special.yes",
            Special::No => "tt:root.special.no",
            Special::Back => "tt:root.special.back",
            Special::Empty => "tt:root.special.empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Choice(usize),
    String(String),
    Number(f64),
}

/// A filter picked from the builder's filter buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterIntent {
    pub value_type: ValueType,
    pub operator: FilterOp,
    pub field: String,
    pub value: Option<Value>,
}

/// Everything the dialog accepts in one turn. Exactly one variant per message.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Special(Special),
    Trigger(Invocation),
    Query(Invocation),
    Action(Invocation),
    Rule {
        trigger: Option<Invocation>,
        query: Option<Invocation>,
        action: Option<Invocation>,
    },
    Answer(Answer),
    Filter(FilterIntent),
    /// Category browse button (`{"command":{"type":"help",...}}`).
    Command { category: String },
}

impl Intent {
    /// Short tag for logs and error messages. Never contains user content.
    pub fn tag(&self) -> &'static str {
        match self {
            Intent::Special(_) => "special",
            Intent::Trigger(_) => "trigger",
            Intent::Query(_) => "query",
            Intent::Action(_) => "action",
            Intent::Rule { .. } => "rule",
            Intent::Answer(_) => "answer",
            Intent::Filter(_) => "filter",
            Intent::Command { .. } => "command",
        }
    }

    /// The single invocation of a Trigger/Query/Action intent with its role.
    pub fn invocation(&self) -> Option<(Role, &Invocation)> {
        match self {
            Intent::Trigger(inv) => Some((Role::Trigger, inv)),
            Intent::Query(inv) => Some((Role::Query, inv)),
            Intent::Action(inv) => Some((Role::Action, inv)),
            _ => None,
        }
    }
}
