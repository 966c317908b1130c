use serde::{Deserialize, Serialize};

/// Where a function sits in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Trigger,
    Query,
    Action,
}

impl Role {
    /// Menu prefix used by the rule builder ("When", "Get", "Do").
    pub fn menu_title(&self) -> &'static str {
        match self {
            Role::Trigger => "When",
            Role::Query => "Get",
            Role::Action => "Do",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trigger => "trigger",
            Role::Query => "query",
            Role::Action => "action",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Date,
    Picture,
    #[serde(rename = "URL")]
    Url,
}

impl ValueType {
    /// Can an output of type `from` be bound to a slot of this type?
    pub fn accepts(&self, from: ValueType) -> bool {
        match self {
            ValueType::String => matches!(from, ValueType::String | ValueType::Picture | ValueType::Url),
            ValueType::Url => matches!(from, ValueType::Url | ValueType::Picture),
            other => *other == from,
        }
    }

    /// Comparison operators offered when filtering a field of this type.
    pub fn filter_ops(&self) -> &'static [FilterOp] {
        match self {
            ValueType::Number => &[FilterOp::Is, FilterOp::Less, FilterOp::Greater],
            ValueType::String => &[FilterOp::Is, FilterOp::Contains],
            _ => &[],
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            ValueType::String => "String",
            ValueType::Number => "Number",
            ValueType::Boolean => "Boolean",
            ValueType::Date => "Date",
            ValueType::Picture => "Picture",
            ValueType::Url => "URL",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "String" => Some(ValueType::String),
            "Number" => Some(ValueType::Number),
            "Boolean" => Some(ValueType::Boolean),
            "Date" => Some(ValueType::Date),
            "Picture" => Some(ValueType::Picture),
            "URL" => Some(ValueType::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
}

impl FilterOp {
    /// Operator as it appears on buttons, stage labels and in wire intents.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOp::Is => "is",
            FilterOp::Contains => "contains",
            FilterOp::Less => "<",
            FilterOp::Greater => ">",
        }
    }

    /// Operator as it appears in compiled program text.
    pub fn program_token(&self) -> &'static str {
        match self {
            FilterOp::Is => "=",
            FilterOp::Contains => "=~",
            FilterOp::Less => "<",
            FilterOp::Greater => ">",
        }
    }

    pub fn from_wire(op: &str) -> Option<Self> {
        match op {
            "is" | "=" | "==" => Some(FilterOp::Is),
            "contains" | "=~" => Some(FilterOp::Contains),
            "<" => Some(FilterOp::Less),
            ">" => Some(FilterOp::Greater),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ValueType,
    /// Slot question, e.g. "What do you want to tweet?".
    #[serde(default)]
    pub question: Option<String>,
}

impl ParamSchema {
    /// "picture_url" -> "picture url"
    pub fn spoken_name(&self) -> String {
        spoken(&self.name)
    }

    pub fn question(&self) -> String {
        match &self.question {
            Some(q) => q.clone(),
            None => format!("What is the {}?", self.spoken_name()),
        }
    }
}

/// Declared shape of one device function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub kind: String,
    pub name: String,
    pub role: Role,
    /// Short noun phrase for builder labels ("comic").
    pub canonical: String,
    /// Confirmation template with `$param` placeholders ("tweet $status").
    pub confirmation: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub inputs: Vec<ParamSchema>,
    #[serde(default)]
    pub outputs: Vec<ParamSchema>,
}

impl FunctionSchema {
    pub fn input(&self, name: &str) -> Option<&ParamSchema> {
        self.inputs.iter().find(|p| p.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&ParamSchema> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// "tt:xkcd.get_comic"
    pub fn qualified_id(&self) -> String {
        format!("tt:{}.{}", self.kind, self.name)
    }
}

pub(crate) fn spoken(identifier: &str) -> String {
    identifier.replace(['_', '-'], " ")
}
