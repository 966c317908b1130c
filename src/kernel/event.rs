use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape of the next answer the dialog expects, sent out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AskKind {
    Generic,
    YesNo,
    Command,
    /// Nothing is expected; the session is idle.
    Null,
}

impl fmt::Display for AskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AskKind::Generic => "generic",
            AskKind::YesNo => "yesno",
            AskKind::Command => "command",
            AskKind::Null => "null",
        };
        f.write_str(s)
    }
}

/// Rich descriptor card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rdl {
    pub display_title: String,
    pub callback: String,
}

/// One message on the output channel. The closed set of kinds a delegate
/// has to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Text(String),
    Picture(String),
    Rdl(Rdl),
    Choice {
        index: usize,
        domain: String,
        title: String,
        text: String,
    },
    Link {
        title: String,
        url: String,
    },
    /// `payload` is a serialized intent, echoed back verbatim when pressed.
    Button {
        title: String,
        payload: String,
    },
    AskSpecial(AskKind),
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }

    pub fn choice(index: usize, title: impl Into<String>) -> Self {
        Message::Choice {
            index,
            domain: "choice".to_string(),
            title: title.into(),
            text: String::new(),
        }
    }

    pub fn button(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Message::Button {
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// Messages produced by one turn, in emission order.
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, text: impl Into<String>) {
        self.messages.push(Message::text(text));
    }

    pub fn ask(&mut self, kind: AskKind) {
        self.messages.push(Message::AskSpecial(kind));
    }

    pub fn link(&mut self, title: impl Into<String>, url: impl Into<String>) {
        self.messages.push(Message::Link {
            title: title.into(),
            url: url.into(),
        });
    }

    pub fn button(&mut self, title: impl Into<String>, payload: impl Into<String>) {
        self.messages.push(Message::button(title, payload));
    }

    /// Numbered choices, indices `0..n` in the given order.
    pub fn choices<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, title) in titles.into_iter().enumerate() {
            self.messages.push(Message::choice(index, title));
        }
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
