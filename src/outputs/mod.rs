//! Output channel: how a turn's messages reach the user.

pub mod realizer;
pub mod text;

use crate::kernel::event::{AskKind, Message, Rdl};

/// Renders messages for one surface. One method per message kind.
pub trait Delegate {
    fn send(&mut self, text: &str);

    fn send_picture(&mut self, url: &str);

    fn send_rdl(&mut self, rdl: &Rdl);

    fn send_choice(&mut self, index: usize, domain: &str, title: &str, text: &str);

    fn send_link(&mut self, title: &str, url: &str);

    fn send_button(&mut self, title: &str, payload: &str);

    fn send_ask_special(&mut self, kind: AskKind);
}

/// Replays a turn's messages on a delegate, in order.
pub fn deliver(messages: &[Message], delegate: &mut dyn Delegate) {
    for message in messages {
        match message {
            Message::Text(text) => delegate.send(text),
            Message::Picture(url) => delegate.send_picture(url),
            Message::Rdl(rdl) => delegate.send_rdl(rdl),
            Message::Choice { index, domain, title, text } => delegate.send_choice(*index, domain, title, text),
            Message::Link { title, url } => delegate.send_link(title, url),
            Message::Button { title, payload } => delegate.send_button(title, payload),
            Message::AskSpecial(kind) => delegate.send_ask_special(*kind),
        }
    }
}
