use std::io::Write;

use super::{deliver, Delegate};
use crate::kernel::event::{AskKind, Message, Rdl};

/// Plain-text delegate: one `>> ` line per message.
#[derive(Debug, Default)]
pub struct TextDelegate {
    pub lines: Vec<String>,
}

impl TextDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered lines joined with trailing newlines, then cleared.
    pub fn take(&mut self) -> String {
        let mut out = String::new();
        for line in self.lines.drain(..) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Writes and clears the buffer.
    pub fn flush_to(&mut self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(self.take().as_bytes())?;
        writer.flush()
    }

    fn line(&mut self, text: String) {
        self.lines.push(format!(">> {}", text));
    }
}

impl Delegate for TextDelegate {
    fn send(&mut self, text: &str) {
        self.line(text.to_string());
    }

    fn send_picture(&mut self, url: &str) {
        self.line(format!("picture: {}", url));
    }

    fn send_rdl(&mut self, rdl: &Rdl) {
        self.line(format!("rdl: {} {}", rdl.display_title, rdl.callback));
    }

    fn send_choice(&mut self, index: usize, _domain: &str, title: &str, _text: &str) {
        self.line(format!("choice {}: {}", index, title));
    }

    fn send_link(&mut self, title: &str, url: &str) {
        self.line(format!("link: {} {}", title, url));
    }

    fn send_button(&mut self, title: &str, payload: &str) {
        self.line(format!("button: {} {}", title, payload));
    }

    fn send_ask_special(&mut self, kind: AskKind) {
        self.line(format!("ask special {}", kind));
    }
}

/// A turn as the text delegate would print it.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut delegate = TextDelegate::new();
    deliver(messages, &mut delegate);
    delegate.take()
}
