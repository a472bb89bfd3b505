//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use mentions_scanner::{MentionKind, Scanner};

/// Highlighter for REPL input: commands and mention tokens.
pub struct MentionHighlighter {}

impl MentionHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with(':') {
            return Cow::Owned(highlight_command(line));
        }

        let tokens = Scanner::scan_all(line);
        if tokens.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut cursor = 0;
        for token in &tokens {
            result.push_str(&line[cursor..token.span.start]);

            let color = match token.kind {
                MentionKind::UserById => "\x1b[32m",    // green
                MentionKind::UserByLogin => "\x1b[36m", // cyan
                MentionKind::UserByEmail => "\x1b[33m", // yellow
                MentionKind::GroupById => "\x1b[35m",   // magenta
            };
            result.push_str("\x1b[1m");
            result.push_str(token.prefix(line));
            result.push_str("\x1b[0m");
            result.push_str(color);
            result.push_str(&token.identifier);
            result.push_str("\x1b[0m\x1b[1m");
            result.push_str(token.suffix(line));
            result.push_str("\x1b[0m");

            cursor = token.span.end;
        }
        result.push_str(&line[cursor..]);

        Cow::Owned(result)
    }
}

impl Default for MentionHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors the command word cyan and quoted arguments yellow.
fn highlight_command(line: &str) -> String {
    let mut result = String::with_capacity(line.len() * 2);
    let mut chars = line.chars().peekable();
    let mut in_string = false;

    // Leading whitespace and the command word
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            result.push(c);
            chars.next();
        } else {
            break;
        }
    }
    result.push_str("\x1b[36m");
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        result.push(c);
        chars.next();
    }
    result.push_str("\x1b[0m");

    for c in chars {
        if c == '"' {
            if in_string {
                result.push(c);
                result.push_str("\x1b[0m");
            } else {
                result.push_str("\x1b[33m");
                result.push(c);
            }
            in_string = !in_string;
        } else {
            result.push(c);
        }
    }
    if in_string {
        result.push_str("\x1b[0m");
    }

    result
}
