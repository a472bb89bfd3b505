//! Scanner for mention tokens.
//!
//! The scanner walks raw text once and yields every `user#<id>`,
//! `user:"<login or address>"`, and `group#<id>` token in offset order.
//! It is markup-aware: nothing inside an HTML tag, an `<a>`, `<code>` or
//! `<pre>` element, an HTML comment, or a backtick code span is ever a
//! token. That keeps mentions from being found inside links the surrounding
//! formatter already produced, including links this engine rendered on a
//! previous pass.

// Token prefixes are ASCII and short; column arithmetic stays in range.
#![allow(clippy::cast_possible_truncation)]

use crate::span::Span;
use crate::token::{MentionKind, MentionToken};

const USER_ID_PREFIX: &str = "user#";
const USER_QUOTED_PREFIX: &str = "user:\"";
const GROUP_ID_PREFIX: &str = "group#";

/// Elements whose bodies are never scanned.
const OPAQUE_ELEMENTS: [&str; 3] = ["a", "code", "pre"];

/// Scanner over a block of text.
///
/// Iterating the scanner yields tokens with disjoint spans sorted by start
/// offset. Scanning is a pure function of the input.
pub struct Scanner<'src> {
    /// Text being scanned.
    source: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based, in characters).
    column: u32,
}

impl<'src> Scanner<'src> {
    /// Creates a new scanner for the given text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all text and returns every token.
    #[must_use]
    pub fn scan_all(source: &str) -> Vec<MentionToken> {
        Scanner::new(source).collect()
    }

    /// Returns the next token, or `None` once the text is exhausted.
    pub fn next_token(&mut self) -> Option<MentionToken> {
        while let Some(c) = self.peek_char() {
            match c {
                '<' => {
                    if !self.skip_markup() {
                        self.advance();
                    }
                }
                '`' => self.skip_code_span(),
                'u' | 'g' if self.at_word_start() => {
                    if let Some(token) = self.scan_mention() {
                        return Some(token);
                    }
                    self.advance();
                }
                _ => self.advance(),
            }
        }
        None
    }

    /// Returns the unscanned remainder of the source.
    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances until `target`, which must be a char boundary.
    fn advance_to(&mut self, target: usize) {
        while self.position < target {
            self.advance();
        }
    }

    /// Returns true if the previous character cannot be part of a word.
    fn at_word_start(&self) -> bool {
        self.source[..self.position]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c))
    }

    /// Skips an HTML tag, comment, or opaque element starting at `<`.
    ///
    /// Returns false if the `<` does not open markup and should be treated
    /// as plain text.
    fn skip_markup(&mut self) -> bool {
        let rest = self.rest();

        if rest.starts_with("<!--") {
            let end = rest.find("-->").map_or(rest.len(), |i| i + 3);
            self.advance_to(self.position + end);
            return true;
        }

        let opens_tag = rest
            .as_bytes()
            .get(1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'/' || b == b'!');
        if !opens_tag {
            return false;
        }
        let Some(close) = rest.find('>') else {
            return false;
        };

        let tag = &rest[1..close];
        if !is_tag_body(tag) {
            return false;
        }
        let tag_end = self.position + close + 1;
        let is_closing = tag.starts_with('/');
        let is_self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();

        let mut target = tag_end;
        if !is_closing && !is_self_closing && OPAQUE_ELEMENTS.contains(&name.as_str()) {
            // An element that never closes swallows the rest of the text.
            target = find_closing_tag(&self.source[tag_end..], &name)
                .map_or(self.source.len(), |end| tag_end + end);
        }

        self.advance_to(target);
        true
    }

    /// Skips a backtick code span, or just its opening run if it is unmatched.
    fn skip_code_span(&mut self) {
        let bytes = self.source.as_bytes();
        let run = count_backticks(&bytes[self.position..]);
        let after = self.position + run;

        let mut search = after;
        while search < bytes.len() {
            if bytes[search] == b'`' {
                let len = count_backticks(&bytes[search..]);
                if len == run {
                    self.advance_to(search + len);
                    return;
                }
                search += len;
            } else {
                search += 1;
            }
        }

        self.advance_to(after);
    }

    /// Tries each token form at the current position; first match wins.
    fn scan_mention(&mut self) -> Option<MentionToken> {
        let rest = self.rest();

        if let Some(after) = rest.strip_prefix(USER_ID_PREFIX) {
            return self.scan_numeric(MentionKind::UserById, USER_ID_PREFIX.len(), after);
        }
        if let Some(after) = rest.strip_prefix(USER_QUOTED_PREFIX) {
            return self.scan_quoted(after);
        }
        if let Some(after) = rest.strip_prefix(GROUP_ID_PREFIX) {
            return self.scan_numeric(MentionKind::GroupById, GROUP_ID_PREFIX.len(), after);
        }
        None
    }

    /// Scans `<digits>` after a `#` sigil.
    fn scan_numeric(
        &mut self,
        kind: MentionKind,
        prefix_len: usize,
        after: &str,
    ) -> Option<MentionToken> {
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        if after[digits..].chars().next().is_some_and(is_word_char) {
            return None;
        }
        Some(self.emit(kind, prefix_len, digits, 0))
    }

    /// Scans `<value>"` after `user:"`.
    fn scan_quoted(&mut self, after: &str) -> Option<MentionToken> {
        let stop = after.find(['"', '<', '>', '\r', '\n'])?;
        if stop == 0 || !after[stop..].starts_with('"') {
            return None;
        }
        if after[stop + 1..].chars().next().is_some_and(is_word_char) {
            return None;
        }
        let kind = MentionKind::for_quoted(&after[..stop]);
        Some(self.emit(kind, USER_QUOTED_PREFIX.len(), stop, 1))
    }

    /// Builds a token at the current position and advances past it.
    fn emit(
        &mut self,
        kind: MentionKind,
        prefix_len: usize,
        value_len: usize,
        suffix_len: usize,
    ) -> MentionToken {
        let start = self.position;
        let value_start = start + prefix_len;
        let value_end = value_start + value_len;
        let end = value_end + suffix_len;

        let token = MentionToken {
            kind,
            span: Span::new(start, end, self.line, self.column),
            identifier: self.source[value_start..value_end].to_string(),
            identifier_span: Span::new(
                value_start,
                value_end,
                self.line,
                self.column + prefix_len as u32,
            ),
            raw: self.source[start..end].to_string(),
        };

        self.advance_to(end);
        token
    }
}

impl Iterator for Scanner<'_> {
    type Item = MentionToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Returns true for characters that continue a word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `body` (the text between `<` and `>`) reads as a tag.
///
/// Prose such as `a <b then c > d` is rejected: after the element name only
/// attributes may follow, and bare words count only next to at least one
/// `name=value` pair.
fn is_tag_body(body: &str) -> bool {
    if let Some(declaration) = body.strip_prefix('!') {
        return !declaration.contains(['<', '\n']);
    }

    let (is_closing, body) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '-')
        .unwrap_or(body.len());
    if name_len == 0 || !body.as_bytes()[0].is_ascii_alphabetic() {
        return false;
    }

    let attributes = &body[name_len..];
    if is_closing {
        return attributes.trim().is_empty();
    }
    if !attributes.is_empty()
        && !attributes.starts_with(|c: char| c.is_whitespace() || c == '/')
    {
        return false;
    }
    attributes_are_well_formed(attributes)
}

/// Checks `name[=value]` pairs separated by whitespace, with an optional
/// trailing `/`.
fn attributes_are_well_formed(attributes: &str) -> bool {
    let mut rest = attributes.trim_start();
    let mut bare = 0;
    let mut valued = 0;

    while !rest.is_empty() && rest != "/" {
        let name_len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '/' | '"' | '\'' | '<'))
            .unwrap_or(rest.len());
        if name_len == 0 {
            return false;
        }
        rest = rest[name_len..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let value = after_eq.trim_start();
            let value_len = match value.chars().next() {
                Some(quote @ ('"' | '\'')) => match value[1..].find(quote) {
                    Some(end) => end + 2,
                    None => return false,
                },
                Some(_) => value
                    .find(|c: char| c.is_whitespace() || c == '<')
                    .unwrap_or(value.len()),
                None => return false,
            };
            if value_len == 0 {
                return false;
            }
            valued += 1;
            rest = value[value_len..].trim_start();
        } else {
            bare += 1;
        }
    }

    bare == 0 || valued > 0
}

fn count_backticks(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == b'`').count()
}

/// Finds `</name>` (case-insensitive) and returns the offset just past its `>`.
fn find_closing_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let needle_len = name.len() + 2;
    let mut from = 0;

    while let Some(offset) = haystack[from..].find("</") {
        let at = from + offset;
        let candidate = bytes.get(at + 2..at + needle_len)?;
        let terminator = bytes.get(at + needle_len).copied();
        if candidate.eq_ignore_ascii_case(name.as_bytes())
            && matches!(terminator, Some(b'>' | b' ' | b'\t' | b'\n' | b'\r'))
        {
            return haystack[at..].find('>').map(|gt| at + gt + 1);
        }
        from = at + 2;
    }
    None
}
