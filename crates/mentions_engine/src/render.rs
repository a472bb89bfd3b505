//! Fragment rendering and splicing.
//!
//! Every token becomes exactly one [`Fragment`]; [`render`] copies the text
//! between tokens verbatim and writes each fragment at its token's offsets.

use mentions_scanner::MentionToken;

/// CSS classes placed on rendered mentions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupClasses {
    /// Marks an element as a mention (user links and group labels).
    pub mention: String,
    /// Marks an element as a rich-text link (user links and mailto links).
    pub link: String,
}

impl Default for MarkupClasses {
    fn default() -> Self {
        Self {
            mention: "user-mention".to_string(),
            link: "op-uc-link".to_string(),
        }
    }
}

impl MarkupClasses {
    /// Builder method to set the mention class.
    #[must_use]
    pub fn with_mention(mut self, class: impl Into<String>) -> Self {
        self.mention = class.into();
        self
    }

    /// Builder method to set the link class.
    #[must_use]
    pub fn with_link(mut self, class: impl Into<String>) -> Self {
        self.link = class.into();
        self
    }
}

/// The replacement for one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// `<a class="mention link" href=.. title=..>label</a>`
    UserLink {
        /// Profile link.
        href: String,
        /// Hover title, e.g. `User Jane Doe`.
        title: String,
        /// Display name.
        label: String,
    },
    /// `<span class="mention" title=..>label</span>`
    GroupLabel {
        /// Hover title, e.g. `Group Developers`.
        title: String,
        /// Group name.
        label: String,
    },
    /// `<a class="link" href="mailto:..">address</a>`, keeping the token's
    /// sigil and quotes as plain text around it.
    MailtoLink {
        /// The `mailto:` URL.
        href: String,
        /// The literal address.
        address: String,
    },
    /// The token text, unchanged.
    Literal,
}

impl Fragment {
    /// Writes this fragment in place of `token`.
    pub fn write(
        &self,
        token: &MentionToken,
        source: &str,
        classes: &MarkupClasses,
        out: &mut String,
    ) {
        match self {
            Self::UserLink { href, title, label } => {
                out.push_str("<a class=\"");
                escape_html(&classes.mention, out);
                out.push(' ');
                escape_html(&classes.link, out);
                out.push_str("\" href=\"");
                escape_html(href, out);
                out.push_str("\" title=\"");
                escape_html(title, out);
                out.push_str("\">");
                escape_html(label, out);
                out.push_str("</a>");
            }
            Self::GroupLabel { title, label } => {
                out.push_str("<span class=\"");
                escape_html(&classes.mention, out);
                out.push_str("\" title=\"");
                escape_html(title, out);
                out.push_str("\">");
                escape_html(label, out);
                out.push_str("</span>");
            }
            Self::MailtoLink { href, address } => {
                out.push_str(token.prefix(source));
                out.push_str("<a class=\"");
                escape_html(&classes.link, out);
                out.push_str("\" href=\"");
                escape_html(href, out);
                out.push_str("\">");
                escape_html(address, out);
                out.push_str("</a>");
                out.push_str(token.suffix(source));
            }
            Self::Literal => out.push_str(token.span.text(source)),
        }
    }
}

/// Splices `fragments` into `source` at the offsets of `tokens`.
///
/// `tokens` must be sorted, disjoint, and paired one-to-one with
/// `fragments`, as produced by the scanner.
#[must_use]
pub fn render(
    source: &str,
    tokens: &[MentionToken],
    fragments: &[Fragment],
    classes: &MarkupClasses,
) -> String {
    debug_assert_eq!(tokens.len(), fragments.len());

    let mut out = String::with_capacity(source.len() + fragments.len() * 64);
    let mut cursor = 0;
    for (token, fragment) in tokens.iter().zip(fragments) {
        debug_assert!(cursor <= token.span.start);
        out.push_str(&source[cursor..token.span.start]);
        fragment.write(token, source, classes, &mut out);
        cursor = token.span.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Appends `text` with `& < > " '` escaped.
pub fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
