//! The formatting entry point.
//!
//! Pipeline per call: scan, then for each token resolve, gate and link,
//! then splice all fragments in offset order. Tokens are resolved one after
//! another on the calling thread.

use std::collections::HashMap;
use std::time::Instant;

use mentions_foundation::{Error, ErrorContext, Principal, Result};
use mentions_scanner::{MentionKind, MentionToken, Scanner};
use mentions_store::PrincipalStore;
use tracing::{debug, trace, warn};

use crate::context::RenderContext;
use crate::link::{LinkBuilder, UserPathLinks};
use crate::render::{Fragment, MarkupClasses, render};
use crate::resolver::{PrincipalResolver, Resolution};
use crate::visibility::{OpenVisibility, VisibilityPolicy};

/// Rewrites mention tokens in text into links, labels, or literal text.
///
/// # Example
///
/// ```
/// use mentions_engine::{MentionFormatter, RenderContext};
/// use mentions_foundation::{PrincipalId, User};
/// use mentions_store::Directory;
///
/// let directory = Directory::new()
///     .with_user(User::new(PrincipalId::new(1), "jdoe", "Jane Doe"))
///     .unwrap();
/// let formatter = MentionFormatter::new(directory);
/// let html = formatter
///     .format("ping user#1", &RenderContext::anonymous())
///     .unwrap();
/// assert!(html.contains("href=\"/users/1\""));
/// ```
#[derive(Clone, Debug)]
pub struct MentionFormatter<S, V = OpenVisibility, L = UserPathLinks> {
    store: S,
    visibility: V,
    links: L,
    classes: MarkupClasses,
}

impl<S: PrincipalStore> MentionFormatter<S> {
    /// Creates a formatter with open visibility and `/users/<id>` links.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            visibility: OpenVisibility,
            links: UserPathLinks::default(),
            classes: MarkupClasses::default(),
        }
    }
}

impl<S, V, L> MentionFormatter<S, V, L>
where
    S: PrincipalStore,
    V: VisibilityPolicy,
    L: LinkBuilder,
{
    /// Builder method to swap the visibility policy.
    #[must_use]
    pub fn with_visibility<V2: VisibilityPolicy>(self, visibility: V2) -> MentionFormatter<S, V2, L> {
        MentionFormatter {
            store: self.store,
            visibility,
            links: self.links,
            classes: self.classes,
        }
    }

    /// Builder method to swap the link builder.
    #[must_use]
    pub fn with_links<L2: LinkBuilder>(self, links: L2) -> MentionFormatter<S, V, L2> {
        MentionFormatter {
            store: self.store,
            visibility: self.visibility,
            links,
            classes: self.classes,
        }
    }

    /// Builder method to set the CSS classes.
    #[must_use]
    pub fn with_classes(mut self, classes: MarkupClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Formats every mention in `text` for the given context.
    ///
    /// Text without mentions is returned unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `ctx` asks for absolute links without a host
    /// - `DeadlineExceeded` if `ctx.deadline` passes before all tokens are done
    /// - the store's error, with the offending token as context, if a lookup
    ///   fails
    ///
    /// No partial output is produced on error.
    pub fn format(&self, text: &str, ctx: &RenderContext) -> Result<String> {
        let started = Instant::now();
        ctx.validate()?;

        let tokens = Scanner::scan_all(text);
        debug!(tokens = tokens.len(), bytes = text.len(), "formatting mentions");
        if tokens.is_empty() {
            ctx.check_deadline(started)?;
            return Ok(text.to_string());
        }

        let mut memo: HashMap<(MentionKind, &str), Fragment> = HashMap::new();
        let mut fragments = Vec::with_capacity(tokens.len());
        for token in &tokens {
            ctx.check_deadline(started)?;

            let key = (token.kind, token.identifier.as_str());
            if let Some(fragment) = memo.get(&key) {
                fragments.push(fragment.clone());
                continue;
            }

            let fragment = self.fragment_for(token, ctx).map_err(|e| {
                warn!(token = %token.raw, line = token.span.line, error = %e, "mention lookup failed");
                with_token_context(e, token)
            })?;
            trace!(token = %token.raw, ?fragment, "resolved mention");
            memo.insert(key, fragment.clone());
            fragments.push(fragment);
        }
        ctx.check_deadline(started)?;

        Ok(render(text, &tokens, &fragments, &self.classes))
    }

    /// Decides the replacement for a single token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn fragment_for(&self, token: &MentionToken, ctx: &RenderContext) -> Result<Fragment> {
        let resolution = PrincipalResolver::new(&self.store).resolve(token)?;
        let principal = match resolution {
            Resolution::Found(principal) => principal,
            Resolution::NotFound => return Ok(self.unresolved(token)),
        };

        match &principal {
            Principal::Group(group) => Ok(Fragment::GroupLabel {
                title: principal.title(),
                label: group.name.clone(),
            }),
            Principal::User(user) => {
                if !self.visibility.may_link(&principal, ctx.viewer, &self.store)? {
                    debug!(user = %user.id, "mention hidden from viewer");
                    return Ok(self.unresolved(token));
                }
                Ok(Fragment::UserLink {
                    href: self.links.user_url(user.id, ctx),
                    title: principal.title(),
                    label: user.display_name.clone(),
                })
            }
        }
    }

    fn unresolved(&self, token: &MentionToken) -> Fragment {
        match token.kind {
            MentionKind::UserByEmail => Fragment::MailtoLink {
                href: self.links.mailto(&token.identifier),
                address: token.identifier.clone(),
            },
            _ => Fragment::Literal,
        }
    }
}

fn with_token_context(error: Error, token: &MentionToken) -> Error {
    if error.context.is_some() {
        return error;
    }
    let context = ErrorContext::new()
        .with_source(token.raw.clone())
        .with_position(token.span.line as usize, token.span.column as usize)
        .with_frame(format!("resolving {}", token.kind));
    error.with_context(context)
}

/// Formats `text` with open visibility, `/users/<id>` links and the
/// default classes.
///
/// # Errors
///
/// See [`MentionFormatter::format`].
pub fn format_mentions<S: PrincipalStore + ?Sized>(
    text: &str,
    ctx: &RenderContext,
    store: &S,
) -> Result<String> {
    MentionFormatter::new(store).format(text, ctx)
}
