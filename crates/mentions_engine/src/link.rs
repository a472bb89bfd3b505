//! Link building for mentions.

use mentions_foundation::PrincipalId;

use crate::context::{LinkMode, RenderContext};

/// Builds the URLs a rendered mention points at.
pub trait LinkBuilder {
    /// Returns the root-relative profile path for a user.
    fn user_path(&self, user: PrincipalId) -> String;

    /// Returns the profile link for a user, relative or absolute per `ctx`.
    fn user_url(&self, user: PrincipalId, ctx: &RenderContext) -> String {
        let path = self.user_path(user);
        match ctx.link_mode {
            LinkMode::OnlyPath => path,
            LinkMode::Absolute => format!(
                "{}://{}{}",
                ctx.protocol,
                ctx.host.trim().trim_end_matches('/'),
                path
            ),
        }
    }

    /// Returns the fallback link for an address no user owns.
    fn mailto(&self, address: &str) -> String {
        format!("mailto:{address}")
    }
}

/// Profile paths of the form `<prefix>/<id>`.
#[derive(Clone, Debug)]
pub struct UserPathLinks {
    prefix: String,
}

impl Default for UserPathLinks {
    fn default() -> Self {
        Self {
            prefix: "/users".to_string(),
        }
    }
}

impl UserPathLinks {
    /// Creates links under `/users`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to mount profiles elsewhere, e.g. `/people`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl LinkBuilder for UserPathLinks {
    fn user_path(&self, user: PrincipalId) -> String {
        let prefix = self.prefix.trim_end_matches('/');
        if prefix.starts_with('/') {
            format!("{prefix}/{user}")
        } else {
            format!("/{prefix}/{user}")
        }
    }
}
