//! Per-call render configuration.

use std::time::{Duration, Instant};

use mentions_foundation::{Error, PrincipalId, Result};

/// Whether user links are root-relative paths or absolute URLs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkMode {
    /// `/users/42`
    #[default]
    OnlyPath,
    /// `http://host/users/42`
    Absolute,
}

/// Everything a single formatting call needs to know about its reader and
/// link shape. Read-only during processing.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// The acting viewer; `None` is an anonymous reader.
    pub viewer: Option<PrincipalId>,
    /// Relative or absolute user links.
    pub link_mode: LinkMode,
    /// Host (optionally with port) used for absolute links.
    pub host: String,
    /// URL scheme used for absolute links.
    pub protocol: String,
    /// Formatting fails with no output once this instant passes.
    pub deadline: Option<Instant>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            viewer: None,
            link_mode: LinkMode::OnlyPath,
            host: String::new(),
            protocol: "http".to_string(),
            deadline: None,
        }
    }
}

impl RenderContext {
    /// Creates a context for an anonymous reader with relative links.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a context for the given viewer with relative links.
    #[must_use]
    pub fn for_viewer(viewer: PrincipalId) -> Self {
        Self {
            viewer: Some(viewer),
            ..Self::default()
        }
    }

    /// Builder method to set the viewer.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Option<PrincipalId>) -> Self {
        self.viewer = viewer;
        self
    }

    /// Builder method mirroring the `only_path` option: `false` switches
    /// user links to absolute URLs on the configured host.
    #[must_use]
    pub fn with_only_path(mut self, only_path: bool) -> Self {
        self.link_mode = if only_path {
            LinkMode::OnlyPath
        } else {
            LinkMode::Absolute
        };
        self
    }

    /// Builder method to set the host for absolute links.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder method to set the scheme for absolute links.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Builder method to set an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builder method to set a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns true if user links are root-relative.
    #[must_use]
    pub fn is_only_path(&self) -> bool {
        self.link_mode == LinkMode::OnlyPath
    }

    /// Checks that absolute links can be built.
    ///
    /// # Errors
    ///
    /// Returns an error if absolute links are requested without a host, or
    /// if the protocol is not a valid URL scheme.
    pub fn validate(&self) -> Result<()> {
        if self.link_mode == LinkMode::Absolute && self.host.trim().is_empty() {
            return Err(Error::invalid_config("absolute links require a host"));
        }
        let scheme_ok = self
            .protocol
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self
                .protocol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok {
            return Err(Error::invalid_config(format!(
                "invalid link protocol: {:?}",
                self.protocol
            )));
        }
        Ok(())
    }

    /// Fails once the deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns `DeadlineExceeded` with the budget measured from `started`.
    pub fn check_deadline(&self, started: Instant) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::deadline_exceeded(
                deadline.saturating_duration_since(started).as_millis(),
            )),
            _ => Ok(()),
        }
    }
}
