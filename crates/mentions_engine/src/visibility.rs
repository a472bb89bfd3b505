//! Visibility gate: may a resolved principal be rendered as a link?
//!
//! Groups are never linked; they have no profile page. For users the
//! policy is swappable:
//!
//! - [`OpenVisibility`] links every resolved active user. This is the
//!   default and reproduces the established rendering, where a mention
//!   links the same way whether or not the reader could open the profile.
//! - [`MembershipVisibility`] only links users the viewer could actually
//!   see: themselves, anyone when the viewer is an administrator, or users
//!   sharing a project with the viewer. A hidden user renders exactly as if
//!   it did not exist.

use mentions_foundation::{Principal, PrincipalId, Result};
use mentions_store::PrincipalStore;

/// Decides whether a principal may be linked for a viewer.
pub trait VisibilityPolicy {
    /// Returns true if `principal` may be rendered as a link for `viewer`
    /// (`None` is an anonymous reader).
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn may_link(
        &self,
        principal: &Principal,
        viewer: Option<PrincipalId>,
        store: &dyn PrincipalStore,
    ) -> Result<bool>;
}

/// Links every resolved user.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenVisibility;

impl VisibilityPolicy for OpenVisibility {
    fn may_link(
        &self,
        principal: &Principal,
        _viewer: Option<PrincipalId>,
        _store: &dyn PrincipalStore,
    ) -> Result<bool> {
        Ok(matches!(principal, Principal::User(_)))
    }
}

/// Links only users the viewer can see.
#[derive(Clone, Copy, Debug, Default)]
pub struct MembershipVisibility;

impl VisibilityPolicy for MembershipVisibility {
    fn may_link(
        &self,
        principal: &Principal,
        viewer: Option<PrincipalId>,
        store: &dyn PrincipalStore,
    ) -> Result<bool> {
        let Principal::User(user) = principal else {
            return Ok(false);
        };
        let Some(viewer) = viewer else {
            return Ok(false);
        };
        if viewer == user.id {
            return Ok(true);
        }
        let viewer_is_admin = store
            .user_by_id(viewer)?
            .is_some_and(|v| v.admin && v.is_active());
        if viewer_is_admin {
            return Ok(true);
        }
        store.shares_project(viewer, user.id)
    }
}

/// Runtime-selectable policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityMode {
    /// See [`OpenVisibility`].
    #[default]
    Open,
    /// See [`MembershipVisibility`].
    Membership,
}

impl VisibilityMode {
    /// Parses a mode name (`open`, `membership`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "membership" | "strict" => Some(Self::Membership),
            _ => None,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Membership => "membership",
        }
    }
}

impl VisibilityPolicy for VisibilityMode {
    fn may_link(
        &self,
        principal: &Principal,
        viewer: Option<PrincipalId>,
        store: &dyn PrincipalStore,
    ) -> Result<bool> {
        match self {
            Self::Open => OpenVisibility.may_link(principal, viewer, store),
            Self::Membership => MembershipVisibility.may_link(principal, viewer, store),
        }
    }
}
