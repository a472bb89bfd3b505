//! Mention resolution.
//!
//! Maps a scanned token to a concrete principal, or determines none exists.

use mentions_foundation::{Principal, PrincipalId, Result, User};
use mentions_scanner::{MentionKind, MentionToken};
use mentions_store::PrincipalStore;

/// Result of resolving one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The token names this principal.
    Found(Principal),
    /// No principal matches, or the match may not be mentioned.
    NotFound,
}

impl Resolution {
    /// Returns true if a principal was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the resolved principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Found(principal) => Some(principal),
            Self::NotFound => None,
        }
    }
}

/// Resolves mention tokens against a principal store.
///
/// Resolution is read-only and total: every token yields `Found` or
/// `NotFound`. Only a failing store produces `Err`.
pub struct PrincipalResolver<'a, S: PrincipalStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: PrincipalStore + ?Sized> PrincipalResolver<'a, S> {
    /// Creates a resolver over the given store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolves a scanned token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn resolve(&self, token: &MentionToken) -> Result<Resolution> {
        self.resolve_identifier(token.kind, &token.identifier)
    }

    /// Resolves an identifier for a token kind.
    ///
    /// Resolution strategy:
    /// - `UserById`: exact id lookup
    /// - `UserByEmail` / `UserByLogin`: address match first, then login match
    /// - `GroupById`: exact id lookup among groups only
    ///
    /// Users that are not active never resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn resolve_identifier(&self, kind: MentionKind, identifier: &str) -> Result<Resolution> {
        match kind {
            MentionKind::UserById => self.user_by_id(identifier),
            MentionKind::UserByEmail | MentionKind::UserByLogin => self.user_by_name(identifier),
            MentionKind::GroupById => self.group_by_id(identifier),
        }
    }

    fn user_by_id(&self, digits: &str) -> Result<Resolution> {
        let Some(id) = parse_id(digits) else {
            return Ok(Resolution::NotFound);
        };
        Ok(found_if_active(self.store.user_by_id(id)?))
    }

    /// The quoted form is overloaded: try it as an address, then as a login.
    fn user_by_name(&self, value: &str) -> Result<Resolution> {
        if let Some(user) = self.store.user_by_email(value)?.filter(User::is_active) {
            return Ok(Resolution::Found(Principal::User(user)));
        }
        Ok(found_if_active(self.store.user_by_login(value)?))
    }

    fn group_by_id(&self, digits: &str) -> Result<Resolution> {
        let Some(id) = parse_id(digits) else {
            return Ok(Resolution::NotFound);
        };
        Ok(match self.store.group_by_id(id)? {
            Some(group) => Resolution::Found(Principal::Group(group)),
            None => Resolution::NotFound,
        })
    }
}

/// Parses token digits; values beyond `u64` cannot name a principal.
fn parse_id(digits: &str) -> Option<PrincipalId> {
    digits.parse::<u64>().ok().map(PrincipalId::new)
}

fn found_if_active(user: Option<User>) -> Resolution {
    match user.filter(User::is_active) {
        Some(user) => Resolution::Found(Principal::User(user)),
        None => Resolution::NotFound,
    }
}
