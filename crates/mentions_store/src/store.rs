//! The principal lookup capability consumed by the engine.
//!
//! The engine never talks to persistence directly. Anything that can answer
//! these queries (a database adapter, a cache, the in-memory [`Directory`])
//! can back mention resolution.
//!
//! [`Directory`]: crate::Directory

use std::sync::Arc;

use mentions_foundation::{Group, PrincipalId, Result, User};

/// Read-only principal lookups.
///
/// Absence is `Ok(None)`, never an error. `Err` means the store itself
/// failed, and the engine aborts the whole formatting call on it.
pub trait PrincipalStore {
    /// Finds a user by id, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn user_by_id(&self, id: PrincipalId) -> Result<Option<User>>;

    /// Finds the user owning `address`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn user_by_email(&self, address: &str) -> Result<Option<User>>;

    /// Finds the user with `login`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn user_by_login(&self, login: &str) -> Result<Option<User>>;

    /// Finds a group by id. User ids never match.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn group_by_id(&self, id: PrincipalId) -> Result<Option<Group>>;

    /// Returns true if both principals are members of at least one common project.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn shares_project(&self, a: PrincipalId, b: PrincipalId) -> Result<bool>;
}

impl<T: PrincipalStore + ?Sized> PrincipalStore for &T {
    fn user_by_id(&self, id: PrincipalId) -> Result<Option<User>> {
        (**self).user_by_id(id)
    }

    fn user_by_email(&self, address: &str) -> Result<Option<User>> {
        (**self).user_by_email(address)
    }

    fn user_by_login(&self, login: &str) -> Result<Option<User>> {
        (**self).user_by_login(login)
    }

    fn group_by_id(&self, id: PrincipalId) -> Result<Option<Group>> {
        (**self).group_by_id(id)
    }

    fn shares_project(&self, a: PrincipalId, b: PrincipalId) -> Result<bool> {
        (**self).shares_project(a, b)
    }
}

impl<T: PrincipalStore + ?Sized> PrincipalStore for Arc<T> {
    fn user_by_id(&self, id: PrincipalId) -> Result<Option<User>> {
        (**self).user_by_id(id)
    }

    fn user_by_email(&self, address: &str) -> Result<Option<User>> {
        (**self).user_by_email(address)
    }

    fn user_by_login(&self, login: &str) -> Result<Option<User>> {
        (**self).user_by_login(login)
    }

    fn group_by_id(&self, id: PrincipalId) -> Result<Option<Group>> {
        (**self).group_by_id(id)
    }

    fn shares_project(&self, a: PrincipalId, b: PrincipalId) -> Result<bool> {
        (**self).shares_project(a, b)
    }
}
