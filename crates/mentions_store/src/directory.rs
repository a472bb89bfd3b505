//! In-memory principal directory with immutable snapshots.
//!
//! The `Directory` uses persistent data structures for O(1) cloning and
//! structural sharing: every update returns a new directory and leaves the
//! original untouched, so a formatting call can hold a consistent snapshot
//! while another thread prepares the next one.

use im::{HashMap, OrdMap, OrdSet};
use mentions_foundation::{
    Error, ErrorKind, Group, PrincipalId, ProjectId, Result, User, UserStatus,
};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::PrincipalStore;

/// Users, groups, lookup indices, and project memberships.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Directory {
    users: OrdMap<PrincipalId, User>,
    groups: OrdMap<PrincipalId, Group>,
    /// Lowercased login -> user.
    logins: HashMap<String, PrincipalId>,
    /// Lowercased email address -> user.
    emails: HashMap<String, PrincipalId>,
    memberships: OrdMap<PrincipalId, OrdSet<ProjectId>>,
}

/// Normalizes a login or address for case-insensitive comparison.
fn fold(key: &str) -> String {
    key.to_lowercase()
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any principal uses this id.
    #[must_use]
    pub fn contains(&self, id: PrincipalId) -> bool {
        self.users.contains_key(&id) || self.groups.contains_key(&id)
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken by any principal, or if the login
    /// or one of the addresses already belongs to another user.
    pub fn with_user(&self, user: User) -> Result<Self> {
        if self.contains(user.id) {
            return Err(Error::new(ErrorKind::DuplicatePrincipal(user.id)));
        }

        let login = fold(&user.login);
        if self.logins.contains_key(&login) {
            return Err(Error::new(ErrorKind::DuplicateLogin(user.login.clone())));
        }

        let mut addresses: Vec<String> = Vec::with_capacity(user.emails.len());
        for address in &user.emails {
            let folded = fold(address);
            if self.emails.contains_key(&folded) {
                return Err(Error::new(ErrorKind::DuplicateEmail(address.clone())));
            }
            if !addresses.contains(&folded) {
                addresses.push(folded);
            }
        }

        debug!(id = %user.id, login = %user.login, "registering user");

        let mut next = self.clone();
        next.logins.insert(login, user.id);
        for folded in addresses {
            next.emails.insert(folded, user.id);
        }
        next.users.insert(user.id, user);
        Ok(next)
    }

    /// Registers a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken by any principal.
    pub fn with_group(&self, group: Group) -> Result<Self> {
        if self.contains(group.id) {
            return Err(Error::new(ErrorKind::DuplicatePrincipal(group.id)));
        }

        debug!(id = %group.id, name = %group.name, "registering group");

        let mut next = self.clone();
        next.groups.insert(group.id, group);
        Ok(next)
    }

    /// Adds a principal (user or group) to a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal does not exist.
    pub fn with_membership(&self, principal: PrincipalId, project: ProjectId) -> Result<Self> {
        if !self.contains(principal) {
            return Err(Error::unknown_principal(principal));
        }

        let mut projects = self.memberships.get(&principal).cloned().unwrap_or_default();
        projects.insert(project);

        let mut next = self.clone();
        next.memberships.insert(principal, projects);
        Ok(next)
    }

    /// Changes a user's account status.
    ///
    /// # Errors
    ///
    /// Returns an error if no user has this id.
    pub fn with_user_status(&self, id: PrincipalId, status: UserStatus) -> Result<Self> {
        let Some(user) = self.users.get(&id) else {
            return Err(Error::unknown_principal(id));
        };

        let mut next = self.clone();
        next.users.insert(id, user.clone().with_status(status));
        Ok(next)
    }

    /// Grants or revokes administrator rights.
    ///
    /// # Errors
    ///
    /// Returns an error if no user has this id.
    pub fn with_admin(&self, id: PrincipalId, admin: bool) -> Result<Self> {
        let Some(user) = self.users.get(&id) else {
            return Err(Error::unknown_principal(id));
        };

        let mut updated = user.clone();
        updated.admin = admin;
        let mut next = self.clone();
        next.users.insert(id, updated);
        Ok(next)
    }

    /// Returns the user with this id.
    #[must_use]
    pub fn user(&self, id: PrincipalId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Returns the group with this id.
    #[must_use]
    pub fn group(&self, id: PrincipalId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Iterates over users in id order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Iterates over groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Returns the number of users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the projects a principal belongs to, in id order.
    #[must_use]
    pub fn projects_of(&self, principal: PrincipalId) -> Vec<ProjectId> {
        self.memberships
            .get(&principal)
            .map(|projects| projects.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl PrincipalStore for Directory {
    fn user_by_id(&self, id: PrincipalId) -> Result<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn user_by_email(&self, address: &str) -> Result<Option<User>> {
        Ok(self
            .emails
            .get(&fold(address))
            .and_then(|id| self.users.get(id))
            .cloned())
    }

    fn user_by_login(&self, login: &str) -> Result<Option<User>> {
        Ok(self
            .logins
            .get(&fold(login))
            .and_then(|id| self.users.get(id))
            .cloned())
    }

    fn group_by_id(&self, id: PrincipalId) -> Result<Option<Group>> {
        Ok(self.groups.get(&id).cloned())
    }

    fn shares_project(&self, a: PrincipalId, b: PrincipalId) -> Result<bool> {
        let (Some(left), Some(right)) = (self.memberships.get(&a), self.memberships.get(&b)) else {
            return Ok(false);
        };
        Ok(left.iter().any(|project| right.contains(project)))
    }
}
