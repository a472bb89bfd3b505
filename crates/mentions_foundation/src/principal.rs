//! Principals: the users and groups a mention can point at.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a principal.
///
/// Users and groups share one id space, so a given id names at most one
/// principal of either kind.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrincipalId(u64);

impl PrincipalId {
    /// Creates a principal id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrincipalId({})", self.0)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PrincipalId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier of a project; shared project membership drives
/// membership-based visibility.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project {}", self.0)
    }
}

/// Account status of a user.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UserStatus {
    /// A regular, usable account.
    #[default]
    Active,
    /// Locked by an administrator.
    Locked,
    /// Marked for deletion.
    Deleted,
}

impl UserStatus {
    /// Parses a status name (`active`, `locked`, `deleted`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "locked" => Some(Self::Locked),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Locked => "locked",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// A user account.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct User {
    /// Principal id.
    pub id: PrincipalId,
    /// Unique login (compared case-insensitively).
    pub login: String,
    /// Human-readable name used as the mention label.
    pub display_name: String,
    /// Registered email addresses (each owned by at most one user).
    pub emails: Vec<String>,
    /// Account status.
    pub status: UserStatus,
    /// Administrators can see every user.
    pub admin: bool,
}

impl User {
    /// Creates an active, non-admin user without email addresses.
    #[must_use]
    pub fn new(id: PrincipalId, login: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            display_name: display_name.into(),
            emails: Vec::new(),
            status: UserStatus::Active,
            admin: false,
        }
    }

    /// Adds an email address.
    #[must_use]
    pub fn with_email(mut self, address: impl Into<String>) -> Self {
        self.emails.push(address.into());
        self
    }

    /// Sets the account status.
    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the user as an administrator.
    #[must_use]
    pub fn as_admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Returns true if the user may be the target of a mention.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// A group of users.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    /// Principal id.
    pub id: PrincipalId,
    /// Group name used as the mention label.
    pub name: String,
}

impl Group {
    /// Creates a group.
    #[must_use]
    pub fn new(id: PrincipalId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The kind of a principal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PrincipalKind {
    /// A user account.
    User,
    /// A group.
    Group,
}

impl PrincipalKind {
    /// Returns the label used in mention titles (`User`, `Group`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved mention target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    /// A user account.
    User(User),
    /// A group.
    Group(Group),
}

impl Principal {
    /// Returns the principal id.
    #[must_use]
    pub fn id(&self) -> PrincipalId {
        match self {
            Self::User(user) => user.id,
            Self::Group(group) => group.id,
        }
    }

    /// Returns the name shown to readers.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::User(user) => &user.display_name,
            Self::Group(group) => &group.name,
        }
    }

    /// Returns the principal kind.
    #[must_use]
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::User(_) => PrincipalKind::User,
            Self::Group(_) => PrincipalKind::Group,
        }
    }

    /// Returns the title shown on hover, e.g. `User Jane Doe`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.kind().label(), self.display_name())
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Group> for Principal {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
