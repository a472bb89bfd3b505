//! Session state for the REPL.
//!
//! The session holds the current principal directory, the render context
//! mentions are formatted for, and the active visibility policy.

use std::path::{Path, PathBuf};

use mentions_engine::{MentionFormatter, RenderContext, VisibilityMode};
use mentions_foundation::{Error, Group, PrincipalId, ProjectId, Result, User, UserStatus};
use mentions_store::Directory;

use crate::serialize;

/// Session state for an interactive REPL session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// The current principal directory.
    directory: Directory,

    /// Viewer and link options used when formatting.
    context: RenderContext,

    /// Which visibility policy gates user links.
    visibility: VisibilityMode,

    /// Where the directory was last loaded from or saved to.
    snapshot_path: Option<PathBuf>,
}

impl Session {
    /// Creates a new session with an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new session over the given directory.
    #[must_use]
    pub fn with_directory(directory: Directory) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    /// Returns the current directory.
    #[must_use]
    pub const fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Replaces the current directory.
    pub fn set_directory(&mut self, directory: Directory) {
        self.directory = directory;
    }

    /// Returns the render context.
    #[must_use]
    pub const fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Replaces the render context.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot produce links.
    pub fn set_context(&mut self, context: RenderContext) -> Result<()> {
        context.validate()?;
        self.context = context;
        Ok(())
    }

    /// Returns the visibility policy.
    #[must_use]
    pub const fn visibility(&self) -> VisibilityMode {
        self.visibility
    }

    /// Sets the visibility policy.
    pub fn set_visibility(&mut self, visibility: VisibilityMode) {
        self.visibility = visibility;
    }

    /// Returns the last snapshot path, if any.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Sets the acting viewer. The viewer must be a known user.
    ///
    /// # Errors
    ///
    /// Returns an error if no user has this id.
    pub fn set_viewer(&mut self, viewer: Option<PrincipalId>) -> Result<()> {
        if let Some(id) = viewer {
            if self.directory.user(id).is_none() {
                return Err(Error::unknown_principal(id));
            }
        }
        self.context.viewer = viewer;
        Ok(())
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, login or an address is taken.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        self.directory = self.directory.with_user(user)?;
        Ok(())
    }

    /// Registers a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken.
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        self.directory = self.directory.with_group(group)?;
        Ok(())
    }

    /// Adds a principal to a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is unknown.
    pub fn add_membership(&mut self, principal: PrincipalId, project: ProjectId) -> Result<()> {
        self.directory = self.directory.with_membership(principal, project)?;
        Ok(())
    }

    /// Grants administrator rights to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown.
    pub fn grant_admin(&mut self, id: PrincipalId) -> Result<()> {
        self.directory = self.directory.with_admin(id, true)?;
        Ok(())
    }

    /// Changes a user's account status.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown.
    pub fn set_status(&mut self, id: PrincipalId, status: UserStatus) -> Result<()> {
        self.directory = self.directory.with_user_status(id, status)?;
        Ok(())
    }

    /// Formats mentions in `text` with the session's directory, context and
    /// visibility policy.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails.
    pub fn format(&self, text: &str) -> Result<String> {
        MentionFormatter::new(&self.directory)
            .with_visibility(self.visibility)
            .format(text, &self.context)
    }

    /// Saves the directory snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        serialize::save_to_file(&self.directory, path)?;
        self.snapshot_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replaces the directory with a snapshot. A viewer that no longer
    /// exists is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.directory = serialize::load_from_file(path)?;
        if let Some(viewer) = self.context.viewer {
            if self.directory.user(viewer).is_none() {
                self.context.viewer = None;
            }
        }
        self.snapshot_path = Some(path.to_path_buf());
        Ok(())
    }
}
