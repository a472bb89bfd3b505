//! The main REPL implementation.
//!
//! Lines starting with `:` are commands that edit the directory or the render
//! context; any other line is formatted and printed.

use std::io::{self, Write};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use mentions_engine::{LinkMode, RenderContext, VisibilityMode};
use mentions_foundation::{Error, ErrorKind, Group, PrincipalId, ProjectId, Result, User, UserStatus};

/// Command words offered by completion.
const COMMANDS: &[&str] = &[
    ":user", ":group", ":member", ":admin", ":status", ":viewer", ":links", ":policy", ":list",
    ":save", ":load", ":help", ":quit",
];

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (directory, context, policy).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Cleared by `:quit`.
    running: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E) -> Self {
        editor.set_keywords(COMMANDS.iter().map(|c| (*c).to_string()).collect());
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "@> ".to_string(),
            running: true,
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns false once `:quit` has been evaluated.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.running {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    println!();
                    continue;
                }
                ReadResult::Eof => break,
            };

            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(Some(output)) => println!("{output}"),
                Ok(None) => {}
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line and returns what should be printed, if anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is malformed or formatting fails.
    pub fn eval(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();
        if !trimmed.starts_with(':') {
            return self.session.format(line).map(Some);
        }

        let args = split_args(trimmed)?;
        let Some((command, rest)) = args.split_first() else {
            return Ok(None);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        match command.as_str() {
            ":user" => self.cmd_user(&rest),
            ":group" => self.cmd_group(&rest),
            ":member" => self.cmd_member(&rest),
            ":admin" => self.cmd_admin(&rest),
            ":status" => self.cmd_status(&rest),
            ":viewer" => self.cmd_viewer(&rest),
            ":links" => self.cmd_links(&rest),
            ":policy" => self.cmd_policy(&rest),
            ":list" => Ok(Some(self.listing())),
            ":save" => {
                let [path] = rest.as_slice() else {
                    return Err(usage(":save <path>"));
                };
                self.session.save(path)?;
                Ok(Some(format!("Saved directory to {path}")))
            }
            ":load" => {
                let [path] = rest.as_slice() else {
                    return Err(usage(":load <path>"));
                };
                self.session.load(path)?;
                Ok(Some(format!(
                    "Loaded {} users and {} groups from {path}",
                    self.session.directory().user_count(),
                    self.session.directory().group_count()
                )))
            }
            ":help" => Ok(Some(help_text().to_string())),
            ":quit" | ":q" => {
                self.running = false;
                Ok(None)
            }
            other => Err(invalid_command(format!(
                "unknown command: {other} (try :help)"
            ))),
        }
    }

    fn cmd_user(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [id, login, name, emails @ ..] = args else {
            return Err(usage(":user <id> <login> \"<name>\" [email...]"));
        };
        let id = parse_id(id)?;
        let user = emails
            .iter()
            .fold(User::new(id, *login, *name), |user, email| {
                user.with_email(*email)
            });
        self.session.add_user(user)?;
        Ok(Some(format!("Added user {id} ({login})")))
    }

    fn cmd_group(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [id, name] = args else {
            return Err(usage(":group <id> \"<name>\""));
        };
        let id = parse_id(id)?;
        self.session.add_group(Group::new(id, *name))?;
        Ok(Some(format!("Added group {id} ({name})")))
    }

    fn cmd_member(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [principal, project] = args else {
            return Err(usage(":member <principal-id> <project-id>"));
        };
        let principal = parse_id(principal)?;
        let project = project
            .parse::<u64>()
            .map(ProjectId)
            .map_err(|_| invalid_command(format!("invalid project id: {project}")))?;
        self.session.add_membership(principal, project)?;
        Ok(Some(format!("{principal} joined project {}", project.0)))
    }

    fn cmd_admin(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [id] = args else {
            return Err(usage(":admin <id>"));
        };
        let id = parse_id(id)?;
        self.session.grant_admin(id)?;
        Ok(Some(format!("User {id} is now an administrator")))
    }

    fn cmd_status(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [id, status] = args else {
            return Err(usage(":status <id> active|locked|deleted"));
        };
        let id = parse_id(id)?;
        let status = UserStatus::parse(status)
            .ok_or_else(|| invalid_command(format!("unknown status: {status}")))?;
        self.session.set_status(id, status)?;
        Ok(Some(format!("User {id} is now {status}")))
    }

    fn cmd_viewer(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [viewer] = args else {
            return Err(usage(":viewer <id>|none"));
        };
        if viewer.eq_ignore_ascii_case("none") {
            self.session.set_viewer(None)?;
            return Ok(Some("Viewing anonymously".to_string()));
        }
        let id = parse_id(viewer)?;
        self.session.set_viewer(Some(id))?;
        Ok(Some(format!("Viewing as user {id}")))
    }

    fn cmd_links(&mut self, args: &[&str]) -> Result<Option<String>> {
        let current = self.session.context().clone();
        let context = match args {
            ["relative"] => current.with_only_path(true),
            ["absolute", host] => current.with_only_path(false).with_host(*host),
            ["absolute", host, protocol] => current
                .with_only_path(false)
                .with_host(*host)
                .with_protocol(*protocol),
            _ => return Err(usage(":links relative | :links absolute <host> [protocol]")),
        };
        self.session.set_context(context)?;
        Ok(Some(describe_links(self.session.context())))
    }

    fn cmd_policy(&mut self, args: &[&str]) -> Result<Option<String>> {
        let [name] = args else {
            return Err(usage(":policy open|membership"));
        };
        let mode = VisibilityMode::parse(name)
            .ok_or_else(|| invalid_command(format!("unknown policy: {name}")))?;
        self.session.set_visibility(mode);
        Ok(Some(format!("Visibility policy: {}", mode.name())))
    }

    fn listing(&self) -> String {
        let directory = self.session.directory();
        let mut out = String::new();

        out.push_str(&format!("Users ({}):\n", directory.user_count()));
        for user in directory.users() {
            out.push_str(&format!(
                "  {:>4}  {:<16} {}",
                user.id, user.login, user.display_name
            ));
            if !user.emails.is_empty() {
                out.push_str(&format!(" <{}>", user.emails.join(", ")));
            }
            if user.admin {
                out.push_str(" [admin]");
            }
            if !user.is_active() {
                out.push_str(&format!(" [{}]", user.status));
            }
            let projects = directory.projects_of(user.id);
            if !projects.is_empty() {
                let ids: Vec<String> = projects.iter().map(|p| p.0.to_string()).collect();
                out.push_str(&format!(" projects: {}", ids.join(",")));
            }
            out.push('\n');
        }

        out.push_str(&format!("Groups ({}):\n", directory.group_count()));
        for group in directory.groups() {
            out.push_str(&format!("  {:>4}  {}\n", group.id, group.name));
        }

        let context = self.session.context();
        let viewer = context
            .viewer
            .map_or_else(|| "anonymous".to_string(), |id| id.to_string());
        out.push_str(&format!(
            "Viewer: {viewer}  Policy: {}  {}",
            self.session.visibility().name(),
            describe_links(context)
        ));
        out
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
        if let Some(context) = &error.context {
            eprintln!("\x1b[2m  {context}\x1b[0m");
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mmentions\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type text to format it, or :help for commands. Use Ctrl+D to exit.\n");

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}

fn usage(form: &str) -> Error {
    invalid_command(format!("usage: {form}"))
}

fn invalid_command(message: String) -> Error {
    Error::new(ErrorKind::InvalidCommand(message))
}

fn parse_id(raw: &str) -> Result<PrincipalId> {
    raw.parse::<u64>()
        .map(PrincipalId::new)
        .map_err(|_| invalid_command(format!("invalid principal id: {raw}")))
}

fn describe_links(context: &RenderContext) -> String {
    match context.link_mode {
        LinkMode::OnlyPath => "Links: relative".to_string(),
        LinkMode::Absolute => format!("Links: absolute ({}://{})", context.protocol, context.host),
    }
}

/// Splits a command line into words, keeping `"quoted strings"` whole.
///
/// # Errors
///
/// Returns an error if a quote is left open.
pub fn split_args(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut chars = input.chars();
    let mut current = String::new();
    let mut has_word = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    current.push(c);
                }
                if !closed {
                    return Err(invalid_command(
                        "unterminated quoted argument".to_string(),
                    ));
                }
                has_word = true;
            }
            c if c.is_whitespace() => {
                if has_word {
                    args.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            _ => {
                current.push(ch);
                has_word = true;
            }
        }
    }

    if has_word {
        args.push(current);
    }
    Ok(args)
}

fn help_text() -> &'static str {
    "\x1b[1mCOMMANDS:\x1b[0m
    :user <id> <login> \"<name>\" [email...]   Register a user
    :group <id> \"<name>\"                     Register a group
    :member <id> <project>                   Add a principal to a project
    :admin <id>                              Make a user an administrator
    :status <id> active|locked|deleted       Change a user's status
    :viewer <id>|none                        Set the acting viewer
    :links relative                          Emit root-relative user links
    :links absolute <host> [protocol]        Emit absolute user links
    :policy open|membership                  Choose the visibility policy
    :list                                    Show the directory and settings
    :save <path>                             Save the directory snapshot
    :load <path>                             Load a directory snapshot
    :help                                    Show this help
    :quit                                    Exit

Any other line is formatted: user#<id>, user:\"<login or email>\", group#<id>."
}
