//! Mentions CLI entry point.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use mentions_engine::{RenderContext, VisibilityMode};
use mentions_foundation::PrincipalId;
use mentions_runtime::{Repl, Session};
use tracing_subscriber::prelude::*;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    directory: Option<PathBuf>,
    viewer: Option<u64>,
    absolute_host: Option<String>,
    protocol: Option<String>,
    policy: Option<VisibilityMode>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Returns the value following option `args[*i]`, advancing `i`.
fn option_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let name = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-v" | "--verbose" => config.verbose = true,
            "-d" | "--directory" => {
                config.directory = Some(PathBuf::from(option_value(args, &mut i)?));
            }
            "--viewer" => {
                let value = option_value(args, &mut i)?;
                config.viewer = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --viewer value: {value}"))?,
                );
            }
            "--absolute" => {
                config.absolute_host = Some(option_value(args, &mut i)?.to_string());
            }
            "--protocol" => {
                config.protocol = Some(option_value(args, &mut i)?.to_string());
            }
            "--policy" => {
                let value = option_value(args, &mut i)?;
                config.policy = Some(
                    VisibilityMode::parse(value)
                        .ok_or_else(|| format!("invalid --policy value: {value}"))?,
                );
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_session(config: &CliConfig) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::new();

    if let Some(path) = &config.directory {
        session.load(path)?;
        tracing::info!(
            path = %path.display(),
            users = session.directory().user_count(),
            groups = session.directory().group_count(),
            "loaded directory"
        );
    }

    let mut context = RenderContext::anonymous();
    if let Some(host) = &config.absolute_host {
        context = context.with_only_path(false).with_host(host.clone());
    }
    if let Some(protocol) = &config.protocol {
        context = context.with_protocol(protocol.clone());
    }
    session.set_context(context)?;
    session.set_viewer(config.viewer.map(PrincipalId::new))?;

    if let Some(policy) = config.policy {
        session.set_visibility(policy);
    }

    Ok(session)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("mentions {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbose);
    let session = build_session(&config)?;

    if config.batch_mode {
        if config.files.is_empty() || config.files.iter().any(|f| f.as_os_str() == "-") {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            print!("{}", session.format(&input)?);
        }
        for file in config.files.iter().filter(|f| f.as_os_str() != "-") {
            let text = fs::read_to_string(file)
                .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
            print!("{}", session.format(&text)?);
        }
        return Ok(());
    }

    if !config.files.is_empty() {
        return Err("files are only formatted in batch mode (-b)".into());
    }

    let mut repl = Repl::new()?.with_session(session);
    if config.directory.is_some() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mmentions\x1b[0m - Resolve user and group mentions in text

\x1b[1mUSAGE:\x1b[0m
    mentions [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Files to format in batch mode (- for stdin)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help               Print help information
    -V, --version            Print version information
    -b, --batch              Format files (or stdin) and exit
    -d, --directory FILE     Load a directory snapshot
    --viewer ID              Format as this user
    --absolute HOST          Emit absolute user links on HOST
    --protocol SCHEME        Scheme for absolute links (default http)
    --policy open|membership Visibility policy (default open)
    -v, --verbose            Log at debug level (RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    mentions                                  Start interactive REPL
    mentions -d people.msgpack                Load a directory, then start REPL
    mentions -b -d people.msgpack notes.txt   Format notes.txt and exit
    echo 'hi user#1' | mentions -b -d people.msgpack --absolute example.com

\x1b[1mREPL COMMANDS:\x1b[0m
    :help                Show all commands
    Ctrl+D               Exit REPL
    Ctrl+C               Cancel current input"
    );
}
