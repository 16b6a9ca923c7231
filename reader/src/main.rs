//! # reader
//!
//! A CLI for loading text files into collections, stripping and tokenizing
//! them, and inspecting paths.
//!
//! ## Usage
//!
//! ```bash
//! # List every regular file in a directory
//! reader list docs/
//!
//! # List only .txt and .md files, as JSON
//! reader list docs/ -x .txt -x md --output json
//!
//! # Strip // comments and blank lines, write next to the source (notes.txt.otf)
//! reader transform notes.txt --strip-comments --strip-blank
//!
//! # Tokenize into words and print instead of writing
//! reader transform notes.txt --split punct --dry-run
//!
//! # Overwrite the source itself
//! reader transform notes.txt --strip-blank --unprotect --force
//!
//! # Describe a path
//! reader inspect docs/
//! ```
//!
//! Set `RUST_LOG=debug` to see what the library is doing.

mod inspect;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use readerlib::{Collection, JoinMode, TextUnit, UnitOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("output").map(|s| s.as_str()) {
            Some("json") => OutputMode::Json,
            _ => OutputMode::Text,
        }
    }
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Output format")
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("reader")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Scan, strip and tokenize text files without touching the originals")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("Scan a directory into a collection and list its files")
                .arg(
                    Arg::new("path")
                        .help("Directory to scan (defaults to current directory)")
                        .default_value("."),
                )
                .arg(
                    Arg::new("ext")
                        .short('x')
                        .long("ext")
                        .action(ArgAction::Append)
                        .help("Extension filter, e.g. .txt or * (can be specified multiple times)"),
                )
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Collection name (defaults to the directory name)"),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Show the full description of each file"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("transform")
                .about("Apply transforms to a file and write the result")
                .arg(Arg::new("file").help("File to transform").required(true))
                .arg(
                    Arg::new("strip-comments")
                        .short('c')
                        .long("strip-comments")
                        .action(ArgAction::SetTrue)
                        .help("Drop lines containing the comment marker"),
                )
                .arg(
                    Arg::new("marker")
                        .short('m')
                        .long("marker")
                        .default_value(readerlib::options::DEFAULT_COMMENT_MARKER)
                        .help("Comment marker"),
                )
                .arg(
                    Arg::new("strip-blank")
                        .short('b')
                        .long("strip-blank")
                        .action(ArgAction::SetTrue)
                        .help("Drop empty lines"),
                )
                .arg(
                    Arg::new("split")
                        .short('s')
                        .long("split")
                        .value_parser(["words", "punct", "chars"])
                        .help("Tokenize the text"),
                )
                .arg(
                    Arg::new("join")
                        .short('j')
                        .long("join")
                        .value_parser(["auto", "lines", "tokens"])
                        .default_value("auto")
                        .help("How the result is joined when written"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Write target (defaults to the source file)"),
                )
                .arg(
                    Arg::new("suffix")
                        .long("suffix")
                        .default_value(readerlib::options::DEFAULT_PROTECT_SUFFIX)
                        .help("Suffix appended to protected write targets"),
                )
                .arg(
                    Arg::new("unprotect")
                        .long("unprotect")
                        .action(ArgAction::SetTrue)
                        .help("Disable write protection"),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Write to the target itself (only takes effect with --unprotect)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print the result instead of writing it"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print what the filesystem says about a path")
                .arg(Arg::new("path").help("Path to inspect").required(true))
                .arg(output_arg()),
        )
}

/// Extract extension filters from matches, defaulting to the wildcard
fn extract_filters(matches: &ArgMatches) -> Vec<String> {
    let filters: Vec<String> = matches
        .get_many::<String>("ext")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if filters.is_empty() {
        vec![readerlib::filter::WILDCARD.to_string()]
    } else {
        filters
    }
}

/// Build unit options from transform matches
fn build_options(matches: &ArgMatches) -> UnitOptions {
    let join_mode = match matches.get_one::<String>("join").map(|s| s.as_str()) {
        Some("lines") => JoinMode::Lines,
        Some("tokens") => JoinMode::Tokens,
        _ => JoinMode::Auto,
    };

    let mut options = UnitOptions::new()
        .join_mode(join_mode)
        .write_protected(!matches.get_flag("unprotect"));
    if let Some(marker) = matches.get_one::<String>("marker") {
        options = options.comment_marker(marker);
    }
    if let Some(suffix) = matches.get_one::<String>("suffix") {
        options = options.protect_suffix(suffix);
    }
    options
}

/// Handler for list command
fn list_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let filters = extract_filters(matches);
    let name = match matches.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => std::path::absolute(path)?
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string()),
    };

    debug!(path, ?filters, "scanning directory");
    let collection = Collection::scan(name, path, filters.as_slice())
        .with_context(|| format!("cannot scan '{}'", path))?;

    if OutputMode::from_matches(matches) == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    let bold = Style::new().bold();
    println!("{}", bold.apply_to(collection.listing_header()));
    println!("{}", collection.describe());
    for row in collection.list_members(matches.get_flag("verbose")) {
        println!("{}", row);
    }
    Ok(())
}

/// Handler for transform command
fn transform_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let file = matches
        .get_one::<String>("file")
        .context("missing file argument")?;
    let force = matches.get_flag("force");
    let mut unit = TextUnit::open_with(file, build_options(matches))?;

    if matches.get_flag("strip-comments") {
        unit.strip_comments();
    }
    if matches.get_flag("strip-blank") {
        unit.remove_blank_lines();
    }
    match matches.get_one::<String>("split").map(|s| s.as_str()) {
        Some("words") => unit.split_by_space(),
        Some("punct") => unit.split_punctuation(),
        Some("chars") => unit.split_characters(),
        _ => {}
    }

    let mode = OutputMode::from_matches(matches);

    if matches.get_flag("dry-run") {
        if mode == OutputMode::Json {
            let value = serde_json::json!({
                "unit": &unit,
                "edited": unit.edited(),
                "lines": unit.lines(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print!("{}", unit.text());
        }
        return Ok(());
    }

    let target = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| unit.source_path().to_path_buf());
    debug!(
        source = %unit.source_path().display(),
        out = %target.display(),
        force,
        protected = unit.is_write_protected(),
        edited = unit.edited(),
        "writing transformed file"
    );
    let written = unit.write(&target, force)?;

    if mode == OutputMode::Json {
        let value = serde_json::json!({
            "source": unit.source_path(),
            "written": written,
            "edited": unit.edited(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", unit.describe(false));
        println!("wrote {}", written.display());
    }
    Ok(())
}

/// Handler for inspect command
fn inspect_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .context("missing path argument")?;
    let report = inspect::inspect(path);

    if OutputMode::from_matches(matches) == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("list", sub)) => list_handler(sub),
        Some(("transform", sub)) => transform_handler(sub),
        Some(("inspect", sub)) => inspect_handler(sub),
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given"),
    }
}

fn main() -> ExitCode {
    init_logging();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
