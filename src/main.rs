//! Templately CLI
//!
//! Usage:
//!   templately [OPTIONS] <TEMPLATE> <OUTPUT> <NAME=FILE>...
//!
//! Options:
//!   --ot <TAG>          Opening tag of the placeholder delimiters
//!   --po <PREFIX>       Name prefix inside the delimiters
//!   --ct <TAG>          Closing tag of the placeholder delimiters
//!   -s, --syntax <FILE> Delimiter syntax file (TOML format)
//!   -q, --quiet         Suppress validation diagnostics
//!   -d, --debug         Show compiled pattern and discovered placeholders
//!   -h, --help          Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use templately::{inject_with_config, InjectConfig, InjectError, PlaceholderSyntax};

/// Exit code for a missing template file
const EXIT_TEMPLATE_MISSING: i32 = 1;
/// Exit code for failed placeholder validation
const EXIT_VALIDATION_FAILED: i32 = 2;
/// Exit code for a missing output directory
const EXIT_OUTPUT_DIR_MISSING: i32 = 3;

#[derive(Parser)]
#[command(name = "templately")]
#[command(version)]
#[command(about = "Inject file contents into a template's named placeholders")]
struct Cli {
    /// Template file containing the placeholders
    template: PathBuf,

    /// Output file (fully overwritten)
    output: PathBuf,

    /// Placeholder bindings, one name=file per argument
    #[arg(value_name = "NAME=FILE", required = true)]
    bindings: Vec<String>,

    /// Opening tag of the placeholder delimiters
    #[arg(long = "ot", value_name = "TAG")]
    opening_tag: Option<String>,

    /// Name prefix inside the delimiters
    #[arg(long = "po", value_name = "PREFIX")]
    name_prefix: Option<String>,

    /// Closing tag of the placeholder delimiters
    #[arg(long = "ct", value_name = "TAG")]
    closing_tag: Option<String>,

    /// Delimiter syntax file (TOML format)
    #[arg(short, long)]
    syntax: Option<PathBuf>,

    /// Suppress validation diagnostics on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Debug mode: show compiled pattern and discovered placeholders
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Pre-flight checks, before any validation work
    if !cli.template.is_file() {
        eprintln!(
            "Template file not found (or not a regular file): '{}'",
            cli.template.display()
        );
        std::process::exit(EXIT_TEMPLATE_MISSING);
    }

    let out_dir = output_dir(&cli.output);
    if !out_dir.is_dir() {
        eprintln!("The output directory does not exist: '{}'", out_dir.display());
        std::process::exit(EXIT_OUTPUT_DIR_MISSING);
    }

    // Load syntax: file first, then explicit flags override
    let mut syntax = match &cli.syntax {
        Some(path) => match PlaceholderSyntax::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading syntax file '{}': {}", path.display(), e);
                std::process::exit(EXIT_TEMPLATE_MISSING);
            }
        },
        None => PlaceholderSyntax::default(),
    };
    if let Some(opening_tag) = cli.opening_tag {
        syntax.opening_tag = opening_tag;
    }
    if let Some(name_prefix) = cli.name_prefix {
        syntax.name_prefix = name_prefix;
    }
    if let Some(closing_tag) = cli.closing_tag {
        syntax.closing_tag = closing_tag;
    }

    let template = match fs::read_to_string(&cli.template) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading template '{}': {}", cli.template.display(), e);
            std::process::exit(EXIT_TEMPLATE_MISSING);
        }
    };

    let config = InjectConfig::new()
        .with_syntax(syntax)
        .with_quiet(cli.quiet)
        .with_debug(cli.debug);

    match inject_with_config(&template, &cli.bindings, &cli.output, &config) {
        Ok(()) => {}
        // Individual validation errors were already reported on stderr
        Err(InjectError::Validation(_)) => std::process::exit(EXIT_VALIDATION_FAILED),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_TEMPLATE_MISSING);
        }
    }
}

/// Directory the output file will be created in
///
/// A bare filename has an empty parent, which means the current directory.
fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
