//! FDL: Framing Decision List documents and framing geometry.
//!
//! An FDL document describes how camera images are framed: which regions of
//! a sensor canvas hold the intended picture, and how to derive new canvases
//! (e.g. a VFX pull or a deliverable) from an existing one with a canvas
//! template. Rounding is always passed explicitly.
//!
//! # Modules
//!
//! - [`model`]: Document entities, typed collections, geometry and rounding
//! - [`fit`]: Placing framing intents and deriving canvases from templates
//! - [`validation`]: Relational, required-field and schema validation
//! - [`io`]: Reading and writing `.fdl` documents
//! - [`error`]: Error types for FDL operations

pub mod error;
pub mod fit;
pub mod io;
pub mod model;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::FdlError;
pub use model::Fdl;

use model::{Direction, Evenness, RoundStrategy};

/// The fdl CLI application.
#[derive(Parser)]
#[command(name = "fdl")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a document for errors and warnings.
    Validate(ValidateArgs),
    /// Place a framing intent into a canvas.
    Place(PlaceArgs),
    /// Derive a new canvas from a canvas template.
    Derive(DeriveArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input file to validate.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Options shared by the subcommands that modify a document.
#[derive(clap::Args)]
struct WriteOptions {
    /// Round to even or whole numbers.
    #[arg(long, default_value = "even")]
    rounding_even: Evenness,

    /// Rounding direction ('up', 'down' or 'round').
    #[arg(long, default_value = "round")]
    rounding_mode: Direction,

    /// Skip validation when reading and writing.
    #[arg(long)]
    no_validate: bool,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl WriteOptions {
    fn rounding(&self) -> RoundStrategy {
        RoundStrategy::new(self.rounding_even, self.rounding_mode)
    }
}

/// Arguments for the place subcommand.
#[derive(clap::Args)]
struct PlaceArgs {
    /// Input document.
    input: PathBuf,

    /// Label of the context holding the canvas.
    #[arg(long)]
    context: String,

    /// Id of the canvas to place the framing intent into.
    #[arg(long)]
    canvas: String,

    /// Id of the framing intent to place.
    #[arg(long)]
    intent: String,

    #[command(flatten)]
    write: WriteOptions,
}

/// Arguments for the derive subcommand.
#[derive(clap::Args)]
struct DeriveArgs {
    /// Input document.
    input: PathBuf,

    /// Label of the context holding the source canvas.
    #[arg(long)]
    context: String,

    /// Id of the source canvas.
    #[arg(long)]
    canvas: String,

    /// Id of the canvas template to apply.
    #[arg(long)]
    template: String,

    /// Id of the source framing decision (defaults to the first one).
    #[arg(long)]
    decision: Option<String>,

    #[command(flatten)]
    write: WriteOptions,
}

/// Run the fdl CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FdlError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Place(args)) => run_place(args),
        Some(Commands::Derive(args)) => run_derive(args),
        None => {
            println!("fdl {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Framing Decision List tools.");
            println!();
            println!("Run 'fdl --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), FdlError> {
    let fdl = io::read_from_file(&args.input, false)?;
    let report = validation::validate_fdl(&fdl);

    match args.output.as_str() {
        "json" => {
            let out = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": report.issues,
            });
            let text = serde_json::to_string_pretty(&out)
                .map_err(|source| FdlError::JsonWrite { path: None, source })?;
            println!("{text}");
        }
        _ => print!("{}", report),
    }

    report.into_result()
}

/// Execute the place subcommand.
fn run_place(args: PlaceArgs) -> Result<(), FdlError> {
    let validate = !args.write.no_validate;
    let mut fdl = io::read_from_file(&args.input, validate)?;

    let intent = fdl
        .framing_intents
        .get(&args.intent)
        .cloned()
        .ok_or_else(|| not_found("framing intent", &args.intent))?;
    let canvas = fdl
        .contexts
        .get_mut(&args.context)
        .ok_or_else(|| not_found("context", &args.context))?
        .canvases
        .get_mut(&args.canvas)
        .ok_or_else(|| not_found("canvas", &args.canvas))?;

    fit::place_framing_intent(canvas, &intent, &args.write.rounding())?;

    emit(&fdl, &args.write)
}

/// Execute the derive subcommand.
fn run_derive(args: DeriveArgs) -> Result<(), FdlError> {
    let validate = !args.write.no_validate;
    let mut fdl = io::read_from_file(&args.input, validate)?;
    let rounding = args.write.rounding();

    let template = fdl
        .canvas_templates
        .get(&args.template)
        .ok_or_else(|| not_found("canvas template", &args.template))?;
    let source = fdl
        .contexts
        .get(&args.context)
        .ok_or_else(|| not_found("context", &args.context))?
        .canvases
        .get(&args.canvas)
        .cloned()
        .ok_or_else(|| not_found("canvas", &args.canvas))?;

    let derived = match &args.decision {
        Some(id) => {
            let decision = source
                .framing_decisions
                .get(id)
                .ok_or_else(|| not_found("framing decision", id))?;
            fit::derive_canvas_from_template(template, &source, decision, &rounding)?
        }
        None => fit::derive_canvas_from_template_at(template, &source, 0, &rounding)?,
    };

    fdl.contexts
        .get_mut(&args.context)
        .ok_or_else(|| not_found("context", &args.context))?
        .canvases
        .add(derived)?;

    emit(&fdl, &args.write)
}

fn not_found(what: &str, id: &str) -> FdlError {
    FdlError::Fit(format!("{what} {id:?} not found"))
}

/// Writes the document to the output file, or to stdout.
fn emit(fdl: &Fdl, opts: &WriteOptions) -> Result<(), FdlError> {
    let validate = !opts.no_validate;
    match &opts.output {
        Some(path) => io::write_to_file(fdl, path, validate, Some(io::DEFAULT_INDENT)),
        None => {
            let out = io::write_to_string(fdl, validate, Some(io::DEFAULT_INDENT))?;
            println!("{out}");
            Ok(())
        }
    }
}
