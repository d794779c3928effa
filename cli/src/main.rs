use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use form_schema_core::validate_elements;
use form_schema_parser::parse_form;
use form_schema_registry::{FormRegistry, FormService, ServiceError, scan_form_tags};
use rayon::prelude::*;
use serde::Serialize;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "formscan")]
#[command(about = "Offline form schema extraction and export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List known forms as id/title pairs.
    List(ListArgs),
    /// Print the parsed schema of one form.
    Get(GetArgs),
    /// Parse a raw definition file (or stdin) without a registry.
    Parse(ParseArgs),
    /// Parse every registered form and write per-form schema files.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Directory of form definition files (JSON or YAML).
    #[arg(long)]
    forms_dir: Option<PathBuf>,
    /// Bundle file holding all definitions.
    #[arg(long)]
    bundle: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct GetArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Form id to fetch.
    id: u32,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Definition file to parse; reads stdin when omitted.
    file: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output directory for per-form JSON files.
    #[arg(long)]
    output: PathBuf,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

/// Process-level failure with its exit code.
struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        let code = match err {
            ServiceError::NotFound(_) => 2,
            ServiceError::ProviderUnavailable => 3,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            ExitCode::from(err.code)
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::List(args) => run_list(args),
        Command::Get(args) => run_get(args),
        Command::Parse(args) => run_parse(args),
        Command::Export(args) => run_export(args),
    }
}

fn run_list(args: ListArgs) -> Result<(), CliError> {
    let service = load_service(&args.source);
    let summaries = service.list_forms()?;
    println!("{}", render(&summaries, args.format)?);
    Ok(())
}

fn run_get(args: GetArgs) -> Result<(), CliError> {
    let service = load_service(&args.source);
    let schema = service.form_schema(args.id)?;
    for warning in validate_elements(&schema.elements) {
        eprintln!("warning: {warning}");
    }
    println!("{}", render(&schema, args.format)?);
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), CliError> {
    let definition = match &args.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| CliError::new(format!("cannot read {}: {err}", path.display())))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| CliError::new(format!("cannot read stdin: {err}")))?;
            buffer
        }
    };

    let tags = scan_form_tags(&definition);
    let elements = parse_form(&definition, &tags);
    for warning in validate_elements(&elements) {
        eprintln!("warning: {warning}");
    }
    println!("{}", render(&elements, args.format)?);
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let service = load_service(&args.source);
    let summaries = service.list_forms()?;
    fs::create_dir_all(&args.output)
        .map_err(|err| CliError::new(format!("cannot create {}: {err}", args.output.display())))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|err| CliError::new(format!("cannot build thread pool: {err}")))?;

    // each form parses independently; the parser holds no shared state
    let results: Vec<(u32, Result<(), String>)> = pool.install(|| {
        summaries
            .par_iter()
            .map(|summary| {
                let result = service
                    .form_schema(summary.id)
                    .map_err(|err| err.to_string())
                    .and_then(|schema| {
                        let path = args.output.join(format!("{}.json", schema.id));
                        let json =
                            serde_json::to_string_pretty(&schema).map_err(|err| err.to_string())?;
                        fs::write(&path, json).map_err(|err| err.to_string())
                    });
                (summary.id, result)
            })
            .collect()
    });

    let mut failed = 0;
    for (id, result) in &results {
        if let Err(message) = result {
            eprintln!("form {id}: {message}");
            failed += 1;
        }
    }
    println!(
        "exported {} of {} forms to {}",
        results.len() - failed,
        results.len(),
        args.output.display()
    );
    if failed > 0 {
        return Err(CliError::new(format!("{failed} forms failed to export")));
    }
    Ok(())
}

fn load_service(source: &SourceArgs) -> FormService {
    let mut builder = FormRegistry::builder();
    let mut configured = false;
    if let Some(dir) = &source.forms_dir {
        builder = builder.from_dir(dir);
        configured = true;
    }
    if let Some(bundle) = &source.bundle {
        builder = builder.from_bundle(bundle);
        configured = true;
    }
    if !configured {
        return FormService::detached();
    }
    match builder.build() {
        Ok(registry) => FormService::new(registry),
        Err(err) => {
            eprintln!("warning: {err}");
            FormService::detached()
        }
    }
}

fn render<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, CliError> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| CliError::new(format!("cannot serialize output: {err}"))),
        CliOutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| CliError::new(format!("cannot serialize output: {err}"))),
    }
}
