//! Command Model Generator CLI
//!
//! Command-line interface for generating flat command schemas from vendor
//! API shape descriptions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use command_model_generator_auditor::CorpusAuditor;
use command_model_generator_common::{validate, GenerationConfig};
use command_model_generator_generator::CommandSetGenerator;
use command_model_generator_parser::{discover_models, ModelParser};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "command-model-generator")]
#[command(version, about = "Generate command schemas from vendor API descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one model file and display the extracted command schemas
    #[command(after_help = "EXAMPLES:\n  \
        # Parse a single model file\n  \
        command-model-generator parse --model models/storage/2023-01-01/model.json\n\n  \
        # Override the inferred service name\n  \
        command-model-generator parse --model storage.json --service storage")]
    Parse {
        /// Path to the model file
        #[arg(short, long)]
        model: PathBuf,

        /// Service name (inferred from the file name if not specified)
        #[arg(long)]
        service: Option<String>,

        /// API version (taken from the model metadata if not specified)
        #[arg(long)]
        version: Option<String>,
    },

    /// Generate command schemas for every service under a models root
    #[command(after_help = "EXAMPLES:\n  \
        # Generate all services\n  \
        command-model-generator generate \\\n    \
        --models ./models \\\n    \
        --output ./commands\n\n  \
        # Only selected services\n  \
        command-model-generator generate \\\n    \
        --models ./models \\\n    \
        --filter storage,queue\n\n  \
        # Drive the run from a config file\n  \
        command-model-generator generate --models ./models --config generate.yaml")]
    Generate {
        /// Root directory of per-service model folders
        #[arg(short, long)]
        models: PathBuf,

        /// Output directory for the generated corpus
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated list of service names to include
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<String>>,

        /// Path to a YAML generation config
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Audit a generated corpus; exits 1 when any document has errors
    #[command(after_help = "EXAMPLES:\n  \
        command-model-generator audit --corpus ./commands")]
    Audit {
        /// Root directory of the persisted corpus
        #[arg(short, long)]
        corpus: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            model,
            service,
            version,
        } => {
            parse_command(
                model.as_path(),
                service.as_deref(),
                version.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Generate {
            models,
            output,
            filter,
            config,
        } => {
            generate_command(
                models.as_path(),
                output.as_deref(),
                filter.as_deref(),
                config.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Audit { corpus } => {
            let clean = audit_command(corpus.as_path(), cli.verbose)?;
            if !clean {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn parse_command(
    model_path: &Path,
    service_name: Option<&str>,
    api_version: Option<&str>,
    verbose: bool,
) -> Result<()> {
    println!("{} Parsing model file: {}", "→".cyan(), model_path.display());

    let service = service_name
        .map(String::from)
        .or_else(|| infer_service_name(model_path))
        .unwrap_or_else(|| "unknown".to_string());

    let parser = ModelParser::from_file(model_path, &service, api_version.unwrap_or("unknown"))
        .context("Failed to load model file")?;

    // the metadata's apiVersion wins when no explicit version was given
    let version = api_version
        .or_else(|| parser.description().api_version())
        .unwrap_or("unknown")
        .to_string();

    let mut extraction = parser.extract();
    extraction.api_version = version;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Service:".bold());
    println!("  Name: {}", extraction.service.yellow());
    if let Some(display_name) = &extraction.display_name {
        println!("  Full name: {}", display_name.yellow());
    }
    println!("  API version: {}", extraction.api_version.yellow());
    println!("  Commands: {}", extraction.commands.len());

    if !extraction.skipped.is_empty() {
        println!("\n{}", "Skipped operations:".bold());
        for skipped in &extraction.skipped {
            println!(
                "  {} {}: {}",
                "⚠".yellow(),
                skipped.operation,
                skipped.reason
            );
        }
    }

    if extraction.diagnostic_count() > 0 {
        println!("\n{}", "Member diagnostics:".bold());
        for command in &extraction.commands {
            for diagnostic in &command.diagnostics {
                println!(
                    "  {} {}: {}",
                    "⚠".yellow(),
                    command.schema.operation,
                    diagnostic
                );
            }
        }
    }

    if verbose {
        println!("\n{}", "Commands:".bold());
        for command in &extraction.commands {
            let schema = &command.schema;
            println!(
                "  • {} ({} required, {} optional)",
                schema.operation.cyan(),
                schema.required_parameters.len(),
                schema.optional_parameters.len()
            );
            for (name, parameter) in &schema.parameters {
                let marker = if parameter.required { "*" } else { " " };
                println!("    {}{} : {}", marker, name, parameter.parameter_type);
            }
        }
    }

    Ok(())
}

fn generate_command(
    models_root: &Path,
    output: Option<&Path>,
    filter: Option<&[String]>,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => GenerationConfig::load(path).context("Failed to load generation config")?,
        None => GenerationConfig::default(),
    };

    // flags win over config values
    let output_root = output.unwrap_or(&config.output_dir).to_path_buf();
    let included = |service: &str| match filter {
        Some(names) => names.iter().any(|n| n == service),
        None => config.includes_service(service),
    };

    println!(
        "{} Scanning models root: {}",
        "→".cyan(),
        models_root.display()
    );
    let locations = discover_models(models_root).context("Failed to discover models")?;
    println!("{} Discovered {} service model(s)", "✓".green(), locations.len());

    let generator = CommandSetGenerator::new().context("Failed to create generator")?;

    let mut generated = Vec::new();
    let mut skipped_services = 0;
    let mut skipped_operations = 0;
    let mut diagnostics = 0;
    let mut invalid_schemas = 0;

    for location in &locations {
        if !included(&location.service) {
            if verbose {
                println!("  Skipping {} (not in filter)", location.service);
            }
            continue;
        }

        println!(
            "{} Extracting {} ({})",
            "→".cyan(),
            location.service.yellow(),
            location.version
        );

        let parser =
            match ModelParser::from_file(&location.path, &location.service, &location.version) {
                Ok(parser) => parser,
                Err(e) => {
                    eprintln!("{} Skipping {}: {}", "⚠".yellow(), location.service, e);
                    skipped_services += 1;
                    continue;
                }
            };

        let mut extraction = parser.extract();
        skipped_operations += extraction.skipped.len();
        diagnostics += extraction.diagnostic_count();

        for skipped in &extraction.skipped {
            eprintln!(
                "{} {}/{}: {}",
                "⚠".yellow(),
                location.service,
                skipped.operation,
                skipped.reason
            );
        }
        if verbose {
            for command in &extraction.commands {
                for diagnostic in &command.diagnostics {
                    println!(
                        "  {} {}: {}",
                        "⚠".yellow(),
                        command.schema.operation,
                        diagnostic
                    );
                }
            }
        }

        // self-check every schema before persisting; a failed invariant
        // keeps the command out of the corpus
        extraction.commands.retain(|command| {
            let report = validate(&command.schema);
            if !report.is_valid() {
                invalid_schemas += 1;
                for error in &report.errors {
                    eprintln!(
                        "{} {}/{}: {}",
                        "✗".red(),
                        command.schema.service,
                        command.schema.operation,
                        error
                    );
                }
            }
            report.is_valid()
        });

        let command_set = extraction.into_command_set();
        let summary = generator
            .generate_service(&command_set, &output_root)
            .with_context(|| format!("Failed to generate service {}", command_set.service))?;

        println!(
            "{} Wrote {} command(s) for {}",
            "✓".green(),
            summary.command_count,
            summary.service.yellow()
        );
        generated.push(summary);
    }

    if config.index {
        generator
            .generate_index(&generated, &output_root)
            .context("Failed to generate README index")?;
    }

    let total_commands: usize = generated.iter().map(|s| s.command_count).sum();
    println!(
        "\n{} {} service(s), {} command(s) written to {}",
        "✓".green().bold(),
        generated.len(),
        total_commands,
        output_root.display()
    );
    if skipped_services > 0 {
        println!("{} Skipped {} service(s) due to parse errors", "⚠".yellow(), skipped_services);
    }
    if skipped_operations > 0 {
        println!(
            "{} Skipped {} operation(s) with unresolvable input shapes",
            "⚠".yellow(),
            skipped_operations
        );
    }
    if diagnostics > 0 {
        println!(
            "{} Skipped {} member(s) with unresolvable shapes",
            "⚠".yellow(),
            diagnostics
        );
    }
    if invalid_schemas > 0 {
        println!(
            "{} Dropped {} schema(s) that failed the consistency self-check",
            "✗".red(),
            invalid_schemas
        );
    }

    Ok(())
}

fn audit_command(corpus: &Path, verbose: bool) -> Result<bool> {
    println!("{} Auditing corpus: {}", "→".cyan(), corpus.display());

    let report = CorpusAuditor::new(corpus.to_path_buf())
        .audit()
        .context("Failed to audit corpus")?;

    if verbose || !report.is_clean() {
        println!("\n{}", report.render_summary());
    } else {
        println!(
            "{} {} document(s) checked, {} warning(s)",
            "✓".green(),
            report.total_documents(),
            report.total_warnings()
        );
    }

    if report.is_clean() {
        println!("{}", "✓ Corpus is consistent".green().bold());
    } else {
        println!(
            "{}",
            format!("✗ Corpus has {} error(s)", report.total_errors())
                .red()
                .bold()
        );
    }

    Ok(report.is_clean())
}

/// Infer service name from the model file name or its service directory
fn infer_service_name(path: &Path) -> Option<String> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;

    // models laid out as <service>/<version>/model.json name the service
    // two levels up
    if stem == "model" {
        let service_dir = path.parent()?.parent()?;
        return service_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);
    }

    Some(stem.to_string())
}
