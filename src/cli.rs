use crate::descriptor::MetadataSource;
use crate::generator::DocsGenerator;
use crate::route::RouteConventions;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::source::{ManifestSource, RustSource};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Controller Docs - describe every exposed operation of a Rust web service
#[derive(Parser, Debug)]
#[command(name = "controller-docs")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the service's project directory
    #[arg(
        value_name = "PROJECT_PATH",
        required_unless_present = "manifest",
        conflicts_with = "manifest"
    )]
    pub project_path: Option<PathBuf>,

    /// Read descriptors from a JSON or YAML manifest instead of source code
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Name suffix that marks a struct as a controller
    #[arg(long = "container-suffix", default_value = "Controller")]
    pub container_suffix: String,

    /// Route placeholder replaced by the controller's base name
    #[arg(long = "container-token", default_value = "[controller]")]
    pub container_token: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl CliArgs {
    pub fn conventions(&self) -> RouteConventions {
        RouteConventions {
            container_token: self.container_token.clone(),
            container_suffix: self.container_suffix.clone(),
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if let Some(project_path) = &args.project_path {
        if !project_path.is_dir() {
            anyhow::bail!(
                "Project path is not a directory: {}",
                project_path.display()
            );
        }
        info!("Project path: {}", project_path.display());
    }
    if let Some(manifest) = &args.manifest {
        info!("Manifest: {}", manifest.display());
    }

    info!("Output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }

    Ok(args)
}

/// Run one generation pass and write the result
pub fn run(args: CliArgs) -> Result<()> {
    let source: Box<dyn MetadataSource> = match (&args.manifest, &args.project_path) {
        (Some(manifest), _) => Box::new(ManifestSource::new(manifest.clone())),
        (None, Some(project_path)) => Box::new(RustSource::new(project_path.clone())),
        (None, None) => anyhow::bail!("Either PROJECT_PATH or --manifest is required"),
    };

    let generator = DocsGenerator::new(args.conventions());
    let records = generator
        .generate(source.as_ref())
        .context("Failed to generate operation docs")?;

    info!("Generated {} operation records", records.len());
    if records.is_empty() {
        log::warn!("No controller operations found");
    }

    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&records)?,
        OutputFormat::Yaml => serialize_yaml(&records)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Wrote operation docs to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}
