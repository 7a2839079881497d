mod cli;

use classcarve::{
    archive::{Compression, Manifest},
    config,
    extract::{self, ConsoleReporter, ExtractOptions, ExtractionPlan, ScanReport},
    CLASS_MAGIC,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "classcarve=debug,classcarve_scan=trace".to_string()
        } else {
            // Progress lines already cover the normal case
            "classcarve=warn,classcarve_scan=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            input,
            output,
            dry_run,
            stored,
        } => extract_file(input, output, cli.config.as_deref(), dry_run, stored),
        Commands::Scan { input, json } => scan_file(&input, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("classcarve {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn extract_file(
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
    dry_run: bool,
    stored: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let output = output.unwrap_or_else(|| config.output.path.clone());
    let compression = if stored {
        Compression::Stored
    } else {
        config.output.compression
    };

    let options = ExtractOptions {
        manifest: Manifest::from(&config.manifest),
        compression,
        dry_run,
        ..ExtractOptions::new(input, output)
    };

    tracing::debug!(?options.input, ?options.output, %compression, dry_run, "starting extraction");

    let mut reporter = ConsoleReporter::stdio();
    let outcome = extract::run(&options, &mut reporter)
        .with_context(|| format!("Extraction from {:?} failed", options.input))?;

    tracing::debug!("Extraction outcome: {:?}", outcome);

    Ok(())
}

fn scan_file(input: &Path, json: bool) -> Result<()> {
    let buffer = extract::read_input(input)?;
    let plan = ExtractionPlan::build(&buffer, &CLASS_MAGIC);

    if json {
        let report = ScanReport::from_plan(input.display().to_string(), &CLASS_MAGIC, &plan);
        let json_str = serde_json::to_string_pretty(&report)?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("File: {}", input.display());
    println!("Size: {} bytes", plan.input_size());
    println!("Marker: {}", hex::encode_upper(CLASS_MAGIC));
    println!("Occurrences: {}", plan.occurrences());

    if plan.is_empty() {
        println!("No potential class data found.");
        return Ok(());
    }

    println!("\nSegments: {}", plan.entries().len());
    for entry in plan.entries() {
        print!(
            "  [{}] 0x{:08X}..0x{:08X} {} bytes {}",
            entry.fragment.index,
            entry.fragment.start,
            entry.fragment.end,
            entry.fragment.len(),
            entry.preview()
        );
        if !entry.is_accepted() {
            print!(" [skipped]");
        }
        println!();
    }

    println!(
        "\nAccepted: {} ({} bytes), skipped: {}",
        plan.accepted_count(),
        plan.accepted_bytes(),
        plan.skipped_count()
    );

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    println!("  Output: {}", config.output.path.display());
    println!("  Compression: {}", config.output.compression);
    println!("  Manifest-Version: {}", config.manifest.version);
    for (name, value) in &config.manifest.attributes {
        println!("  {}: {}", name, value);
    }
}
