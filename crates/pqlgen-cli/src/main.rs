//! pqlgen CLI
//!
//! Command-line interface for:
//! - Generating PQL test-query files from the weighted grammar
//! - Listing the built-in presets
//! - Printing the resolved generator configuration

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pqlgen_grammar::{
    write_queries, FamilyPreset, IdentifierPool, Preset, QueryGenerator, SelectPreset, WriteError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod inputs;
mod output;
mod settings;

use settings::ConfigArgs;

#[derive(Parser)]
#[command(name = "pqlgen")]
#[command(author, version, about = "pqlgen: weighted-grammar PQL test-query generator")]
struct Cli {
    /// Log generation decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate query files under `--out`.
    ///
    /// Files are named `queries_<i>.txt` and opened in append mode, so
    /// repeated runs accumulate queries.
    Generate(GenerateArgs),

    /// List every preset pair and the comment it writes.
    Presets,

    /// Print the fully resolved configuration as JSON.
    Config {
        #[command(flatten)]
        settings: ConfigArgs,
    },
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    settings: ConfigArgs,

    /// Number of output files
    #[arg(long, default_value_t = 1)]
    num_files: usize,
    /// Index of the first output file
    #[arg(long, default_value_t = 1)]
    start: usize,
    /// Output directory
    #[arg(long, default_value = "queries")]
    out: PathBuf,
    /// Seed for the random generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// File of procedure names usable as literals
    #[arg(long = "proc", value_name = "FILE")]
    procedures: Option<PathBuf>,
    /// File of variable names usable as literals
    #[arg(long = "var", value_name = "FILE")]
    variables: Option<PathBuf>,
    /// File of constant values usable as literals
    #[arg(long = "const", value_name = "FILE")]
    constants: Option<PathBuf>,
    /// Separator between entries of an identifier file
    #[arg(long, default_value = " ")]
    delim: String,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "pqlgen=debug,pqlgen_grammar=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => cmd_generate(&args)?,
        Commands::Presets => cmd_presets(),
        Commands::Config { settings: args } => {
            let config = settings::resolve(&args)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let config = settings::resolve(&args.settings)?;
    let literals = inputs::load_literals(
        args.procedures.as_deref(),
        args.variables.as_deref(),
        args.constants.as_deref(),
        &args.delim,
    )?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len)?;
    let generator = QueryGenerator::new(&config, &pool, &literals)?;

    let end = args
        .start
        .checked_add(args.num_files)
        .ok_or_else(|| anyhow!("--start {} + --num-files {} overflows", args.start, args.num_files))?;

    output::ensure_dir(&args.out)?;
    let mut total = 0;
    for index in args.start..end {
        let path = output::query_file_path(&args.out, index);
        let mut writer = output::open_append(&path)?;
        let written = write_queries(&mut writer, &mut rng, &generator).map_err(|err| match err {
            WriteError::Io(err) => anyhow::Error::new(err)
                .context(format!("failed to write queries to {}", path.display())),
            err @ WriteError::Generate { .. } => anyhow::Error::new(err).context(format!(
                "generator configuration cannot produce queries for {}",
                path.display()
            )),
        })?;
        writer
            .flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;
        tracing::debug!(path = %path.display(), written, "finished query file");
        eprintln!(
            "{} {} ({} queries)",
            "wrote".green().bold(),
            path.display().to_string().bold(),
            written
        );
        total += written;
    }
    eprintln!(
        "{} generated {} queries across {} file(s) (seed {})",
        "ok".green().bold(),
        total,
        args.num_files,
        args.seed
    );
    Ok(())
}

fn cmd_presets() {
    println!("{}", "select presets".bold());
    for (index, preset) in [SelectPreset::Boolean, SelectPreset::Tuple, SelectPreset::Single]
        .into_iter()
        .enumerate()
    {
        if let Some(select) = preset.overrides() {
            println!("  {} {}", index + 1, select.label);
        }
    }
    println!("  0 none (presets disabled)");
    println!("{}", "family presets".bold());
    for (index, family) in FamilyPreset::ALL.into_iter().enumerate() {
        println!("  {index:>2} {}", family.overrides().label);
    }
    let example = Preset {
        select: SelectPreset::Boolean,
        family: FamilyPreset::Modifies,
    };
    if let Some(comment) = example.comment() {
        println!(
            "{} --preset 1 8 writes `{}`",
            "example:".yellow().bold(),
            comment
        );
    }
}
