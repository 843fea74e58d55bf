use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rantree::{
    ArrayShape, BatchConfig, GeneratorConfig, Node, ObjectShape, Shape, TreeShape,
    create_generator, create_rng, create_seeded_rng, generate_batch, resolve_kinds,
    weighted_sample,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rantree")]
#[command(about = "Print random objects, trees and arrays for test fixtures", long_about = None)]
#[command(version)]
struct Cli {
    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random structures
    Generate(GenerateArgs),
    /// Draw from a weighted candidate list and report frequencies
    Sample {
        /// Comma-separated candidate values
        #[arg(long)]
        values: String,

        /// Comma-separated relative weights (uniform when omitted)
        #[arg(short, long)]
        weights: Option<String>,

        /// Number of draws
        #[arg(short = 'n', long, default_value_t = 10_000)]
        samples: usize,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Shape of the generated structures
    #[arg(short, long, value_enum, default_value_t = ShapeArg::Object)]
    shape: ShapeArg,

    /// Recursion ceiling
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Upper bound on children per node
    #[arg(short = 'w', long)]
    max_width: Option<f64>,

    /// Number of structures to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated child kinds (recurse, object, int, digits, string, bool, date)
    #[arg(short, long)]
    kinds: Option<String>,

    /// Comma-separated weights for the child kinds
    #[arg(long)]
    weights: Option<String>,

    /// JSON file with generator overrides; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Worker threads for large batches
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Object,
    Tree,
    Array,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => match args.shape {
            ShapeArg::Object => generate::<ObjectShape>(&args),
            ShapeArg::Tree => generate::<TreeShape>(&args),
            ShapeArg::Array => generate::<ArrayShape>(&args),
        },
        Commands::Sample {
            values,
            weights,
            samples,
            seed,
        } => sample(&values, weights.as_deref(), samples, seed),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn split_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_weights(list: &str) -> Result<Vec<f64>> {
    split_list(list)
        .into_iter()
        .map(|w| {
            w.parse::<f64>()
                .with_context(|| format!("Invalid weight '{}'", w))
        })
        .collect()
}

fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let from_file = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            GeneratorConfig::from_json(&json)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => GeneratorConfig::new(),
    };

    let mut flags = GeneratorConfig::new();
    flags.max_depth = args.max_depth;
    flags.max_width = args.max_width;
    if let Some(kinds) = &args.kinds {
        flags.child_kinds = Some(resolve_kinds(split_list(kinds).as_slice()).context("Invalid --kinds")?);
    }
    if let Some(weights) = &args.weights {
        flags.child_weights = Some(parse_weights(weights)?);
    }

    Ok(from_file.merge_with(flags))
}

fn generate<S: Shape>(args: &GenerateArgs) -> Result<()> {
    let config = build_config(args)?;
    debug!(?config, shape = S::NAME, "resolved command-line configuration");

    let generator = create_generator::<S>(config).context("Failed to create generator")?;
    let batch = match args.threads {
        Some(0) => bail!("--threads must be at least 1"),
        Some(1) => BatchConfig::sequential(),
        Some(num_threads) => BatchConfig {
            num_threads,
            ..BatchConfig::default()
        },
        None => BatchConfig::default(),
    };

    let nodes = generate_batch(&generator, args.count, &batch, args.seed)
        .context("Generation failed")?;
    print_nodes(&nodes, args.format)
}

fn print_nodes(nodes: &[Node], format: Format) -> Result<()> {
    match format {
        Format::Pretty => {
            for node in nodes {
                println!("{}", node);
            }
        }
        Format::Json => {
            let json = match nodes {
                [single] => serde_json::to_string_pretty(single),
                many => serde_json::to_string_pretty(many),
            }
            .context("Failed to serialize output")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn sample(values: &str, weights: Option<&str>, samples: usize, seed: Option<u64>) -> Result<()> {
    let candidates = split_list(values);
    let weights = weights.map(parse_weights).transpose()?;
    let sampler = weighted_sample(candidates, weights.as_deref()).context("Invalid candidates")?;

    if samples == 0 {
        bail!("--samples must be at least 1");
    }

    let mut rng = match seed {
        Some(seed) => create_seeded_rng(seed),
        None => create_rng(),
    };
    let mut counts = vec![0usize; sampler.len()];
    for _ in 0..samples {
        counts[sampler.sample_index(&mut rng)] += 1;
    }

    println!(
        "{}",
        format!("{} draws over {} candidates:", samples, sampler.len()).bold()
    );
    println!();
    for ((value, count), expected) in sampler
        .candidates()
        .iter()
        .zip(&counts)
        .zip(sampler.probabilities())
    {
        let observed = *count as f64 / samples as f64;
        let line = format!(
            "  {:<12} observed {:.4}  expected {:.4}",
            value, observed, expected
        );
        if (observed - expected).abs() <= 0.01 {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }

    Ok(())
}
