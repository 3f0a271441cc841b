//! contig-sensors command line
//!
//! ```text
//! contig-sensors train  genome.fna genes.gtf -o train.tsv --type edge --balance 1.2
//! contig-sensors verify genome.fna genes.gtf -o verify.tsv.gz --sensor direct
//! contig-sensors encode genome.fna --edge-filter
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use contig_sensors::classify::ClassScheme;
use contig_sensors::io::DataSink;
use contig_sensors::pipeline::{
    run_encode, run_train, run_verify, EncodeConfig, RunSummary, TrainConfig, VerifyConfig,
};
use contig_sensors::sampler::{SamplerConfig, DEFAULT_CHUNK_SIZE, DEFAULT_RUN_LENGTH};
use contig_sensors::sensor::{FactoryKind, SensorWidths, DEFAULT_LEFT_WIDTH, DEFAULT_RIGHT_WIDTH};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contig-sensors",
    version,
    about = "Encode contig DNA windows and coding-frame labels as tab-delimited examples"
)]
struct Cli {
    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output file (`-` or absent for stdout; `.gz` compresses)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample labelled training rows from an annotated genome
    Train(TrainArgs),
    /// Write every labelled position of an annotated genome
    Verify(VerifyArgs),
    /// Encode every position of a genome without labels
    Encode(EncodeArgs),
}

#[derive(Args, Debug)]
struct SensorArgs {
    /// Window positions upstream of the target
    #[arg(long, default_value_t = DEFAULT_LEFT_WIDTH)]
    left: usize,

    /// Window positions downstream of the target
    #[arg(long, default_value_t = DEFAULT_RIGHT_WIDTH)]
    right: usize,

    /// Encoding: direct, channel, codon-numeric, codon-string, one-hot, amino-acid
    #[arg(long, default_value = "channel")]
    sensor: String,
}

impl SensorArgs {
    fn kind(&self) -> Result<FactoryKind> {
        Ok(self.sensor.parse::<FactoryKind>()?)
    }

    fn widths(&self) -> SensorWidths {
        SensorWidths::new(self.left, self.right)
    }
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Genome FASTA (plain or gzip)
    genome: PathBuf,

    /// Coding-region annotation GTF (plain or gzip)
    annotation: PathBuf,

    #[command(flatten)]
    sensor: SensorArgs,

    /// Labels: phase, coding, edge, start, stop
    #[arg(long = "type", default_value = "edge")]
    scheme: String,

    /// Label reverse-strand coding regions
    #[arg(long)]
    negative: bool,

    /// Positions per sampling chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk: usize,

    /// Maximum rows per sampling run
    #[arg(long, default_value_t = DEFAULT_RUN_LENGTH)]
    run: usize,

    /// Random seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Balance labels: 0 disables, otherwise between 1.0 and 2.0
    #[arg(long, default_value_t = 0.0)]
    balance: f64,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Genome FASTA (plain or gzip)
    genome: PathBuf,

    /// Coding-region annotation GTF (plain or gzip)
    annotation: PathBuf,

    #[command(flatten)]
    sensor: SensorArgs,

    /// Labels: phase, coding, edge, start, stop
    #[arg(long = "type", default_value = "edge")]
    scheme: String,

    /// Label reverse-strand coding regions
    #[arg(long)]
    negative: bool,

    /// Only write start/stop codon positions (edge, start and stop labels)
    #[arg(long)]
    edge_filter: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Genome FASTA (plain or gzip)
    genome: PathBuf,

    #[command(flatten)]
    sensor: SensorArgs,

    /// Only write start/stop codon positions
    #[arg(long)]
    edge_filter: bool,

    /// Include reverse-complement start/stop codons in the edge filter
    #[arg(long)]
    negative: bool,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(command: &str, summary: &RunSummary) {
    info!(
        command,
        contigs = summary.contigs,
        bases = summary.bases,
        unannotated = summary.unannotated,
        scanned = summary.stats.scanned,
        filtered = summary.stats.filtered,
        suspicious = summary.stats.suspicious,
        unlabelled = summary.stats.unlabelled,
        rows = summary.rows(),
        "done"
    );
    for (label, (written, emitted)) in &summary.labels {
        info!(label = %label, written, emitted, "label count");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let sink = DataSink::from_option(cli.output.as_ref());

    match cli.command {
        Command::Train(args) => {
            let config = TrainConfig {
                kind: args.sensor.kind()?,
                widths: args.sensor.widths(),
                scheme: args.scheme.parse::<ClassScheme>()?,
                negative: args.negative,
                sampler: SamplerConfig {
                    chunk_size: args.chunk,
                    run_length: args.run,
                    seed: args.seed,
                },
                balance: args.balance,
            };
            let summary = run_train(&args.genome, &args.annotation, sink, &config)
                .with_context(|| format!("training run on {} failed", args.genome.display()))?;
            report("train", &summary);
        }
        Command::Verify(args) => {
            let config = VerifyConfig {
                kind: args.sensor.kind()?,
                widths: args.sensor.widths(),
                scheme: args.scheme.parse::<ClassScheme>()?,
                negative: args.negative,
                edge_filter: args.edge_filter,
            };
            let summary = run_verify(&args.genome, &args.annotation, sink, &config)
                .with_context(|| format!("verify run on {} failed", args.genome.display()))?;
            report("verify", &summary);
        }
        Command::Encode(args) => {
            let config = EncodeConfig {
                kind: args.sensor.kind()?,
                widths: args.sensor.widths(),
                edge_filter: args.edge_filter,
                negative: args.negative,
            };
            let summary = run_encode(&args.genome, sink, &config)
                .with_context(|| format!("encode run on {} failed", args.genome.display()))?;
            report("encode", &summary);
        }
    }
    Ok(())
}
