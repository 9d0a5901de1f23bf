//! virtmem - replay a memory access trace through the page replacement simulator
//!
//! Usage:
//!   virtmem --framesize=12 --numframes=32 --replace=lru --file=trace.txt
//!   virtmem --framesize=10 --numframes=8 --replace=clock --progress < trace.txt
//!   virtmem --framesize=12 --numframes=4 --replace=fifo --format json --file=trace.txt

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use virtmem_core::progress::ProgressBar;
use virtmem_core::replay::replay;
use virtmem_core::{report, ReplacementPolicy, Simulator, SimulatorConfig, TraceReader};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "virtmem")]
#[command(about = "Virtual memory page replacement simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Frame size as a power of two, in bits
    #[arg(long, env = "VIRTMEM_FRAMESIZE")]
    framesize: Option<u32>,

    /// Number of physical frames
    #[arg(long, env = "VIRTMEM_NUMFRAMES")]
    numframes: Option<usize>,

    /// Replacement policy: fifo, lru, clock
    #[arg(long, env = "VIRTMEM_REPLACE")]
    replace: Option<ReplacementPolicy>,

    /// Trace file; standard input when omitted
    #[arg(long)]
    file: Option<PathBuf>,

    /// Show a progress bar (trace file only)
    #[arg(long)]
    progress: bool,

    /// Print the page table to stderr after every access
    #[arg(long)]
    dump: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    fn config(&self) -> virtmem_core::Result<SimulatorConfig> {
        let config = SimulatorConfig {
            frame_bits: self.framesize.unwrap_or_default(),
            frames: self.numframes.unwrap_or_default(),
            policy: self.replace,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virtmem=warn,virtmem_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config().context(
        "usage: virtmem --framesize=<m> --numframes=<n> --replace={fifo|lru|clock} [--file=<filename>]",
    )?;
    let mut sim = Simulator::from_config(config)?;

    let (input, size): (Box<dyn BufRead>, Option<u64>) = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open trace file {}", path.display()))?;
            let size = file.metadata()?.len();
            (Box::new(BufReader::new(file)) as Box<dyn BufRead>, Some(size))
        }
        None => (Box::new(io::stdin().lock()) as Box<dyn BufRead>, None),
    };

    let mut progress = match size {
        Some(total) if cli.progress && total > 0 => Some(ProgressBar::new(io::stdout(), total)),
        _ => None,
    };

    let mut reader = TraceReader::new(input);
    replay(&mut sim, &mut reader, progress.as_mut(), |sim, record| {
        if cli.dump {
            let kind = if record.kind.is_write() { 'W' } else { 'R' };
            let label = format!("{}: {:#010x}", kind, record.address);
            eprint!("{}", report::render_table(sim, &label));
        }
    })
    .with_context(|| format!("trace replay stopped at line {}", reader.line()))?;

    let stats = sim.stats();
    tracing::info!(
        references = stats.references,
        faults = stats.faults,
        lines = reader.line(),
        "trace replay finished"
    );

    match cli.format {
        ReportFormat::Text => print!("{}", report::render_text(&stats)),
        ReportFormat::Json => println!("{}", report::render_json(sim.config(), &stats)?),
    }

    Ok(())
}
