//! `flowcost`: run the control-flow cost suite and print one line per
//! benchmark on stdout.
//!
//! Logs go to stderr, filtered by `FLOWCOST_LOG` (falling back to
//! `RUST_LOG`), so stdout stays machine-parsable.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use flowcost_core::{Fixtures, Registry};
use flowcost_harness::{BenchTime, CountingAllocator, Reporter, RunConfig, Runner};
use tracing::error;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

const LOG_ENV: &str = "FLOWCOST_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "flowcost",
    author,
    version,
    about = "Measure the relative cost of Rust control-flow constructs",
    long_about = None,
    after_help = "Only relative ordering within one run is meaningful."
)]
struct CliArgs {
    /// Run only benchmarks whose name contains PATTERN
    #[arg(value_name = "PATTERN")]
    pattern: Option<String>,

    /// Same as the positional PATTERN
    #[arg(long = "bench", value_name = "PATTERN", conflicts_with = "pattern")]
    bench: Option<String>,

    /// Minimum time per benchmark (500ms, 1s, 2.5s) or a fixed count (1000x)
    #[arg(long, value_name = "DUR|Nx", default_value = "1s")]
    benchtime: BenchTime,

    /// Run each benchmark this many times
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Print registered benchmarks and exit
    #[arg(long)]
    list: bool,

    /// Omit the B/op and allocs/op columns
    #[arg(long)]
    no_allocs: bool,
}

impl CliArgs {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            bench_time: self.benchtime,
            count: self.count,
            pattern: self.bench.clone().or_else(|| self.pattern.clone()),
            report_allocs: !self.no_allocs,
            ..RunConfig::default()
        }
    }
}

/// Write one `name  summary` line per registered benchmark.
fn write_list<W: Write>(mut out: W, registry: &Registry, width: usize) -> io::Result<()> {
    for d in registry.iter() {
        writeln!(out, "{:<width$}  {}", d.name, d.summary)?;
    }
    out.flush()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let args = CliArgs::parse();
    let registry = flowcost_bench::suite().context("assembling benchmark suite")?;
    let width = registry.iter().map(|d| d.name.len()).max().unwrap_or(0);

    if args.list {
        return match write_list(io::stdout().lock(), &registry, width) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(ExitCode::SUCCESS),
            Err(e) => Err(e).context("writing benchmark list"),
        };
    }

    let runner = Runner::new(args.run_config()).context("invalid run configuration")?;
    let fixtures = Fixtures::build().context("building fixtures")?;

    let mut reporter =
        Reporter::new(io::stdout().lock(), runner.counts_allocations()).with_name_width(width);
    let summary = runner.run_all(&registry, &fixtures, &mut reporter)?;

    if summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(failed = summary.failed, "some benchmarks failed");
        Ok(ExitCode::FAILURE)
    }
}
