//! Generic CLI for benchmarking tasks.
//!
//! Usage:
//!   seq-tasks              # Run all tasks
//!   seq-tasks --list       # List available tasks
//!   seq-tasks dot_product  # Run specific task
//!   seq-tasks --help       # Show help

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use seq_tasks::harness::{Perf, PerfAttr};
use seq_tasks::registry::{build_registry, TaskBench};
use seq_tasks::utils::runner::export_csv;
use seq_tasks::utils::{time_seed, TimingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Options parsed from the command line
#[derive(Debug)]
struct CliOptions {
    show_list: bool,
    show_help: bool,
    perf: bool,
    sizes: Vec<usize>,
    runs: usize,
    seed: Option<u64>,
    csv_path: Option<String>,
    task_filter: Option<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            show_list: false,
            show_help: false,
            perf: false,
            sizes: vec![64, 256, 1024, 4096, 16384],
            runs: TimingConfig::default().runs_per_variant,
            seed: None,
            csv_path: None,
            task_filter: None,
        }
    }
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Self::default();

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--list" | "-l" => opts.show_list = true,
                "--help" | "-h" => opts.show_help = true,
                "--perf" => opts.perf = true,
                "--sizes" => {
                    let value = iter.next().ok_or("--sizes needs a value")?;
                    opts.sizes = value
                        .split(',')
                        .filter_map(|s| s.trim().parse().ok())
                        .collect();
                    if opts.sizes.is_empty() {
                        return Err(format!("No valid size in '{}'", value));
                    }
                }
                "--runs" | "-r" => {
                    let value = iter.next().ok_or("--runs needs a value")?;
                    opts.runs = value
                        .parse()
                        .map_err(|_| format!("Invalid run count '{}'", value))?;
                }
                "--seed" => {
                    let value = iter.next().ok_or("--seed needs a value")?;
                    opts.seed = Some(
                        value
                            .parse()
                            .map_err(|_| format!("Invalid seed '{}'", value))?,
                    );
                }
                "--csv" => {
                    opts.csv_path = Some(iter.next().ok_or("--csv needs a path")?.clone());
                }
                other if !other.starts_with('-') => opts.task_filter = Some(other.to_string()),
                other => return Err(format!("Unknown option: {}", other)),
            }
        }

        Ok(opts)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "seq_tasks=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_perf(tasks: &[&dyn TaskBench], opts: &CliOptions) -> Result<(), String> {
    let perf = Perf::new(PerfAttr {
        num_running: opts.runs.max(1),
        ..Default::default()
    });
    let seed = opts.seed.unwrap_or_else(time_seed);

    for task in tasks {
        for &size in &opts.sizes {
            let results = task
                .perf_run(size, seed, &perf)
                .map_err(|e| format!("{}: {}", task.name(), e))?;
            for r in results {
                println!(
                    "  {:<16} size {:>8}  {:<9} avg {:?} (min {:?}, max {:?}, {} runs)",
                    task.name(),
                    size,
                    r.mode.to_string(),
                    r.time,
                    r.min,
                    r.max,
                    r.num_running
                );
            }
        }
    }

    Ok(())
}

fn run(opts: &CliOptions) -> Result<(), String> {
    let registry = build_registry();

    if opts.show_help {
        seq_tasks::tui::print_help();
        return Ok(());
    }

    if opts.show_list {
        seq_tasks::tui::print_available_tasks(&registry);
        return Ok(());
    }

    let tasks: Vec<&dyn TaskBench> = match &opts.task_filter {
        Some(name) => vec![registry.find(name).ok_or_else(|| {
            format!("Task '{}' not found. Available: {:?}", name, registry.list_names())
        })?],
        None => registry.all().iter().map(|t| t.as_ref()).collect(),
    };

    seq_tasks::tui::print_header();

    if opts.perf {
        return run_perf(&tasks, opts);
    }

    let config = TimingConfig {
        runs_per_variant: opts.runs.max(1),
        seed: opts.seed,
        ..Default::default()
    };
    let raw = seq_tasks::run_benchmarks(&tasks, &opts.sizes, &config).map_err(|e| e.to_string())?;

    if let Some(path) = &opts.csv_path {
        let file = File::create(path).map_err(|e| format!("{}: {}", path, e))?;
        export_csv(BufWriter::new(file), &raw).map_err(|e| format!("{}: {}", path, e))?;
        tracing::info!(path = %path, rows = raw.len(), "raw timings exported");
    }

    println!("Note: Speedup is relative to the first variant ('original').");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let result = CliOptions::parse(&args).and_then(|opts| run(&opts));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
