//! Benchmark driver and CSV export.

use std::io::{self, Write};

use crate::harness::TaskResult;
use crate::registry::TaskBench;
use crate::utils::timer::{TimingConfig, VariantResult};
use crate::utils::tui;

/// One raw timing sample, as exported to CSV
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTimingData {
    pub task: String,
    pub variant: String,
    pub input_size: usize,
    pub sample: usize,
    pub time_ns: u64,
    pub result: Option<i64>,
}

/// Flatten measured variants into raw rows
pub fn collect_raw(task: &str, input_size: usize, results: &[VariantResult]) -> Vec<RawTimingData> {
    results
        .iter()
        .flat_map(|r| {
            r.samples.iter().enumerate().map(move |(sample, t)| RawTimingData {
                task: task.to_string(),
                variant: r.name.clone(),
                input_size,
                sample,
                time_ns: t.as_nanos() as u64,
                result: r.result_sample,
            })
        })
        .collect()
}

/// Write raw rows as CSV
pub fn export_csv<W: Write>(mut writer: W, data: &[RawTimingData]) -> io::Result<()> {
    writeln!(writer, "task,variant,input_size,sample,time_ns,result")?;

    for entry in data {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            entry.task,
            entry.variant,
            entry.input_size,
            entry.sample,
            entry.time_ns,
            entry.result.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    writer.flush()
}

/// Verify, benchmark and print every task at every size.
///
/// Returns all raw samples so the caller can export them.
pub fn run_benchmarks(
    tasks: &[&dyn TaskBench],
    sizes: &[usize],
    config: &TimingConfig,
) -> TaskResult<Vec<RawTimingData>> {
    let mut raw = Vec::new();

    for task in tasks {
        task.verify()?;
        tracing::info!(task = task.name(), "variants verified");

        tui::print_task_info_box(*task);
        for &size in sizes {
            let results = task.run_benchmarks(size, config);
            tui::print_results_table(&results, size);
            raw.extend(collect_raw(task.name(), size, &results));
        }
    }

    Ok(raw)
}
