//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use terminal_size::{terminal_size, Width};

use super::bench::format_duration;
use super::timer::VariantResult;
use crate::registry::{TaskBench, TaskRegistry};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

pub fn print_task_info_box(task: &dyn TaskBench) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Task:      {}", task.name()),
        format!("Category:  {}", task.category()),
        task.description().to_string(),
        format!("Variants:  {}", task.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print results table for a single input size.
///
/// The first row is the baseline for the speedup column; the last column
/// flags rows whose result disagrees with the baseline.
pub fn print_results_table(results: &[VariantResult], size: usize) {
    let Some(baseline) = results.first() else {
        return;
    };

    let variant_col_width = get_term_width().saturating_sub(66).max(15);
    let table_width = variant_col_width + 60;
    let baseline_ns = baseline.avg_time.as_nanos().max(1) as f64;

    println!("  Size: {} ({} runs)", size, baseline.runs);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>8} {:>3}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "OK",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let avg_ns = result.avg_time.as_nanos() as f64;
        let speedup = if avg_ns > 0.0 { baseline_ns / avg_ns } else { 0.0 };
        let cv = if avg_ns > 0.0 {
            result.std_dev.as_nanos() as f64 / avg_ns
        } else {
            0.0
        };
        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>7.2}% {:>3}",
            truncate(&result.name, variant_col_width),
            format_duration(result.avg_time),
            format_duration(result.min_time),
            format_duration(result.max_time),
            speedup,
            cv * 100.0,
            agreement_mark(result.result_sample, baseline.result_sample),
            v_width = variant_col_width
        );
    }
    println!();
}

/// `✓` when a row matches the baseline, `✗` when it differs, `?` when the
/// baseline produced a value but the row did not.
fn agreement_mark(row: Option<i64>, baseline: Option<i64>) -> &'static str {
    match (row, baseline) {
        (Some(r), Some(b)) if r == b => "✓",
        (Some(_), Some(_)) => "✗",
        (None, Some(_)) => "?",
        (_, None) => "✓",
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Sequential Task Benchmarks ";
    let padding = term_width.saturating_sub(title.len()) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

pub fn print_help() {
    println!("Usage: seq-tasks [OPTIONS] [TASK]");
    println!();
    println!("Options:");
    println!("  --list, -l       List all available tasks");
    println!("  --help, -h       Show this help message");
    println!("  --sizes SIZES    Comma-separated vector sizes (default: 64,256,1024,4096,16384)");
    println!("  --runs N, -r N   Number of measurement runs per variant (default: 30)");
    println!("  --seed N         Random seed for reproducible inputs and ordering (default: time-based)");
    println!("  --csv PATH       Export raw timings to CSV");
    println!("  --perf           Time whole task pipelines instead of comparing variants");
    println!();
    println!("Arguments:");
    println!("  TASK             Name of a specific task to run (omit for all)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Log filter (default: seq_tasks=info)");
    println!();
    println!("Examples:");
    println!("  seq-tasks                     # Run all tasks");
    println!("  seq-tasks dot_product         # Run only dot_product");
    println!("  seq-tasks --sizes 128,512     # Custom sizes");
    println!("  seq-tasks --seed 12345        # Reproducible run");
    println!("  seq-tasks --csv data.csv      # Export raw timings to CSV");
    println!("  seq-tasks --perf --runs 100   # Pipeline and run-stage timings");
}

pub fn print_available_tasks(registry: &TaskRegistry) {
    println!("Available tasks:");
    println!();
    for task in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            task.name(),
            task.category(),
            task.description()
        );
    }
}
