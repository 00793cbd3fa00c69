//! # seq-tasks
//!
//! Sequential computational tasks behind a common four-stage harness
//! (validation, pre-processing, run, post-processing), with tools to verify
//! and benchmark their kernels.

pub mod harness;
pub mod registry;
pub mod tasks;
pub mod utils;

pub use utils::tui;

/// Re-export run_benchmarks from utils::runner
pub use utils::runner::run_benchmarks;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::harness::{Stage, Task, TaskData, TaskError, TaskResult, TaskRunner};
    pub use crate::registry::{build_registry, TaskBench, TaskRegistry};
    pub use crate::tasks::dot_product::{calculate_dot_product, VectorDotProduct};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_tasks_registry_verify() {
        let registry = build_registry();

        for task in registry.all() {
            if let Err(e) = task.verify() {
                panic!("Task '{}' failed verification: {}", task.name(), e);
            }
        }
    }
}
