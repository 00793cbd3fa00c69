//! # Task Harness
//!
//! Every task goes through the same four stages, in this order:
//!
//! `validation → pre_processing → run → post_processing`
//!
//! A [`Task`] only implements the stage hooks. [`TaskRunner`] owns the task,
//! tracks which [`Stage`] it reached, rejects calls made out of order and
//! times each stage.

pub mod error;
pub mod perf;
pub mod task_data;

pub use error::{TaskError, TaskResult};
pub use perf::{Perf, PerfAttr, PerfMode, PerfResults};
pub use task_data::TaskData;

use std::fmt;
use std::time::{Duration, Instant};

/// Position of a task in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Created,
    Validated,
    PreProcessed,
    Ran,
    PostProcessed,
}

impl Stage {
    /// The only stage reachable from `self`, `None` once the task is done.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Created => Some(Stage::Validated),
            Stage::Validated => Some(Stage::PreProcessed),
            Stage::PreProcessed => Some(Stage::Ran),
            Stage::Ran => Some(Stage::PostProcessed),
            Stage::PostProcessed => None,
        }
    }

    pub fn is_done(self) -> bool {
        self == Stage::PostProcessed
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Created => "created",
            Stage::Validated => "validated",
            Stage::PreProcessed => "pre-processed",
            Stage::Ran => "ran",
            Stage::PostProcessed => "post-processed",
        };
        f.write_str(name)
    }
}

/// A unit of computation over externally supplied buffers.
///
/// Hooks are called by [`TaskRunner`], which guarantees each one runs at most
/// once and only after the previous hook succeeded.
pub trait Task {
    /// Short identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Check that the registered buffers have the expected arity and sizes.
    fn validation(&mut self) -> bool;

    /// Copy inputs into task-owned storage.
    fn pre_processing(&mut self) -> TaskResult<()>;

    /// Compute the result.
    fn run(&mut self) -> TaskResult<()>;

    /// Write the result back to the output buffers.
    fn post_processing(&mut self) -> TaskResult<()>;
}

/// Wall-clock time spent in each stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub validation: Duration,
    pub pre_processing: Duration,
    pub run: Duration,
    pub post_processing: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.validation + self.pre_processing + self.run + self.post_processing
    }

    fn record(&mut self, stage: Stage, elapsed: Duration) {
        match stage {
            Stage::Validated => self.validation = elapsed,
            Stage::PreProcessed => self.pre_processing = elapsed,
            Stage::Ran => self.run = elapsed,
            Stage::PostProcessed => self.post_processing = elapsed,
            Stage::Created => {}
        }
    }
}

/// Drives a [`Task`] through its stages.
#[derive(Debug)]
pub struct TaskRunner<T> {
    task: T,
    stage: Stage,
    timings: StageTimings,
}

impl<T: Task> TaskRunner<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            stage: Stage::Created,
            timings: StageTimings::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn timings(&self) -> StageTimings {
        self.timings
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn into_inner(self) -> T {
        self.task
    }

    /// Run the validation hook. A rejected task stays in [`Stage::Created`],
    /// so every later stage fails with [`TaskError::OutOfOrder`].
    pub fn validation(&mut self) -> TaskResult<()> {
        self.check_order(Stage::Validated)?;

        let start = Instant::now();
        let valid = self.task.validation();
        self.timings.record(Stage::Validated, start.elapsed());

        if !valid {
            tracing::warn!(task = self.task.name(), "validation rejected task data");
            return Err(TaskError::ValidationFailed {
                task: self.task.name(),
            });
        }

        self.stage = Stage::Validated;
        tracing::trace!(task = self.task.name(), stage = %self.stage, "stage complete");
        Ok(())
    }

    pub fn pre_processing(&mut self) -> TaskResult<()> {
        self.step(Stage::PreProcessed, T::pre_processing)
    }

    pub fn run(&mut self) -> TaskResult<()> {
        self.step(Stage::Ran, T::run)
    }

    pub fn post_processing(&mut self) -> TaskResult<()> {
        self.step(Stage::PostProcessed, T::post_processing)
    }

    /// Run all four stages and return how long each one took.
    pub fn run_pipeline(&mut self) -> TaskResult<StageTimings> {
        self.validation()?;
        self.pre_processing()?;
        self.run()?;
        self.post_processing()?;

        tracing::debug!(
            task = self.task.name(),
            total = ?self.timings.total(),
            "pipeline finished"
        );
        Ok(self.timings)
    }

    fn step(&mut self, next: Stage, hook: fn(&mut T) -> TaskResult<()>) -> TaskResult<()> {
        self.check_order(next)?;

        let start = Instant::now();
        hook(&mut self.task)?;
        self.timings.record(next, start.elapsed());

        self.stage = next;
        tracing::trace!(task = self.task.name(), stage = %self.stage, "stage complete");
        Ok(())
    }

    fn check_order(&self, attempted: Stage) -> TaskResult<()> {
        if self.stage.next() == Some(attempted) {
            return Ok(());
        }
        tracing::warn!(
            task = self.task.name(),
            current = %self.stage,
            attempted = %attempted,
            "stage called out of order"
        );
        Err(TaskError::OutOfOrder {
            current: self.stage,
            attempted,
        })
    }
}
