//! Repeated timing of whole task pipelines.
//!
//! A task instance is single-use, so every measured run builds a fresh task
//! from the closure the caller supplies.

use std::fmt;
use std::time::{Duration, Instant};

use super::{StageTimings, TaskError, TaskResult};
use crate::utils::bench::compute_stats;
use crate::utils::cpu_affinity::CpuPinGuard;

/// What a perf run reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerfMode {
    /// Whole pipeline, including task construction
    Pipeline,
    /// The `run` stage only
    TaskRun,
}

impl fmt::Display for PerfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfMode::Pipeline => f.write_str("pipeline"),
            PerfMode::TaskRun => f.write_str("task_run"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PerfAttr {
    /// Number of measured runs (default: 10)
    pub num_running: usize,
    /// Upper bound on the average time accepted by `check_perf_results`
    /// (default: 10 s)
    pub max_time: Duration,
    pub pin_to_core: bool,
}

impl Default for PerfAttr {
    fn default() -> Self {
        Self {
            num_running: 10,
            max_time: Duration::from_secs(10),
            pin_to_core: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerfResults {
    pub mode: PerfMode,
    pub num_running: usize,
    /// Average over all runs
    pub time: Duration,
    pub min: Duration,
    pub max: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct Perf {
    attr: PerfAttr,
}

impl Perf {
    pub fn new(attr: PerfAttr) -> Self {
        Self { attr }
    }

    pub fn attr(&self) -> &PerfAttr {
        &self.attr
    }

    /// Time `pipeline` end to end, `num_running` times.
    ///
    /// `pipeline` must build a fresh task and drive it through every stage,
    /// typically with [`TaskRunner::run_pipeline`](super::TaskRunner::run_pipeline).
    pub fn pipeline_run<F>(&self, mut pipeline: F) -> TaskResult<PerfResults>
    where
        F: FnMut() -> TaskResult<StageTimings>,
    {
        self.common_run(PerfMode::Pipeline, || {
            let start = Instant::now();
            pipeline()?;
            Ok(start.elapsed())
        })
    }

    /// Like [`pipeline_run`](Self::pipeline_run) but only the `run` stage
    /// counts.
    pub fn task_run<F>(&self, mut pipeline: F) -> TaskResult<PerfResults>
    where
        F: FnMut() -> TaskResult<StageTimings>,
    {
        self.common_run(PerfMode::TaskRun, || pipeline().map(|t| t.run))
    }

    /// Fail when the average time is above `max_time`.
    pub fn check_perf_results(&self, results: &PerfResults) -> TaskResult<()> {
        if results.time > self.attr.max_time {
            return Err(TaskError::PerfTimeLimitExceeded {
                elapsed: results.time,
                limit: self.attr.max_time,
            });
        }
        Ok(())
    }

    fn common_run<F>(&self, mode: PerfMode, mut measure: F) -> TaskResult<PerfResults>
    where
        F: FnMut() -> TaskResult<Duration>,
    {
        let runs = self.attr.num_running.max(1);
        let _pin = self.attr.pin_to_core.then(CpuPinGuard::new);

        let mut times = Vec::with_capacity(runs);
        for _ in 0..runs {
            times.push(measure()?);
        }

        let stats = compute_stats(&times);
        tracing::info!(%mode, runs, avg = ?stats.avg, "perf run finished");

        Ok(PerfResults {
            mode,
            num_running: runs,
            time: stats.avg,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_perf() -> Perf {
        Perf::new(PerfAttr {
            num_running: 4,
            pin_to_core: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_pipeline_run_calls_pipeline_each_time() {
        let mut calls = 0;
        let results = quick_perf()
            .pipeline_run(|| {
                calls += 1;
                Ok(StageTimings::default())
            })
            .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(results.mode, PerfMode::Pipeline);
        assert_eq!(results.num_running, 4);
        assert!(results.min <= results.time && results.time <= results.max);
    }

    #[test]
    fn test_task_run_reports_run_stage() {
        let timings = StageTimings {
            run: Duration::from_millis(3),
            post_processing: Duration::from_secs(1),
            ..Default::default()
        };
        let results = quick_perf().task_run(|| Ok(timings)).unwrap();

        assert_eq!(results.mode, PerfMode::TaskRun);
        assert_eq!(results.time, Duration::from_millis(3));
    }

    #[test]
    fn test_errors_propagate() {
        let err = quick_perf()
            .pipeline_run(|| Err(TaskError::ValidationFailed { task: "t" }))
            .unwrap_err();
        assert_eq!(err, TaskError::ValidationFailed { task: "t" });
    }

    #[test]
    fn test_check_perf_results() {
        let perf = Perf::new(PerfAttr {
            max_time: Duration::from_millis(5),
            ..Default::default()
        });
        let mut results = PerfResults {
            mode: PerfMode::Pipeline,
            num_running: 1,
            time: Duration::from_millis(1),
            min: Duration::from_millis(1),
            max: Duration::from_millis(1),
        };
        assert!(perf.check_perf_results(&results).is_ok());

        results.time = Duration::from_millis(6);
        assert_eq!(
            perf.check_perf_results(&results),
            Err(TaskError::PerfTimeLimitExceeded {
                elapsed: Duration::from_millis(6),
                limit: Duration::from_millis(5),
            })
        );
    }
}
