//! Error types shared by every task.

use std::time::Duration;

use thiserror::Error;

use super::Stage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Validation failed for task '{task}'.")]
    ValidationFailed { task: &'static str },
    #[error("Cannot move task from '{current}' to '{attempted}'.")]
    OutOfOrder { current: Stage, attempted: Stage },
    #[error("Vector length mismatch: {left} != {right}.")]
    LengthMismatch { left: usize, right: usize },
    #[error("Dot product overflowed the 64-bit accumulator.")]
    Overflow,
    #[error("No {kind} buffer registered at index {index}.")]
    MissingBuffer { kind: &'static str, index: usize },
    #[error("Variant '{variant}' returned {actual}, expected {expected}.")]
    VerificationFailed {
        variant: &'static str,
        expected: i64,
        actual: i64,
    },
    #[error("Average time {elapsed:?} exceeds the limit of {limit:?}.")]
    PerfTimeLimitExceeded { elapsed: Duration, limit: Duration },
}

pub type TaskResult<T> = Result<T, TaskError>;
