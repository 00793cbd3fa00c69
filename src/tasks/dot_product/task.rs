//! Sequential dot product task.

use super::code::calculate_dot_product;
use crate::harness::{Task, TaskData, TaskError, TaskResult};

/// Computes the dot product of two input vectors into a single output slot.
///
/// Expects exactly two inputs of equal length and one output of length 1.
#[derive(Debug)]
pub struct VectorDotProduct<'a> {
    task_data: TaskData<'a, i32, i64>,
    input_1: Vec<i32>,
    input_2: Vec<i32>,
    result: i64,
}

impl<'a> VectorDotProduct<'a> {
    pub fn new(task_data: TaskData<'a, i32, i64>) -> Self {
        Self {
            task_data,
            input_1: Vec::new(),
            input_2: Vec::new(),
            result: 0,
        }
    }

    /// Result of the last `run`, 0 before that
    pub fn result(&self) -> i64 {
        self.result
    }

    fn input(&self, index: usize) -> TaskResult<&'a [i32]> {
        self.task_data
            .inputs
            .get(index)
            .copied()
            .ok_or(TaskError::MissingBuffer {
                kind: "input",
                index,
            })
    }
}

impl Task for VectorDotProduct<'_> {
    fn name(&self) -> &'static str {
        "dot_product"
    }

    fn validation(&mut self) -> bool {
        let inputs = self.task_data.inputs_count();
        let outputs = self.task_data.outputs_count();

        inputs.len() == 2 && outputs.len() == 1 && inputs[0] == inputs[1] && outputs[0] == 1
    }

    fn pre_processing(&mut self) -> TaskResult<()> {
        self.input_1 = self.input(0)?.to_vec();
        self.input_2 = self.input(1)?.to_vec();
        Ok(())
    }

    fn run(&mut self) -> TaskResult<()> {
        self.result = calculate_dot_product(&self.input_1, &self.input_2)?;
        tracing::debug!(len = self.input_1.len(), result = self.result, "dot product computed");
        Ok(())
    }

    fn post_processing(&mut self) -> TaskResult<()> {
        let slot = self
            .task_data
            .outputs
            .first_mut()
            .and_then(|out| out.first_mut())
            .ok_or(TaskError::MissingBuffer {
                kind: "output",
                index: 0,
            })?;
        *slot = self.result;
        Ok(())
    }
}
