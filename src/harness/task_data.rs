//! Typed input/output buffers handed to a task.

/// Buffers a task reads from and writes to.
///
/// Inputs and outputs are kept in registration order; the length of each
/// slice is its declared element count.
#[derive(Debug)]
pub struct TaskData<'a, I, O> {
    pub inputs: Vec<&'a [I]>,
    pub outputs: Vec<&'a mut [O]>,
}

impl<'a, I, O> TaskData<'a, I, O> {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Register the next input buffer
    pub fn with_input(mut self, input: &'a [I]) -> Self {
        self.inputs.push(input);
        self
    }

    /// Register the next output buffer
    pub fn with_output(mut self, output: &'a mut [O]) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn inputs_count(&self) -> Vec<usize> {
        self.inputs.iter().map(|i| i.len()).collect()
    }

    pub fn outputs_count(&self) -> Vec<usize> {
        self.outputs.iter().map(|o| o.len()).collect()
    }
}

impl<I, O> Default for TaskData<'_, I, O> {
    fn default() -> Self {
        Self::new()
    }
}
