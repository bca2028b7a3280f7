//! LSTM sequence layer
//!
//! Runs an [`LSTMCell`] over every timestep of a batch and keeps the final
//! state.

use crate::cells::{LSTMCell, LstmState};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// LSTM RNN Layer
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct Lstm<B: Backend> {
    cell: LSTMCell<B>,
    /// Whether input is batch-first
    batch_first: bool,
}

impl<B: Backend> Lstm<B> {
    /// Create a new batch-first LSTM layer
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Number of hidden units
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            cell: LSTMCell::new(input_size, hidden_size, device),
            batch_first: true,
        }
    }

    /// Set whether input is batch-first (default: true)
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Zero state for a batch of `batch_size` sequences on `device`.
    pub fn initial_state(&self, batch_size: usize, device: &B::Device) -> LstmState<B> {
        LstmState::zeros(batch_size, self.hidden_size(), device)
    }

    /// Forward pass through the LSTM layer
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape:
    ///   - 3D: [batch, seq, features] if batch_first=true
    ///   - 3D: [seq, batch, features] if batch_first=false
    /// * `state` - Initial state; zeros when `None`
    ///
    /// # Returns
    /// Tuple of (output, final_state). `output` follows the input layout:
    /// `[batch, seq, hidden_size]` if batch_first, else `[seq, batch, hidden_size]`
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 3>, LstmState<B>) {
        let device = input.device();
        let dims = input.dims();
        let (batch_size, seq_len) = if self.batch_first {
            (dims[0], dims[1])
        } else {
            (dims[1], dims[0])
        };

        let mut state = state.unwrap_or_else(|| self.initial_state(batch_size, &device));
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            let step_input = if self.batch_first {
                input.clone().narrow(1, t, 1).squeeze(1)
            } else {
                input.clone().narrow(0, t, 1).squeeze(0)
            };

            state = self.cell.forward(step_input, state);
            outputs.push(state.hidden.clone());
        }

        let time_dim = if self.batch_first { 1 } else { 0 };
        let output = Tensor::stack(outputs, time_dim);
        (output, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_lstm_layer_forward() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(3, 8, &device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 10, 3], &device);
        let (output, state) = lstm.forward(input, None);

        assert_eq!(output.dims(), [4, 10, 8]);
        assert_eq!(state.hidden.dims(), [4, 8]);
        assert_eq!(state.cell.dims(), [4, 8]);
    }

    #[test]
    fn test_lstm_layer_last_output_is_final_hidden() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(2, 5, &device);

        let input = Tensor::<TestBackend, 3>::random([3, 6, 2], Distribution::Default, &device);
        let (output, state) = lstm.forward(input, None);

        let last: Tensor<TestBackend, 2> = output.narrow(1, 5, 1).squeeze(1);
        let diff = (last - state.hidden).abs().max().into_scalar();
        assert!(diff < 1e-6);
    }

    #[test]
    fn test_lstm_layer_explicit_zero_state_matches_default() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(2, 4, &device);

        let input = Tensor::<TestBackend, 3>::random([2, 5, 2], Distribution::Default, &device);
        let (_, implicit) = lstm.forward(input.clone(), None);
        let (_, explicit) = lstm.forward(input, Some(lstm.initial_state(2, &device)));

        let diff = (implicit.hidden - explicit.hidden).abs().max().into_scalar();
        assert!(diff < 1e-6);
    }

    #[test]
    fn test_lstm_layer_seq_first() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(3, 8, &device).with_batch_first(false);

        // [seq, batch, features]
        let input = Tensor::<TestBackend, 3>::zeros([10, 4, 3], &device);
        let (output, state) = lstm.forward(input, None);

        assert_eq!(output.dims(), [10, 4, 8]);
        assert_eq!(state.hidden.dims(), [4, 8]);
    }
}
