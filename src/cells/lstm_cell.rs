use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Hidden and cell state of an LSTM, each of shape `[batch, hidden_size]`.
///
/// Built fresh for every call; models never keep one between forward passes.
#[derive(Debug, Clone)]
pub struct LstmState<B: Backend> {
    pub hidden: Tensor<B, 2>,
    pub cell: Tensor<B, 2>,
}

impl<B: Backend> LstmState<B> {
    /// All-zero initial state.
    pub fn zeros(batch_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            hidden: Tensor::zeros([batch_size, hidden_size], device),
            cell: Tensor::zeros([batch_size, hidden_size], device),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.hidden.dims()[0]
    }
}

/// Activated gate values of one LSTM step.
///
/// `candidate` is the tanh-squashed cell input (`g`); the three gates are
/// sigmoids.
#[derive(Debug, Clone)]
pub struct LstmGates<B: Backend> {
    pub input: Tensor<B, 2>,
    pub forget: Tensor<B, 2>,
    pub candidate: Tensor<B, 2>,
    pub output: Tensor<B, 2>,
}

/// Standard LSTM cell
///
/// Gate layout follows the usual `(i, f, g, o)` ordering:
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + forget_bias)
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
#[derive(Module, Debug)]
pub struct LSTMCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    forget_bias: f32,
    input_map: Linear<B>,     // Maps input to 4 * hidden_size (with bias)
    recurrent_map: Linear<B>, // Maps hidden state to 4 * hidden_size (no bias)
}

impl<B: Backend> LSTMCell<B> {
    /// Create a new LSTM cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 4 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 4 * hidden_size)
            .with_bias(false)
            .init(device);

        Self {
            input_size,
            hidden_size,
            forget_bias: 0.0,
            input_map,
            recurrent_map,
        }
    }

    /// Constant added to the forget gate pre-activation (default 0.0)
    pub fn with_forget_bias(mut self, forget_bias: f32) -> Self {
        self.forget_bias = forget_bias;
        self
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Compute the activated gates for one timestep without updating state.
    ///
    /// `input` is `[batch, input_size]`, `hidden` is `[batch, hidden_size]`.
    pub fn gates(&self, input: Tensor<B, 2>, hidden: Tensor<B, 2>) -> LstmGates<B> {
        let z = self.input_map.forward(input) + self.recurrent_map.forward(hidden);

        let chunks = z.chunk(4, 1);

        LstmGates {
            input: activation::sigmoid(chunks[0].clone()),
            forget: activation::sigmoid(chunks[1].clone() + self.forget_bias),
            candidate: chunks[2].clone().tanh(),
            output: activation::sigmoid(chunks[3].clone()),
        }
    }

    /// Perform a forward pass through the LSTM cell
    ///
    /// # Returns
    /// The updated state, each tensor of shape `[batch_size, hidden_size]`
    pub fn forward(&self, input: Tensor<B, 2>, state: LstmState<B>) -> LstmState<B> {
        let LstmState { hidden, cell } = state;
        let gates = self.gates(input, hidden);

        let cell = cell * gates.forget + gates.input * gates.candidate;
        let hidden = cell.clone().tanh() * gates.output;

        LstmState { hidden, cell }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    #[test]
    fn test_lstm_cell_creation() {
        let device = get_test_device();
        let cell = LSTMCell::<TestBackend>::new(3, 8, &device);

        assert_eq!(cell.input_size(), 3);
        assert_eq!(cell.hidden_size(), 8);
    }

    #[test]
    fn test_lstm_forward_shapes() {
        let device = get_test_device();
        let cell = LSTMCell::<TestBackend>::new(3, 8, &device);

        for batch_size in [1, 5, 16] {
            let input = Tensor::<TestBackend, 2>::zeros([batch_size, 3], &device);
            let state = LstmState::zeros(batch_size, 8, &device);

            let next = cell.forward(input, state);

            assert_eq!(next.hidden.dims(), [batch_size, 8]);
            assert_eq!(next.cell.dims(), [batch_size, 8]);
            assert_eq!(next.batch_size(), batch_size);
        }
    }

    #[test]
    fn test_lstm_gate_ranges() {
        let device = get_test_device();
        let cell = LSTMCell::<TestBackend>::new(4, 6, &device);

        let input = Tensor::<TestBackend, 2>::random(
            [7, 4],
            burn::tensor::Distribution::Uniform(-3.0, 3.0),
            &device,
        );
        let hidden = Tensor::<TestBackend, 2>::random(
            [7, 6],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let gates = cell.gates(input, hidden);

        for gate in [gates.input, gates.forget, gates.output] {
            let values = gate.into_data().to_vec::<f32>().unwrap();
            assert!(values.iter().all(|v| *v > 0.0 && *v < 1.0));
        }
        let candidate = gates.candidate.into_data().to_vec::<f32>().unwrap();
        assert!(candidate.iter().all(|v| *v > -1.0 && *v < 1.0));
    }

    #[test]
    fn test_lstm_state_evolves() {
        let device = get_test_device();
        let cell = LSTMCell::<TestBackend>::new(10, 20, &device);

        let mut state = LstmState::zeros(1, 20, &device);
        for _ in 0..3 {
            let input = Tensor::<TestBackend, 2>::random(
                [1, 10],
                burn::tensor::Distribution::Uniform(0.0, 1.0),
                &device,
            );
            state = cell.forward(input, state);
        }

        let h_sum = state.hidden.abs().sum().into_scalar();
        let c_sum = state.cell.abs().sum().into_scalar();
        assert!(
            h_sum > 0.0 || c_sum > 0.0,
            "States should have changed after processing sequence"
        );
    }

    #[test]
    fn test_lstm_forget_bias_shifts_gate() {
        let device = get_test_device();
        let plain = LSTMCell::<TestBackend>::new(2, 4, &device);
        let biased = LSTMCell::<TestBackend>::new(2, 4, &device).with_forget_bias(50.0);

        let input = Tensor::<TestBackend, 2>::zeros([1, 2], &device);
        let hidden = Tensor::<TestBackend, 2>::zeros([1, 4], &device);

        // Zero input and state leave only the input bias, which is bounded by
        // the default initialiser, so a large offset saturates the gate.
        let biased_forget = biased.gates(input.clone(), hidden.clone()).forget;
        let values = biased_forget.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| *v > 0.99));

        let plain_forget = plain.gates(input, hidden).forget;
        let values = plain_forget.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| *v < 0.99));
    }
}
