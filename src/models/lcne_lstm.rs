//! LC-NE network with an LSTM cortex
//!
//! One call advances the network by one trial. The LC population integrates
//! the input with its own previous activity and the previous cortical
//! activity; NE, released from LC, scales how much of the LSTM candidate
//! enters the cortical cell state:
//!
//! ```text
//! lc      = tanh(W_x·x + W_l·lc_prev + W_c·cortex_prev)
//! ne      = σ(W_ne·lc)
//! c'      = f ⊙ c + (i ⊙ ne) ⊙ g
//! cortex  = o ⊙ tanh(c')
//! pupil   = W_p·ne
//! ```

use crate::cells::{GateSignals, LSTMCell};
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Previous LC, cortex and cell state, each `[batch, hidden]`.
#[derive(Debug, Clone)]
pub struct LcneLstmState<B: Backend> {
    pub lc: Tensor<B, 2>,
    pub cortex: Tensor<B, 2>,
    pub cell: Tensor<B, 2>,
}

impl<B: Backend> LcneLstmState<B> {
    pub fn zeros(batch_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            lc: Tensor::zeros([batch_size, hidden_size], device),
            cortex: Tensor::zeros([batch_size, hidden_size], device),
            cell: Tensor::zeros([batch_size, hidden_size], device),
        }
    }
}

/// Result of one [`LcneLstm`] step.
#[derive(Debug, Clone)]
pub struct LcneLstmOutput<B: Backend> {
    pub lc: Tensor<B, 2>,
    pub ne: Tensor<B, 2>,
    pub cortex: Tensor<B, 2>,
    /// `[batch, 1]`
    pub pupil: Tensor<B, 2>,
    pub cell: Tensor<B, 2>,
    /// Cortical gates; present only from [`LcneLstm::forward_with_activations`]
    pub gates: Option<GateSignals<B>>,
}

impl<B: Backend> LcneLstmOutput<B> {
    /// State to feed into the next step.
    pub fn state(&self) -> LcneLstmState<B> {
        LcneLstmState {
            lc: self.lc.clone(),
            cortex: self.cortex.clone(),
            cell: self.cell.clone(),
        }
    }
}

#[derive(Module, Debug)]
pub struct LcneLstm<B: Backend> {
    hidden_size: usize,
    input_lc: Linear<B>,
    lc_lc: Linear<B>,
    cortex_lc: Linear<B>,
    lc_ne: Linear<B>,
    cortex: LSTMCell<B>,
    pupil: Linear<B>,
}

impl<B: Backend> LcneLstm<B> {
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let recurrent = LinearConfig::new(hidden_size, hidden_size).with_bias(false);

        Self {
            hidden_size,
            input_lc: LinearConfig::new(input_size, hidden_size).init(device),
            lc_lc: recurrent.init(device),
            cortex_lc: recurrent.init(device),
            lc_ne: LinearConfig::new(hidden_size, hidden_size).init(device),
            cortex: LSTMCell::new(input_size, hidden_size, device),
            pupil: LinearConfig::new(hidden_size, 1).init(device),
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn input_size(&self) -> usize {
        self.cortex.input_size()
    }

    /// Zero LC, cortex and cell state
    pub fn initial_state(&self, batch_size: usize, device: &B::Device) -> LcneLstmState<B> {
        LcneLstmState::zeros(batch_size, self.hidden_size, device)
    }

    /// One step over `input` of shape `[batch, input_size]`; no gates returned
    pub fn forward(&self, input: Tensor<B, 2>, state: LcneLstmState<B>) -> LcneLstmOutput<B> {
        let mut output = self.forward_with_activations(input, state);
        output.gates = None;
        output
    }

    /// One step, also returning the forget, input and output gates
    pub fn forward_with_activations(
        &self,
        input: Tensor<B, 2>,
        state: LcneLstmState<B>,
    ) -> LcneLstmOutput<B> {
        let LcneLstmState { lc, cortex, cell } = state;

        let lc_drive = self.input_lc.forward(input.clone())
            + self.lc_lc.forward(lc)
            + self.cortex_lc.forward(cortex.clone());
        let lc = lc_drive.tanh();
        let ne = activation::sigmoid(self.lc_ne.forward(lc.clone()));

        let gates = self.cortex.gates(input, cortex);
        let cell = cell * gates.forget.clone() + gates.input.clone() * ne.clone() * gates.candidate;
        let cortex = cell.clone().tanh() * gates.output.clone();

        let pupil = self.pupil.forward(ne.clone());

        LcneLstmOutput {
            lc,
            ne,
            cortex,
            pupil,
            cell,
            gates: Some(GateSignals {
                forget: gates.forget,
                input: gates.input,
                output: gates.output,
            }),
        }
    }
}
