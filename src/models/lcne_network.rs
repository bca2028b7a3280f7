//! Vanilla LC-NE network
//!
//! A single-step network without gating. LC integrates the input with its
//! previous activity and the previous cortical activity; NE raises the gain
//! of the cortical population.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Previous LC and cortex activity, each `[batch, hidden]`.
#[derive(Debug, Clone)]
pub struct LcneState<B: Backend> {
    pub lc: Tensor<B, 2>,
    pub cortex: Tensor<B, 2>,
}

impl<B: Backend> LcneState<B> {
    pub fn zeros(batch_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            lc: Tensor::zeros([batch_size, hidden_size], device),
            cortex: Tensor::zeros([batch_size, hidden_size], device),
        }
    }
}

/// Pre-nonlinearity drives of the three populations.
#[derive(Debug, Clone)]
pub struct LcneRaw<B: Backend> {
    pub lc: Tensor<B, 2>,
    pub ne: Tensor<B, 2>,
    pub cortex: Tensor<B, 2>,
}

/// Result of one [`LcneNetwork`] step.
#[derive(Debug, Clone)]
pub struct LcneOutput<B: Backend> {
    pub lc: Tensor<B, 2>,
    pub ne: Tensor<B, 2>,
    pub cortex: Tensor<B, 2>,
    /// `[batch, 1]`
    pub pupil: Tensor<B, 2>,
    /// Present only from [`LcneNetwork::forward_with_activations`]
    pub raw: Option<LcneRaw<B>>,
}

#[derive(Module, Debug)]
pub struct LcneNetwork<B: Backend> {
    hidden_size: usize,
    input_lc: Linear<B>,
    lc_lc: Linear<B>,
    cortex_lc: Linear<B>,
    lc_ne: Linear<B>,
    input_cortex: Linear<B>,
    cortex_cortex: Linear<B>,
    pupil: Linear<B>,
}

impl<B: Backend> LcneNetwork<B> {
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let recurrent = LinearConfig::new(hidden_size, hidden_size).with_bias(false);
        let afferent = LinearConfig::new(input_size, hidden_size);

        Self {
            hidden_size,
            input_lc: afferent.init(device),
            lc_lc: recurrent.init(device),
            cortex_lc: recurrent.init(device),
            lc_ne: LinearConfig::new(hidden_size, hidden_size).init(device),
            input_cortex: afferent.init(device),
            cortex_cortex: recurrent.init(device),
            pupil: LinearConfig::new(hidden_size, 1).init(device),
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn initial_state(&self, batch_size: usize, device: &B::Device) -> LcneState<B> {
        LcneState::zeros(batch_size, self.hidden_size, device)
    }

    /// One step over `input` of shape `[batch, input_size]`
    pub fn forward(&self, input: Tensor<B, 2>, state: LcneState<B>) -> LcneOutput<B> {
        let mut output = self.forward_with_activations(input, state);
        output.raw = None;
        output
    }

    /// One step, also returning the raw drives
    pub fn forward_with_activations(
        &self,
        input: Tensor<B, 2>,
        state: LcneState<B>,
    ) -> LcneOutput<B> {
        let LcneState { lc, cortex } = state;

        let lc_raw = self.input_lc.forward(input.clone())
            + self.lc_lc.forward(lc)
            + self.cortex_lc.forward(cortex.clone());
        let lc = lc_raw.clone().tanh();

        let ne_raw = self.lc_ne.forward(lc.clone());
        let ne = activation::sigmoid(ne_raw.clone());

        // NE multiplies the cortical gain by a factor in (1, 2)
        let cortex_raw = self.input_cortex.forward(input) + self.cortex_cortex.forward(cortex);
        let cortex = (cortex_raw.clone() * (ne.clone() + 1.0)).tanh();

        let pupil = self.pupil.forward(lc.clone());

        LcneOutput {
            lc,
            ne,
            cortex,
            pupil,
            raw: Some(LcneRaw {
                lc: lc_raw,
                ne: ne_raw,
                cortex: cortex_raw,
            }),
        }
    }
}
