//! LC-NE neuromodulation gadget
//!
//! A differentiable unit modelled on the locus coeruleus / norepinephrine
//! system. From a hidden state it derives an LC activation, an NE signal
//! driven by that activation, and three gate signals:
//!
//! ```text
//! lc     = tanh(W_lc · h)
//! ne     = σ(W_ne · lc)
//! forget = σ(W_f · h)
//! input  = σ(W_i · h)
//! output = σ(W_o · h)
//! ```

use burn::module::Module;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Forget, input and output gate signals, each `[batch, hidden]` in (0, 1).
#[derive(Debug, Clone)]
pub struct GateSignals<B: Backend> {
    pub forget: Tensor<B, 2>,
    pub input: Tensor<B, 2>,
    pub output: Tensor<B, 2>,
}

/// Everything the gadget produces for one hidden state.
#[derive(Debug, Clone)]
pub struct GadgetSignals<B: Backend> {
    /// LC activation, in (-1, 1)
    pub lc: Tensor<B, 2>,
    /// NE activation, in (0, 1)
    pub ne: Tensor<B, 2>,
    pub gates: GateSignals<B>,
}

impl<B: Backend> GadgetSignals<B> {
    /// `forget ⊙ hidden + input ⊙ ne`
    pub fn modulate(&self, hidden: Tensor<B, 2>) -> Tensor<B, 2> {
        self.gates.forget.clone() * hidden + self.gates.input.clone() * self.ne.clone()
    }
}

/// LC-NE neuromodulation unit
///
/// Stateless: every call is a pure function of the hidden state and the
/// learned projections.
#[derive(Module, Debug)]
pub struct LcneGadget<B: Backend> {
    hidden_size: usize,
    w_lc: Linear<B>,
    w_ne: Linear<B>,
    forget_gate: Linear<B>,
    input_gate: Linear<B>,
    output_gate: Linear<B>,
}

impl<B: Backend> LcneGadget<B> {
    /// Create a gadget for hidden states of width `hidden_size`
    pub fn new(hidden_size: usize, device: &B::Device) -> Self {
        Self::build(LinearConfig::new(hidden_size, hidden_size), device)
    }

    /// Rebuild all projections with or without a bias term
    pub fn with_bias(self, bias: bool, device: &B::Device) -> Self {
        let config = LinearConfig::new(self.hidden_size, self.hidden_size).with_bias(bias);
        Self::build(config, device)
    }

    /// Rebuild all projections with `initializer` (weights and biases)
    pub fn with_initializer(self, initializer: Initializer, device: &B::Device) -> Self {
        let bias = self.w_lc.bias.is_some();
        let config = LinearConfig::new(self.hidden_size, self.hidden_size)
            .with_bias(bias)
            .with_initializer(initializer);
        Self::build(config, device)
    }

    fn build(config: LinearConfig, device: &B::Device) -> Self {
        Self {
            hidden_size: config.d_output,
            w_lc: config.init(device),
            w_ne: config.init(device),
            forget_gate: config.init(device),
            input_gate: config.init(device),
            output_gate: config.init(device),
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Compute LC, NE and gate signals for `hidden` of shape `[batch, hidden_size]`
    pub fn forward(&self, hidden: Tensor<B, 2>) -> GadgetSignals<B> {
        let lc = self.w_lc.forward(hidden.clone()).tanh();
        let ne = activation::sigmoid(self.w_ne.forward(lc.clone()));

        let gates = GateSignals {
            forget: activation::sigmoid(self.forget_gate.forward(hidden.clone())),
            input: activation::sigmoid(self.input_gate.forward(hidden.clone())),
            output: activation::sigmoid(self.output_gate.forward(hidden)),
        };

        GadgetSignals { lc, ne, gates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    fn values(tensor: Tensor<TestBackend, 2>) -> Vec<f32> {
        tensor.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_gadget_shapes() {
        let device = Default::default();

        for hidden in [1, 3, 16] {
            for batch in [1, 2, 9] {
                let gadget = LcneGadget::<TestBackend>::new(hidden, &device);
                let h = Tensor::<TestBackend, 2>::random(
                    [batch, hidden],
                    Distribution::Uniform(-1.0, 1.0),
                    &device,
                );
                let signals = gadget.forward(h);

                assert_eq!(signals.lc.dims(), [batch, hidden]);
                assert_eq!(signals.ne.dims(), [batch, hidden]);
                assert_eq!(signals.gates.forget.dims(), [batch, hidden]);
                assert_eq!(signals.gates.input.dims(), [batch, hidden]);
                assert_eq!(signals.gates.output.dims(), [batch, hidden]);
            }
        }
    }

    #[test]
    fn test_zero_hidden_state_without_bias() {
        let device = Default::default();
        let gadget = LcneGadget::<TestBackend>::new(3, &device).with_bias(false, &device);

        let signals = gadget.forward(Tensor::zeros([2, 3], &device));

        assert!(values(signals.lc).iter().all(|v| v.abs() < 1e-6));
        assert!(values(signals.ne).iter().all(|v| (v - 0.5).abs() < 1e-6));
        for gate in [signals.gates.forget, signals.gates.input, signals.gates.output] {
            assert!(values(gate).iter().all(|v| (v - 0.5).abs() < 1e-6));
        }
    }

    #[test]
    fn test_constant_initializer() {
        let device = Default::default();
        let gadget = LcneGadget::<TestBackend>::new(2, &device)
            .with_bias(false, &device)
            .with_initializer(Initializer::Constant { value: 0.5 }, &device);

        // h = [1, 1]: every projection sums to 1.0
        let signals = gadget.forward(Tensor::ones([1, 2], &device));

        let lc = 1.0f32.tanh();
        let ne = 1.0 / (1.0 + (-lc).exp());
        let gate = 1.0 / (1.0 + (-1.0f32).exp());

        assert!(values(signals.lc).iter().all(|v| (v - lc).abs() < 1e-5));
        assert!(values(signals.ne).iter().all(|v| (v - ne).abs() < 1e-5));
        assert!(values(signals.gates.forget).iter().all(|v| (v - gate).abs() < 1e-5));
    }

    #[test]
    fn test_modulate_identity() {
        let device = Default::default();
        let gadget = LcneGadget::<TestBackend>::new(4, &device);
        let hidden = Tensor::<TestBackend, 2>::ones([2, 4], &device);

        let signals = gadget.forward(hidden.clone());
        let modulated = values(signals.modulate(hidden));

        let forget = values(signals.gates.forget);
        let input = values(signals.gates.input);
        let ne = values(signals.ne);
        for i in 0..modulated.len() {
            let expected = forget[i] * 1.0 + input[i] * ne[i];
            assert!((modulated[i] - expected).abs() < 1e-6);
        }
    }
}
