//! LSTM wrapped by the LC-NE gadget
//!
//! The LSTM's final hidden state drives the gadget; the gadget gates that
//! hidden state against its NE signal before the linear readout.

use crate::cells::{GadgetSignals, LcneGadget};
use crate::rnn::Lstm;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Result of one [`LstmGadget`] forward pass.
#[derive(Debug, Clone)]
pub struct LstmGadgetOutput<B: Backend> {
    /// Pupil dilation prediction, `[batch, 1]`
    pub prediction: Tensor<B, 2>,
    /// LC, NE and gate signals, each `[batch, hidden]`
    pub signals: GadgetSignals<B>,
    /// `forget ⊙ hidden + input ⊙ ne`, `[batch, hidden]`
    pub modulated: Tensor<B, 2>,
    /// Final LSTM hidden state, `[batch, hidden]`
    pub hidden: Tensor<B, 2>,
    /// Final LSTM cell state, `[batch, hidden]`
    pub cell: Tensor<B, 2>,
}

/// LSTM that learns to use an LC-NE neuromodulation gadget
#[derive(Module, Debug)]
pub struct LstmGadget<B: Backend> {
    lstm: Lstm<B>,
    gadget: LcneGadget<B>,
    output_layer: Linear<B>,
}

impl<B: Backend> LstmGadget<B> {
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            lstm: Lstm::new(input_size, hidden_size, device),
            gadget: LcneGadget::new(hidden_size, device),
            output_layer: LinearConfig::new(hidden_size, 1).init(device),
        }
    }

    /// Replace the gadget, e.g. one built with a fixed initializer
    pub fn with_gadget(mut self, gadget: LcneGadget<B>) -> Self {
        assert_eq!(
            gadget.hidden_size(),
            self.hidden_size(),
            "gadget width must match the LSTM hidden size"
        );
        self.gadget = gadget;
        self
    }

    pub fn input_size(&self) -> usize {
        self.lstm.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.lstm.hidden_size()
    }

    /// Forward pass over `input` of shape `[batch, seq_len, input_size]`.
    ///
    /// The LSTM always starts from a zero state.
    pub fn forward(&self, input: Tensor<B, 3>) -> LstmGadgetOutput<B> {
        let device = input.device();
        let batch_size = input.dims()[0];
        let initial = self.lstm.initial_state(batch_size, &device);

        let (_, state) = self.lstm.forward(input, Some(initial));

        let signals = self.gadget.forward(state.hidden.clone());
        let modulated = signals.modulate(state.hidden.clone());
        let prediction = self.output_layer.forward(modulated.clone());

        LstmGadgetOutput {
            prediction,
            signals,
            modulated,
            hidden: state.hidden,
            cell: state.cell,
        }
    }
}
