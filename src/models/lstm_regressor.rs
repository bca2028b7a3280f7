//! Plain LSTM baseline with a linear readout

use crate::rnn::Lstm;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

#[derive(Debug, Clone)]
pub struct LstmRegressorOutput<B: Backend> {
    /// `[batch, 1]`
    pub prediction: Tensor<B, 2>,
    /// Final hidden state, `[batch, hidden]`
    pub hidden: Tensor<B, 2>,
    /// Final cell state, `[batch, hidden]`
    pub cell: Tensor<B, 2>,
}

#[derive(Module, Debug)]
pub struct LstmRegressor<B: Backend> {
    lstm: Lstm<B>,
    head: Linear<B>,
}

impl<B: Backend> LstmRegressor<B> {
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            lstm: Lstm::new(input_size, hidden_size, device),
            head: LinearConfig::new(hidden_size, 1).init(device),
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.lstm.hidden_size()
    }

    /// Forward pass over `[batch, seq_len, input_size]` from a zero state
    pub fn forward(&self, input: Tensor<B, 3>) -> LstmRegressorOutput<B> {
        let (_, state) = self.lstm.forward(input, None);

        LstmRegressorOutput {
            prediction: self.head.forward(state.hidden.clone()),
            hidden: state.hidden,
            cell: state.cell,
        }
    }
}
