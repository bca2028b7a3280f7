//! Two-layer feed-forward baseline

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Post-ReLU activations of both hidden layers.
#[derive(Debug, Clone)]
pub struct FeedForwardActivations<B: Backend> {
    pub layer1: Tensor<B, 2>,
    pub layer2: Tensor<B, 2>,
}

#[derive(Debug, Clone)]
pub struct FeedForwardOutput<B: Backend> {
    /// `[batch, 1]`
    pub prediction: Tensor<B, 2>,
    /// Present only from [`FeedForwardNet::forward_with_activations`]
    pub activations: Option<FeedForwardActivations<B>>,
}

/// `input -> relu(layer1) -> relu(layer2) -> head`
#[derive(Module, Debug)]
pub struct FeedForwardNet<B: Backend> {
    layer1: Linear<B>,
    layer2: Linear<B>,
    head: Linear<B>,
}

impl<B: Backend> FeedForwardNet<B> {
    pub fn new(
        input_size: usize,
        hidden1: usize,
        hidden2: usize,
        device: &B::Device,
    ) -> Self {
        Self {
            layer1: LinearConfig::new(input_size, hidden1).init(device),
            layer2: LinearConfig::new(hidden1, hidden2).init(device),
            head: LinearConfig::new(hidden2, 1).init(device),
        }
    }

    pub fn forward(&self, input: Tensor<B, 2>) -> FeedForwardOutput<B> {
        let mut output = self.forward_with_activations(input);
        output.activations = None;
        output
    }

    pub fn forward_with_activations(&self, input: Tensor<B, 2>) -> FeedForwardOutput<B> {
        let layer1 = activation::relu(self.layer1.forward(input));
        let layer2 = activation::relu(self.layer2.forward(layer1.clone()));
        let prediction = self.head.forward(layer2.clone());

        FeedForwardOutput {
            prediction,
            activations: Some(FeedForwardActivations { layer1, layer2 }),
        }
    }
}
