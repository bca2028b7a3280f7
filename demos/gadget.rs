//! LC-NE gadget walkthrough
//!
//! Builds an LSTM with the LC-NE gadget, runs one batch through it and
//! prints the shapes and ranges of every internal signal.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use lcne::cells::LcneGadget;
use lcne::models::LstmGadget;

type Backend = NdArray<f32>;

fn range(tensor: Tensor<Backend, 2>) -> (f32, f32) {
    let min = tensor.clone().min().into_scalar();
    let max = tensor.max().into_scalar();
    (min, max)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== LC-NE Gadget Example ===\n");
    let device = Default::default();

    // Example 1: the gadget on its own
    println!("Example 1: Gadget on a zero hidden state");
    let gadget = LcneGadget::<Backend>::new(3, &device).with_bias(false, &device);
    let signals = gadget.forward(Tensor::<Backend, 2>::zeros([1, 3], &device));
    println!("  LC:     {:?}", signals.lc.to_data());
    println!("  NE:     {:?}", signals.ne.to_data());
    println!("  Forget: {:?}", signals.gates.forget.to_data());
    println!();

    // Example 2: gadget-augmented LSTM
    println!("Example 2: LSTM with gadget");
    let model = LstmGadget::<Backend>::new(2, 4, &device);

    // Input shape: [batch=5, seq=6, features=2]
    let input = Tensor::<Backend, 3>::random([5, 6, 2], Distribution::Uniform(-1.0, 1.0), &device);
    let out = model.forward(input);

    println!("  Prediction shape: {:?}", out.prediction.dims());
    println!("  LC range:     {:?}", range(out.signals.lc.clone()));
    println!("  NE range:     {:?}", range(out.signals.ne.clone()));
    println!("  Forget range: {:?}", range(out.signals.gates.forget.clone()));
    println!("  Input range:  {:?}", range(out.signals.gates.input.clone()));
    println!("  Output range: {:?}", range(out.signals.gates.output.clone()));
    println!();

    // Example 3: the modulation identity
    let expected = out.signals.gates.forget.clone() * out.hidden.clone()
        + out.signals.gates.input.clone() * out.signals.ne.clone();
    let error = (out.modulated - expected).abs().max().into_scalar();
    println!("Example 3: max |modulated - (f*h + i*ne)| = {error:e}");
}
