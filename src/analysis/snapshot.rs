//! Host-side copies of a model's internal signals

use std::collections::BTreeMap;
use std::fmt;

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use ndarray::{Array1, Array2, Axis};

use crate::error::{AnalysisError, Result};

/// Names of the internal signals an analysis can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    Lc,
    Ne,
    Cortex,
    ForgetGate,
    InputGate,
    OutputGate,
    Hidden,
    Cell,
    Layer1,
    Layer2,
    Prediction,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Lc => "LC",
            Signal::Ne => "NE",
            Signal::Cortex => "Cortex",
            Signal::ForgetGate => "Forget Gate",
            Signal::InputGate => "Input Gate",
            Signal::OutputGate => "Output Gate",
            Signal::Hidden => "Hidden State",
            Signal::Cell => "Cell State",
            Signal::Layer1 => "Layer 1",
            Signal::Layer2 => "Layer 2",
            Signal::Prediction => "Predicted Pupil Dilation",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Copy a `[rows, cols]` tensor to the host as `f64`.
pub fn to_array<B: Backend>(tensor: Tensor<B, 2>) -> Result<Array2<f64>> {
    let [rows, cols] = tensor.dims();
    let values = tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|err| AnalysisError::TensorData(format!("{err:?}")))?;

    Array2::from_shape_vec((rows, cols), values.into_iter().map(f64::from).collect())
        .map_err(|err| AnalysisError::TensorData(err.to_string()))
}

/// Per-row mean and (population) variance of one signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSummary {
    pub mean: Array1<f64>,
    pub var: Array1<f64>,
}

/// Signals captured from one forward pass, each `[batch, width]`
#[derive(Debug, Clone, Default)]
pub struct ActivationSnapshot {
    signals: BTreeMap<Signal, Array2<f64>>,
}

impl ActivationSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `tensor` to the host and record it under `signal`
    pub fn capture<B: Backend>(mut self, signal: Signal, tensor: Tensor<B, 2>) -> Result<Self> {
        let values = to_array(tensor)?;
        tracing::debug!(signal = signal.label(), shape = ?values.dim(), "captured activation");
        self.signals.insert(signal, values);
        Ok(self)
    }

    pub fn insert(&mut self, signal: Signal, values: Array2<f64>) {
        self.signals.insert(signal, values);
    }

    pub fn get(&self, signal: Signal) -> Result<&Array2<f64>> {
        self.signals
            .get(&signal)
            .ok_or(AnalysisError::MissingSignal(signal.label()))
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.keys().copied()
    }

    /// Rows of every signal, for alignment
    pub fn lengths(&self) -> Vec<(&'static str, usize)> {
        self.signals
            .iter()
            .map(|(signal, values)| (signal.label(), values.nrows()))
            .collect()
    }

    /// Keep the first `len` rows of every signal
    pub fn truncate(mut self, len: usize) -> Self {
        for values in self.signals.values_mut() {
            let keep = len.min(values.nrows());
            *values = values.slice(ndarray::s![..keep, ..]).to_owned();
        }
        self
    }

    pub fn summary(&self, signal: Signal) -> Result<SignalSummary> {
        let values = self.get(signal)?;
        Ok(SignalSummary {
            mean: row_means(values),
            var: values.var_axis(Axis(1), 0.0),
        })
    }
}

/// Mean of each row
pub fn row_means(values: &Array2<f64>) -> Array1<f64> {
    values
        .mean_axis(Axis(1))
        .unwrap_or_else(|| Array1::zeros(values.nrows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use ndarray::array;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_capture_copies_values() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], &device);

        let snapshot = ActivationSnapshot::new().capture(Signal::Lc, tensor).unwrap();
        let lc = snapshot.get(Signal::Lc).unwrap();

        assert_eq!(lc.dim(), (3, 2));
        assert_eq!(lc[[2, 1]], 6.0);
    }

    #[test]
    fn test_missing_signal() {
        let snapshot = ActivationSnapshot::new();
        assert!(matches!(
            snapshot.get(Signal::Ne),
            Err(AnalysisError::MissingSignal("NE"))
        ));
    }

    #[test]
    fn test_summary_mean_and_variance() {
        let mut snapshot = ActivationSnapshot::new();
        snapshot.insert(Signal::Ne, array![[0.0, 2.0], [1.0, 1.0]]);

        let summary = snapshot.summary(Signal::Ne).unwrap();
        assert_eq!(summary.mean, array![1.0, 1.0]);
        assert_eq!(summary.var, array![1.0, 0.0]);
    }

    #[test]
    fn test_truncate_every_signal() {
        let mut snapshot = ActivationSnapshot::new();
        snapshot.insert(Signal::Lc, Array2::zeros((6, 3)));
        snapshot.insert(Signal::Ne, Array2::zeros((4, 3)));

        let snapshot = snapshot.truncate(5);
        assert_eq!(snapshot.get(Signal::Lc).unwrap().nrows(), 5);
        assert_eq!(snapshot.get(Signal::Ne).unwrap().nrows(), 4);
        assert_eq!(snapshot.lengths(), vec![("LC", 5), ("NE", 4)]);
    }
}
