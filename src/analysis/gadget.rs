//! Activation analysis for the gated LC-NE models

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::debug;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::figure::{Figure, Panel};
use crate::analysis::frame::ObservationFrame;
use crate::analysis::panels::{align, condition_hue, pca_panel};
use crate::analysis::report::CorrelationReport;
use crate::analysis::snapshot::{ActivationSnapshot, Signal};
use crate::analysis::stats::{pearson, to_vec};
use crate::analysis::Analysis;
use crate::error::{AnalysisError, Result};
use crate::models::{LcneLstm, LstmGadget};

/// PCA of LC, NE and gate signals of an [`LstmGadget`], with correlations of
/// their per-trial means against observed pupil dilation.
///
/// `inputs` is `[batch, seq_len, features]`; single-trial data goes in with
/// `seq_len = 1`.
pub fn pca_gadget<B: Backend>(
    model: &LstmGadget<B>,
    inputs: Tensor<B, 3>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let out = model.forward(inputs);

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Lc, out.signals.lc)?
        .capture(Signal::Ne, out.signals.ne)?
        .capture(Signal::ForgetGate, out.signals.gates.forget)?
        .capture(Signal::InputGate, out.signals.gates.input)?
        .capture(Signal::OutputGate, out.signals.gates.output)?
        .capture(Signal::Prediction, out.prediction)?;
    let (snapshot, frame) = align(snapshot, frame, config)?;

    let signals = [
        Signal::Lc,
        Signal::Ne,
        Signal::ForgetGate,
        Signal::InputGate,
        Signal::OutputGate,
    ];

    let mut figure = Figure::grid(2, 3);
    for signal in signals {
        let title = format!("{} Activations", signal.label());
        figure = figure.with_panel(pca_panel(
            snapshot.get(signal)?,
            &title,
            condition_hue(&frame)?,
        )?);
    }
    figure = figure.with_panel(Panel::Empty);

    let actual = frame.pupil()?;
    let mut correlations = CorrelationReport::new("Pearson Correlation with Actual Pupil Dilation:");
    for (signal, label) in signals.into_iter().zip([
        "LC Activation",
        "NE Activation",
        "Forget Gate",
        "Input Gate",
        "Output Gate",
    ]) {
        let mean = to_vec(&snapshot.summary(signal)?.mean);
        correlations.push(label, pearson(&mean, actual));
    }
    let prediction = snapshot.get(Signal::Prediction)?.column(0).to_vec();
    correlations.push(Signal::Prediction.label(), pearson(&prediction, actual));

    Ok(Analysis {
        snapshot,
        figures: vec![figure],
        correlations: Some(correlations),
    })
}

/// PCA of LC, NE, cortex, gate and cell signals of one [`LcneLstm`] step
/// from a zero state.
pub fn pca_lcne_lstm<B: Backend>(
    model: &LcneLstm<B>,
    inputs: Tensor<B, 2>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let device = inputs.device();
    let state = model.initial_state(inputs.dims()[0], &device);
    let out = model.forward_with_activations(inputs, state);
    let gates = out
        .gates
        .ok_or(AnalysisError::MissingSignal(Signal::ForgetGate.label()))?;

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Lc, out.lc)?
        .capture(Signal::Ne, out.ne)?
        .capture(Signal::Cortex, out.cortex)?
        .capture(Signal::ForgetGate, gates.forget)?
        .capture(Signal::InputGate, gates.input)?
        .capture(Signal::OutputGate, gates.output)?
        .capture(Signal::Cell, out.cell)?
        .capture(Signal::Prediction, out.pupil)?;
    let (snapshot, frame) = align(snapshot, frame, config)?;

    debug!(
        lc_mean = snapshot.summary(Signal::Lc)?.mean.len(),
        input_gate_mean = snapshot.summary(Signal::InputGate)?.mean.len(),
        prediction = snapshot.get(Signal::Prediction)?.nrows(),
        "LC-NE LSTM summary lengths"
    );

    let mut figure = Figure::grid(2, 3);
    for signal in [
        Signal::Lc,
        Signal::Ne,
        Signal::Cortex,
        Signal::InputGate,
        Signal::OutputGate,
        Signal::Cell,
    ] {
        figure = figure.with_panel(pca_panel(
            snapshot.get(signal)?,
            signal.label(),
            condition_hue(&frame)?,
        )?);
    }

    Ok(Analysis {
        snapshot,
        figures: vec![figure],
        correlations: None,
    })
}
