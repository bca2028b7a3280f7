//! Activation analysis for the vanilla LC-NE network

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use plotters::prelude::{BLUE, GREEN};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::figure::{Figure, Hue, Line, LinePanel, Panel};
use crate::analysis::frame::ObservationFrame;
use crate::analysis::panels::{align, condition_hue, pca_panel, projected_panel};
use crate::analysis::reduce::{self, Clustering};
use crate::analysis::report::CorrelationReport;
use crate::analysis::snapshot::{row_means, ActivationSnapshot, Signal};
use crate::analysis::stats::{hstack, pearson, standardize, to_vec, MinMaxScaler};
use crate::analysis::Analysis;
use crate::error::Result;
use crate::models::LcneNetwork;

/// PCA of each population, plus PCA, t-SNE and k-means of the standardised
/// LC, NE and cortex activity taken together.
///
/// k-means is fitted on the combined PCA projection; the same centroids then
/// label the t-SNE embedding.
pub fn pca_lcne<B: Backend>(
    model: &LcneNetwork<B>,
    inputs: Tensor<B, 2>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let device = inputs.device();
    let state = model.initial_state(inputs.dims()[0], &device);
    let out = model.forward_with_activations(inputs, state);

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Lc, out.lc)?
        .capture(Signal::Ne, out.ne)?
        .capture(Signal::Cortex, out.cortex)?
        .capture(Signal::Prediction, out.pupil)?;
    let (snapshot, frame) = align(snapshot, frame, config)?;

    let lc = snapshot.get(Signal::Lc)?;
    let ne = snapshot.get(Signal::Ne)?;
    let cortex = snapshot.get(Signal::Cortex)?;

    let combined = standardize(&hstack(&[lc, ne, cortex]));
    let combined_pca = reduce::pca(&combined)?;
    let combined_tsne = reduce::tsne(&combined_pca.points, config)?;

    let clustering = Clustering::fit(&combined_pca.points, config)?;
    let clusters_pca = clustering.predict(&combined_pca.points);
    let clusters_tsne = clustering.predict(&combined_tsne.points);

    let mut figure = Figure::grid(2, 3);
    for signal in [Signal::Lc, Signal::Ne, Signal::Cortex] {
        let title = format!("{} PCA", signal.label());
        figure = figure.with_panel(pca_panel(
            snapshot.get(signal)?,
            &title,
            condition_hue(&frame)?,
        )?);
    }
    let figure = figure
        .with_panel(projected_panel(
            &combined_pca,
            "PCA Clustering",
            Hue::Cluster(clusters_pca),
        ))
        .with_panel(projected_panel(
            &combined_tsne,
            "t-SNE Clustering",
            Hue::Cluster(clusters_tsne),
        ))
        .with_panel(Panel::Empty);

    Ok(Analysis {
        snapshot,
        figures: vec![figure],
        correlations: None,
    })
}

/// Per-trial LC, NE and cortex activity against observed pupil dilation.
///
/// Every series is the per-trial mean over units, min-max scaled to [0, 1];
/// the prediction is scaled with the scaler fitted on the observations so
/// both share one axis.
pub fn firing_lcne<B: Backend>(
    model: &LcneNetwork<B>,
    inputs: Tensor<B, 2>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let device = inputs.device();
    let state = model.initial_state(inputs.dims()[0], &device);
    let out = model.forward(inputs, state);

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Lc, out.lc)?
        .capture(Signal::Ne, out.ne)?
        .capture(Signal::Cortex, out.cortex)?
        .capture(Signal::Prediction, out.pupil)?;
    let (snapshot, frame) = align(snapshot, frame, config)?;

    let actual = frame.pupil()?;
    let pupil_scaler = MinMaxScaler::fit(actual);
    let actual_scaled = pupil_scaler.transform(actual);
    let prediction_scaled =
        pupil_scaler.transform(&snapshot.get(Signal::Prediction)?.column(0).to_vec());

    let scaled_mean = |signal: Signal| -> Result<Vec<f64>> {
        let mean = to_vec(&row_means(snapshot.get(signal)?));
        Ok(MinMaxScaler::fit_transform(&mean))
    };
    let lc_scaled = scaled_mean(Signal::Lc)?;
    let ne_scaled = scaled_mean(Signal::Ne)?;
    let cortex_scaled = scaled_mean(Signal::Cortex)?;

    let over_time = |values: &[f64]| -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(t, v)| (t as f64, *v))
            .collect()
    };

    let figure = Figure::single(Panel::Lines(LinePanel {
        title: "Model Activations vs. Real Pupil Dilation Over Time".to_string(),
        x_label: "Time (Trials)".to_string(),
        y_label: "Normalized Activation".to_string(),
        lines: vec![
            Line {
                label: "Actual Pupil Dilation".to_string(),
                color: BLUE,
                dashed: true,
                points: over_time(&actual_scaled),
            },
            Line {
                label: "LC Activation".to_string(),
                color: GREEN,
                dashed: false,
                points: over_time(&lc_scaled),
            },
        ],
    }));

    let mut correlations = CorrelationReport::new("Correlation with Actual Pupil Dilation:");
    correlations.push("LC Activation", pearson(&lc_scaled, &actual_scaled));
    correlations.push("NE Activation", pearson(&ne_scaled, &actual_scaled));
    correlations.push("Cortex Activation", pearson(&cortex_scaled, &actual_scaled));
    correlations.push(
        Signal::Prediction.label(),
        pearson(&prediction_scaled, &actual_scaled),
    );

    Ok(Analysis {
        snapshot,
        figures: vec![figure],
        correlations: Some(correlations),
    })
}
