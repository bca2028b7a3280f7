//! Activation analysis for the non-neuromodulated baselines

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::figure::Figure;
use crate::analysis::frame::ObservationFrame;
use crate::analysis::panels::{align, condition_hue, projected_panel};
use crate::analysis::reduce;
use crate::analysis::report::CorrelationReport;
use crate::analysis::snapshot::{row_means, ActivationSnapshot, Signal};
use crate::analysis::stats::{pearson, standardize, to_vec};
use crate::analysis::Analysis;
use crate::error::{AnalysisError, Result};
use crate::models::{FeedForwardNet, LstmRegressor};

/// PCA and t-SNE of both hidden layers of a [`FeedForwardNet`].
///
/// The frame is cut to the batch size before colouring.
pub fn pca_feed_forward<B: Backend>(
    model: &FeedForwardNet<B>,
    inputs: Tensor<B, 2>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let batch_size = inputs.dims()[0];
    let out = model.forward_with_activations(inputs);
    let activations = out
        .activations
        .ok_or(AnalysisError::MissingSignal(Signal::Layer1.label()))?;

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Layer1, activations.layer1)?
        .capture(Signal::Layer2, activations.layer2)?
        .capture(Signal::Prediction, out.prediction)?;
    let (snapshot, frame) = align(snapshot, &frame.head(batch_size), config)?;

    let layer1 = snapshot.get(Signal::Layer1)?;
    let layer2 = snapshot.get(Signal::Layer2)?;

    let pca1 = reduce::pca(layer1)?;
    let pca2 = reduce::pca(layer2)?;
    let tsne1 = reduce::tsne(layer1, config)?;
    let tsne2 = reduce::tsne(layer2, config)?;

    let figure = Figure::grid(2, 2)
        .with_panel(projected_panel(
            &pca1,
            "PCA Projection of Layer 1 Activations",
            condition_hue(&frame)?,
        ))
        .with_panel(projected_panel(
            &pca2,
            "PCA Projection of Layer 2 Activations",
            condition_hue(&frame)?,
        ))
        .with_panel(projected_panel(
            &tsne1,
            "t-SNE Projection of Layer 1 Activations",
            condition_hue(&frame)?,
        ))
        .with_panel(projected_panel(
            &tsne2,
            "t-SNE Projection of Layer 2 Activations",
            condition_hue(&frame)?,
        ));

    Ok(Analysis {
        snapshot,
        figures: vec![figure],
        correlations: None,
    })
}

/// PCA and t-SNE of the standardised final hidden and cell states of an
/// [`LstmRegressor`], with correlations of their per-trial means against
/// observed pupil dilation.
///
/// Returns two figures: the PCA projections, then the t-SNE embeddings of
/// those projections.
pub fn pca_lstm<B: Backend>(
    model: &LstmRegressor<B>,
    inputs: Tensor<B, 3>,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let out = model.forward(inputs);

    let snapshot = ActivationSnapshot::new()
        .capture(Signal::Hidden, out.hidden)?
        .capture(Signal::Cell, out.cell)?
        .capture(Signal::Prediction, out.prediction)?;

    // Scaling and PCA see the whole batch; only the projections are aligned.
    let hidden = standardize(snapshot.get(Signal::Hidden)?);
    let cell = standardize(snapshot.get(Signal::Cell)?);
    let hidden_pca = reduce::pca(&hidden)?;
    let cell_pca = reduce::pca(&cell)?;

    let (snapshot, frame) = align(snapshot, frame, config)?;
    let len = frame.len();
    let hidden_pca = hidden_pca.truncate(len);
    let cell_pca = cell_pca.truncate(len);

    let hidden_tsne = reduce::tsne(&hidden_pca.points, config)?;
    let cell_tsne = reduce::tsne(&cell_pca.points, config)?;

    let pca_figure = Figure::grid(1, 2)
        .with_panel(projected_panel(
            &hidden_pca,
            "LSTM Hidden State PCA",
            condition_hue(&frame)?,
        ))
        .with_panel(projected_panel(
            &cell_pca,
            "LSTM Cell State PCA",
            condition_hue(&frame)?,
        ));
    let tsne_figure = Figure::grid(1, 2)
        .with_panel(projected_panel(
            &hidden_tsne,
            "LSTM Hidden State t-SNE Projection",
            condition_hue(&frame)?,
        ))
        .with_panel(projected_panel(
            &cell_tsne,
            "LSTM Cell State t-SNE Projection",
            condition_hue(&frame)?,
        ));

    let actual = frame.pupil()?;
    let hidden_mean = to_vec(&row_means(&hidden));
    let cell_mean = to_vec(&row_means(&cell));

    let mut correlations = CorrelationReport::new("Pearson Correlation with Actual Pupil Dilation:");
    correlations.push("Hidden State Mean", pearson(&hidden_mean[..len], actual));
    correlations.push("Cell State Mean", pearson(&cell_mean[..len], actual));

    Ok(Analysis {
        snapshot,
        figures: vec![pca_figure, tsne_figure],
        correlations: Some(correlations),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::figure::{Hue, Panel};
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    fn frame(len: usize) -> ObservationFrame {
        ObservationFrame::new(
            (0..len).map(|i| (i % 5) as f64 * 0.2).collect(),
            (0..len)
                .map(|i| ["a", "b", "c"][i % 3].to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_pca_feed_forward() {
        let device = Default::default();
        let model = FeedForwardNet::<TestBackend>::new(6, 16, 8, &device);
        let inputs = Tensor::<TestBackend, 2>::random(
            [18, 6],
            Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let config = AnalysisConfig::default().with_tsne_max_iter(250);

        let analysis = pca_feed_forward(&model, inputs, &frame(40), &config).unwrap();

        let titles = analysis.figures[0].panel_titles();
        assert_eq!(titles.len(), 4);
        assert!(titles[0].starts_with("PCA Projection of Layer 1 Activations"));
        assert_eq!(titles[3], "t-SNE Projection of Layer 2 Activations");
        match &analysis.figures[0].panels[2] {
            Panel::Scatter(panel) => {
                assert_eq!(panel.points.len(), 18);
                assert_eq!(panel.x_label, "t-SNE Component 1");
                assert!(matches!(&panel.hue, Hue::Condition(labels) if labels.len() == 18));
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn test_pca_lstm() {
        let device = Default::default();
        let model = LstmRegressor::<TestBackend>::new(4, 10, &device);
        let inputs = Tensor::<TestBackend, 3>::random([24, 1, 4], Distribution::Default, &device);
        let config = AnalysisConfig::default().with_tsne_max_iter(250);

        let analysis = pca_lstm(&model, inputs, &frame(20), &config).unwrap();

        assert_eq!(analysis.figures.len(), 2);
        assert!(analysis.figures[0].panel_titles()[0].starts_with("LSTM Hidden State PCA"));
        assert_eq!(
            analysis.figures[1].panel_titles()[1],
            "LSTM Cell State t-SNE Projection"
        );

        let report = analysis.correlations.unwrap();
        assert!(report.get("Hidden State Mean").is_some());
        assert!(report.get("Cell State Mean").is_some());
        assert_eq!(analysis.snapshot.get(Signal::Hidden).unwrap().nrows(), 20);
    }
}
