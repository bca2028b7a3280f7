//! Building blocks shared by the analysis procedures

use ndarray::Array2;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::figure::{Figure, Hue, Panel, ScatterPanel};
use crate::analysis::frame::ObservationFrame;
use crate::analysis::reduce::{self, Projection};
use crate::analysis::snapshot::ActivationSnapshot;
use crate::error::Result;

/// Scatter of the 2-component PCA of `activations`, explained variance in
/// the title and axis labels
pub fn pca_panel(activations: &Array2<f64>, title: &str, hue: Hue) -> Result<Panel> {
    let projection = reduce::pca(activations)?;
    Ok(projected_panel(&projection, title, hue))
}

/// Scatter of an existing projection; PCA projections get variance labels
pub fn projected_panel(projection: &Projection, title: &str, hue: Hue) -> Panel {
    let (title, x_label, y_label) = match projection.explained_variance {
        Some([pc1, pc2]) => (
            format!("{title} (PC1={pc1:.2}%, PC2={pc2:.2}%)"),
            format!("PCA Component 1 ({pc1:.2}% Variance)"),
            format!("PCA Component 2 ({pc2:.2}% Variance)"),
        ),
        None => (
            title.to_string(),
            "t-SNE Component 1".to_string(),
            "t-SNE Component 2".to_string(),
        ),
    };

    Panel::Scatter(ScatterPanel {
        title,
        x_label,
        y_label,
        points: projection.xy(),
        hue,
    })
}

/// One-panel PCA figure of `activations` coloured by `hue`
pub fn pca_scatter(activations: &Array2<f64>, title: &str, hue: Hue) -> Result<Figure> {
    Ok(Figure::single(pca_panel(activations, title, hue)?))
}

/// Cut the snapshot and the frame to their common length under the
/// configured policy
pub fn align(
    snapshot: ActivationSnapshot,
    frame: &ObservationFrame,
    config: &AnalysisConfig,
) -> Result<(ActivationSnapshot, ObservationFrame)> {
    let mut lengths = snapshot.lengths();
    lengths.push(("observations", frame.len()));

    let len = config.align.common_len(&lengths)?;
    Ok((snapshot.truncate(len), frame.head(len)))
}

/// Condition hue for the aligned frame
pub fn condition_hue(frame: &ObservationFrame) -> Result<Hue> {
    Ok(Hue::Condition(frame.condition()?.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::AlignPolicy;
    use crate::analysis::snapshot::Signal;
    use crate::error::AnalysisError;

    fn frame(len: usize) -> ObservationFrame {
        ObservationFrame::new(
            (0..len).map(|i| i as f64).collect(),
            (0..len).map(|i| format!("c{}", i % 2)).collect(),
        )
        .unwrap()
    }

    fn snapshot(rows: usize) -> ActivationSnapshot {
        let mut snapshot = ActivationSnapshot::new();
        snapshot.insert(
            Signal::Lc,
            Array2::from_shape_fn((rows, 3), |(i, j)| ((i * 3 + j) as f64).sin()),
        );
        snapshot
    }

    #[test]
    fn test_align_truncates_to_frame() {
        let (snapshot, frame) = align(snapshot(10), &frame(7), &AnalysisConfig::default()).unwrap();

        assert_eq!(snapshot.get(Signal::Lc).unwrap().nrows(), 7);
        assert_eq!(frame.len(), 7);
    }

    #[test]
    fn test_align_strict() {
        let config = AnalysisConfig::default().with_align(AlignPolicy::Strict);
        let err = align(snapshot(10), &frame(7), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch(_)));

        assert!(align(snapshot(7), &frame(7), &config).is_ok());
    }

    #[test]
    fn test_pca_scatter_labels() {
        let values = snapshot(12);
        let figure = pca_scatter(
            values.get(Signal::Lc).unwrap(),
            "LC",
            condition_hue(&frame(12)).unwrap(),
        )
        .unwrap();

        match &figure.panels[0] {
            Panel::Scatter(panel) => {
                assert!(panel.title.starts_with("LC (PC1="));
                assert!(panel.x_label.starts_with("PCA Component 1 ("));
                assert_eq!(panel.points.len(), 12);
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }
}
