//! # Activation analysis
//!
//! Procedures that run a model once, copy its internal signals to the host,
//! project them to two dimensions and colour the result by task condition.
//!
//! ## Procedures
//!
//! | Procedure | Model | Figures | Correlations |
//! |-----------|-------|---------|--------------|
//! | [`pca_gadget`] | [`LstmGadget`](crate::models::LstmGadget) | PCA of LC, NE and the three gates | yes |
//! | [`pca_lcne_lstm`] | [`LcneLstm`](crate::models::LcneLstm) | PCA of LC, NE, cortex, gates, cell | no |
//! | [`pca_lcne`] | [`LcneNetwork`](crate::models::LcneNetwork) | per-population PCA, PCA/t-SNE clustering | no |
//! | [`firing_lcne`] | [`LcneNetwork`](crate::models::LcneNetwork) | activity over trials | yes |
//! | [`pca_feed_forward`] | [`FeedForwardNet`](crate::models::FeedForwardNet) | PCA and t-SNE of both layers | no |
//! | [`pca_lstm`] | [`LstmRegressor`](crate::models::LstmRegressor) | PCA and t-SNE of hidden and cell | yes |
//!
//! Every procedure aligns the captured signals with the [`ObservationFrame`]
//! according to [`AnalysisConfig::align`] before anything is compared.
//!
//! ## Rendering
//!
//! Figures are plain values. Draw them onto any plotters drawing area:
//!
//! ```ignore
//! use plotters::prelude::*;
//!
//! let analysis = pca_gadget(&model, inputs, &frame, &AnalysisConfig::default())?;
//! let root = SVGBackend::new("gadget.svg", (1500, 1000)).into_drawing_area();
//! analysis.figures[0].render(&root)?;
//! if let Some(report) = &analysis.correlations {
//!     println!("{report}");
//! }
//! ```

pub mod baseline;
pub mod config;
pub mod figure;
pub mod frame;
pub mod gadget;
pub mod lcne;
pub mod panels;
pub mod reduce;
pub mod report;
pub mod snapshot;
pub mod stats;

pub use baseline::{pca_feed_forward, pca_lstm};
pub use config::{AlignPolicy, AnalysisConfig};
pub use figure::{Figure, Hue, Line, LinePanel, Panel, ScatterPanel};
pub use frame::{ObservationFrame, CONDITION_COLUMN, PUPIL_COLUMN};
pub use gadget::{pca_gadget, pca_lcne_lstm};
pub use lcne::{firing_lcne, pca_lcne};
pub use panels::pca_scatter;
pub use reduce::{Clustering, Projection};
pub use report::CorrelationReport;
pub use snapshot::{ActivationSnapshot, Signal, SignalSummary};

/// Result of one analysis procedure
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Aligned host copies of every captured signal
    pub snapshot: ActivationSnapshot,
    pub figures: Vec<Figure>,
    /// Present for the procedures that compare against observed pupil size
    pub correlations: Option<CorrelationReport>,
}
