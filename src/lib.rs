//! # LC-NE - Locus coeruleus / norepinephrine models of pupil dilation
//!
//! Recurrent models in which a locus coeruleus (LC) population releases
//! norepinephrine (NE) that gates a cortical memory, read out as predicted
//! pupil dilation, built on the Burn framework.
//!
//! ## Features
//!
//! - **LC-NE gadget**: LC, NE and forget/input/output gate signals computed
//!   from an LSTM hidden state
//! - **Model variants**: gadget-augmented LSTM, LC-NE LSTM cell, vanilla LC-NE
//!   network and non-modulated baselines
//! - **Analysis**: PCA, t-SNE, k-means and Pearson correlation against observed
//!   pupil dilation, drawn with plotters
//!
//! ## Quick Start
//!
//! ```rust
//! use lcne::prelude::*;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//!
//! type Backend = NdArray<f32>;
//!
//! let device = Default::default();
//! let model = LstmGadget::<Backend>::new(2, 4, &device);
//!
//! // [batch=5, seq_len=6, features=2]
//! let input = Tensor::<Backend, 3>::zeros([5, 6, 2], &device);
//! let out = model.forward(input);
//!
//! assert_eq!(out.prediction.dims(), [5, 1]);
//! assert_eq!(out.signals.lc.dims(), [5, 4]);
//! ```
//!
//! ## Gadget-level Usage
//!
//! ```ignore
//! use lcne::cells::LcneGadget;
//!
//! let gadget = LcneGadget::<Backend>::new(32, &device);
//! let signals = gadget.forward(hidden); // hidden: [batch, 32]
//! let modulated = signals.modulate(hidden);
//! ```

pub mod analysis;
pub mod cells;
pub mod error;
pub mod models;
pub mod rnn;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::analysis::{
        firing_lcne, pca_feed_forward, pca_gadget, pca_lcne, pca_lcne_lstm, pca_lstm,
        pca_scatter, AlignPolicy, Analysis, AnalysisConfig, Figure, ObservationFrame, Signal,
    };
    pub use crate::cells::{GadgetSignals, GateSignals, LSTMCell, LcneGadget, LstmState};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::models::{
        FeedForwardNet, LcneLstm, LcneLstmState, LcneNetwork, LcneState, LstmGadget,
        LstmRegressor,
    };
    pub use crate::rnn::Lstm;
}
