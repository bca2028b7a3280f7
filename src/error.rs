//! Error type for the analysis layer
//!
//! Model forward passes do not return errors; shape mismatches there panic
//! inside burn.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("observation frame has no column named `{0}`")]
    MissingColumn(String),

    #[error("column `{name}` has {len} rows, frame has {expected}")]
    ColumnLength {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("activation snapshot has no `{0}` signal")]
    MissingSignal(&'static str),

    #[error("lengths differ under strict alignment: {0}")]
    LengthMismatch(String),

    #[error("{operation} needs at least {required} samples, got {actual}")]
    TooFewSamples {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{operation} input has no variance: every sample is identical")]
    DegenerateInput { operation: &'static str },

    #[error("could not read tensor data: {0}")]
    TensorData(String),

    #[error("PCA failed: {0}")]
    Pca(#[from] linfa_reduction::ReductionError),

    #[error("t-SNE failed: {0}")]
    Tsne(#[from] linfa_tsne::TSneError),

    #[error("k-means failed: {0}")]
    KMeans(#[from] linfa_clustering::KMeansError),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("invalid analysis config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
