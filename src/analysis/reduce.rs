//! Two-dimensional projections and clustering, backed by linfa

use std::fmt;

use linfa::traits::{Fit, Predict, Transformer};
use linfa::{DatasetBase, ParamGuard};
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use linfa_reduction::Pca;
use linfa_tsne::TSneParams;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::analysis::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};

/// Samples projected onto two components
#[derive(Debug, Clone)]
pub struct Projection {
    /// `[samples, 2]`
    pub points: Array2<f64>,
    /// Percentage of variance carried by each component (PCA only)
    pub explained_variance: Option<[f64; 2]>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .rows()
            .into_iter()
            .map(|row| (row[0], row[1]))
            .collect()
    }

    /// Keep the first `len` samples
    pub fn truncate(mut self, len: usize) -> Self {
        let keep = len.min(self.points.nrows());
        self.points = self.points.slice(ndarray::s![..keep, ..]).to_owned();
        self
    }
}

/// Two-component PCA.
///
/// Explained variance is each component's share of the total variance of
/// the input, so the two percentages only sum to 100 when the data is
/// already two-dimensional.
pub fn pca(values: &Array2<f64>) -> Result<Projection> {
    require_samples("PCA", values, 2)?;

    let dataset = DatasetBase::from(values.clone());
    let embedding = Pca::params(2).fit(&dataset)?;
    let points: Array2<f64> = embedding.predict(values);

    let total = total_variance(values);
    let component = points.var_axis(Axis(0), 1.0);
    let share = |i: usize| match component.get(i) {
        Some(var) if total > 0.0 => var / total * 100.0,
        _ => 0.0,
    };
    let explained = [share(0), share(1)];

    Ok(Projection {
        points,
        explained_variance: Some(explained),
    })
}

/// Two-dimensional t-SNE embedding.
///
/// The perplexity is capped at `(n - 1) / 3` (integer division) so small
/// batches still embed.
pub fn tsne(values: &Array2<f64>, config: &AnalysisConfig) -> Result<Projection> {
    require_samples("t-SNE", values, 4)?;
    // Needs at least two distinct samples
    let total = total_variance(values);
    if total.is_nan() || total <= 0.0 {
        return Err(AnalysisError::DegenerateInput { operation: "t-SNE" });
    }

    let limit = ((values.nrows() - 1) / 3) as f64;
    let perplexity = config.perplexity.min(limit);
    debug!(
        samples = values.nrows(),
        requested = config.perplexity,
        perplexity,
        "running t-SNE"
    );

    let rng = StdRng::seed_from_u64(config.seed);
    let params = TSneParams::embedding_size_with_rng(2, rng)
        .perplexity(perplexity)
        .approx_threshold(config.tsne_approx_threshold)
        .max_iter(config.tsne_max_iter)
        .check()?;

    let points = params.transform(values.clone())?;

    Ok(Projection {
        points,
        explained_variance: None,
    })
}

/// k-means fitted with [`AnalysisConfig::n_clusters`] centroids
pub struct Clustering {
    model: KMeans<f64, L2Dist>,
}

impl fmt::Debug for Clustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clustering")
            .field("centroids", self.model.centroids())
            .finish()
    }
}

impl Clustering {
    pub fn fit(values: &Array2<f64>, config: &AnalysisConfig) -> Result<Self> {
        require_samples("k-means", values, config.n_clusters.max(1))?;

        let rng = StdRng::seed_from_u64(config.seed);
        let dataset = DatasetBase::from(values.clone());
        let model = KMeans::params_with_rng(config.n_clusters, rng)
            .n_runs(config.kmeans_runs.max(1))
            .fit(&dataset)?;

        Ok(Self { model })
    }

    /// Nearest-centroid label for each row
    pub fn predict(&self, values: &Array2<f64>) -> Vec<usize> {
        let labels: Array1<usize> = self.model.predict(values);
        labels.to_vec()
    }

    pub fn centroids(&self) -> &Array2<f64> {
        self.model.centroids()
    }
}

/// Sum of per-column sample variances
fn total_variance(values: &Array2<f64>) -> f64 {
    if values.nrows() < 2 {
        return 0.0;
    }
    values.var_axis(Axis(0), 1.0).sum()
}

fn require_samples(operation: &'static str, values: &Array2<f64>, required: usize) -> Result<()> {
    if values.nrows() < required {
        return Err(AnalysisError::TooFewSamples {
            operation,
            required,
            actual: values.nrows(),
        });
    }
    Ok(())
}
