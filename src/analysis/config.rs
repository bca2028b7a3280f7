use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do when parallel arrays (activations, predictions, frame rows)
/// have different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignPolicy {
    /// Cut everything to the shortest length and log a warning
    #[default]
    Truncate,
    /// Refuse with [`AnalysisError::LengthMismatch`]
    Strict,
}

impl AlignPolicy {
    /// Common length of the named arrays.
    ///
    /// Equal lengths pass silently under either policy.
    pub fn common_len(&self, lengths: &[(&str, usize)]) -> Result<usize> {
        let min = lengths.iter().map(|(_, len)| *len).min().unwrap_or(0);
        let max = lengths.iter().map(|(_, len)| *len).max().unwrap_or(0);
        if min == max {
            return Ok(min);
        }

        let described = lengths
            .iter()
            .map(|(name, len)| format!("{name}={len}"))
            .collect::<Vec<_>>()
            .join(", ");

        match self {
            AlignPolicy::Truncate => {
                warn!(lengths = %described, truncated_to = min, "truncating misaligned arrays");
                Ok(min)
            }
            AlignPolicy::Strict => Err(AnalysisError::LengthMismatch(described)),
        }
    }
}

/// Settings shared by the analysis procedures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Seed for t-SNE initialisation and k-means
    pub seed: u64,
    /// Requested t-SNE perplexity; lowered for small batches
    pub perplexity: f64,
    pub tsne_max_iter: usize,
    /// Barnes-Hut angle; 0.0 gives exact t-SNE
    pub tsne_approx_threshold: f64,
    pub n_clusters: usize,
    /// k-means restarts, the best inertia wins
    pub kmeans_runs: usize,
    pub align: AlignPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            perplexity: 30.0,
            tsne_max_iter: 1000,
            tsne_approx_threshold: 0.5,
            n_clusters: 2,
            kmeans_runs: 10,
            align: AlignPolicy::Truncate,
        }
    }
}

impl AnalysisConfig {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_perplexity(mut self, perplexity: f64) -> Self {
        self.perplexity = perplexity;
        self
    }

    pub fn with_tsne_max_iter(mut self, max_iter: usize) -> Self {
        self.tsne_max_iter = max_iter;
        self
    }

    pub fn with_tsne_approx_threshold(mut self, threshold: f64) -> Self {
        self.tsne_approx_threshold = threshold;
        self
    }

    pub fn with_kmeans_runs(mut self, runs: usize) -> Self {
        self.kmeans_runs = runs;
        self
    }

    pub fn with_n_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    pub fn with_align(mut self, align: AlignPolicy) -> Self {
        self.align = align;
        self
    }
}
