//! Correlation and feature scaling

use ndarray::{Array1, Array2, Axis};

/// Pearson correlation coefficient of two equally long series.
///
/// Returns NaN when either series is constant or shorter than two samples.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "pearson needs aligned series");
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Zero mean, unit (population) variance per column.
///
/// Constant columns are centred but not scaled.
pub fn standardize(values: &Array2<f64>) -> Array2<f64> {
    let Some(mean) = values.mean_axis(Axis(0)) else {
        return values.clone();
    };
    let std = values
        .std_axis(Axis(0), 0.0)
        .mapv(|s| if s == 0.0 { 1.0 } else { s });

    (values - &mean) / &std
}

/// Maps the fitted range onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    scale: f64,
}

impl MinMaxScaler {
    pub fn fit(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let scale = if range > 0.0 && range.is_finite() {
            1.0 / range
        } else {
            1.0
        };
        let min = if min.is_finite() { min } else { 0.0 };
        Self { min, scale }
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| (v - self.min) * self.scale).collect()
    }

    pub fn fit_transform(values: &[f64]) -> Vec<f64> {
        Self::fit(values).transform(values)
    }
}

/// Column-wise concatenation of matrices with equal row counts
pub fn hstack(blocks: &[&Array2<f64>]) -> Array2<f64> {
    let views: Vec<_> = blocks.iter().map(|b| b.view()).collect();
    ndarray::concatenate(Axis(1), &views).unwrap_or_else(|_| Array2::zeros((0, 0)))
}

pub fn to_vec(values: &Array1<f64>) -> Vec<f64> {
    values.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [8.0, 6.0, 4.0, 2.0];

        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!((pearson(&x, &y) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0], &[2.0]).is_nan());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "aligned series")]
    fn test_pearson_rejects_unaligned_series() {
        pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_standardize_columns() {
        let values = array![[1.0, 5.0], [3.0, 5.0]];
        let scaled = standardize(&values);

        assert_eq!(scaled, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_min_max_scaler() {
        let scaler = MinMaxScaler::fit(&[2.0, 4.0, 6.0]);
        assert_eq!(scaler.transform(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
        // Values outside the fitted range map outside [0, 1]
        assert_eq!(scaler.transform(&[8.0]), vec![1.5]);
        assert_eq!(MinMaxScaler::fit_transform(&[3.0, 3.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_hstack() {
        let a = array![[1.0], [2.0]];
        let b = array![[3.0, 4.0], [5.0, 6.0]];
        assert_eq!(hstack(&[&a, &b]), array![[1.0, 3.0, 4.0], [2.0, 5.0, 6.0]]);
    }
}
