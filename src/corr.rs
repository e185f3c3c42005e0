//! Pairwise Pearson correlation between encoded sample columns.

use ndarray::{Array2, ArrayView1};

use crate::encode::EncodedMatrix;

/// Square correlation matrix with sample labels in original column order.
#[derive(Clone, Debug)]
pub struct CorrelationMatrix {
    pub sample_ids: Vec<String>,
    pub matrix: Array2<f64>,
}

/// Pearson r between two columns over the rows where both values are finite.
///
/// Returns NaN when fewer than two complete rows remain or either column has
/// zero variance over the complete rows.
fn pearson_pairwise(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    let mut count = 0usize;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if xi.is_finite() && yi.is_finite() {
            sum_x += xi;
            sum_y += yi;
            sum_xy += xi * yi;
            sum_x2 += xi * xi;
            sum_y2 += yi * yi;
            count += 1;
        }
    }

    if count < 2 {
        return f64::NAN;
    }

    let n = count as f64;
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;
    let var_x = sum_x2 / n - mean_x * mean_x;
    let var_y = sum_y2 / n - mean_y * mean_y;
    let cov_xy = sum_xy / n - mean_x * mean_y;

    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }

    cov_xy / (var_x.sqrt() * var_y.sqrt())
}

/// Compute the sample-by-sample Pearson correlation matrix.
///
/// Rows where either sample has a missing code are excluded from that pair's
/// computation (pairwise-complete-case). The matrix is filled symmetrically
/// from the upper triangle.
pub fn pearson_correlation(encoded: &EncodedMatrix) -> CorrelationMatrix {
    let n = encoded.sample_ids.len();
    let mut matrix = Array2::<f64>::from_elem((n, n), f64::NAN);

    for i in 0..n {
        for j in i..n {
            let r = pearson_pairwise(encoded.codes.column(i), encoded.codes.column(j));
            matrix[(i, j)] = r;
            matrix[(j, i)] = r;
        }
    }

    CorrelationMatrix {
        sample_ids: encoded.sample_ids.clone(),
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn encoded(sample_ids: &[&str], codes: Array2<f64>) -> EncodedMatrix {
        EncodedMatrix {
            sample_ids: sample_ids.iter().map(|s| s.to_string()).collect(),
            codes,
        }
    }

    #[test]
    fn opposite_homozygotes_correlate_at_minus_one() {
        // S1 = [0, 3], S2 = [3, 0] from genotypes (0/0, 1/1) and (1/1, 0/0).
        let enc = encoded(&["S1", "S2"], array![[0.0, 3.0], [3.0, 0.0]]);
        let corr = pearson_correlation(&enc);
        assert_abs_diff_eq!(corr.matrix[(0, 1)], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(corr.matrix[(0, 0)], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(corr.matrix[(1, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn identical_columns_correlate_at_one() {
        let enc = encoded(&["S1", "S2"], array![[0.0, 0.0], [2.0, 2.0], [3.0, 3.0]]);
        let corr = pearson_correlation(&enc);
        assert_abs_diff_eq!(corr.matrix[(0, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn matrix_is_symmetric() {
        let enc = encoded(
            &["S1", "S2", "S3"],
            array![
                [0.0, 3.0, 1.0],
                [1.0, 2.0, 0.0],
                [3.0, 0.0, 2.0],
                [2.0, 1.0, 3.0]
            ],
        );
        let corr = pearson_correlation(&enc);
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(
                    corr.matrix[(i, j)],
                    corr.matrix[(j, i)],
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn zero_variance_column_yields_nan() {
        let enc = encoded(&["S1", "S2"], array![[1.0, 0.0], [1.0, 3.0]]);
        let corr = pearson_correlation(&enc);
        assert!(corr.matrix[(0, 1)].is_nan());
        // The degenerate sample's self-correlation is undefined too.
        assert!(corr.matrix[(0, 0)].is_nan());
        assert_abs_diff_eq!(corr.matrix[(1, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_rows_are_excluded_pairwise() {
        // The NaN row would break the perfect anticorrelation if it were
        // included as zero; excluded, r stays exactly -1.
        let enc = encoded(
            &["S1", "S2"],
            array![[0.0, 3.0], [f64::NAN, 2.0], [3.0, 0.0]],
        );
        let corr = pearson_correlation(&enc);
        assert_abs_diff_eq!(corr.matrix[(0, 1)], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_complete_rows_yields_nan() {
        let enc = encoded(&["S1", "S2"], array![[0.0, f64::NAN], [f64::NAN, 3.0]]);
        let corr = pearson_correlation(&enc);
        assert!(corr.matrix[(0, 1)].is_nan());
    }
}
