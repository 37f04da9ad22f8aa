//! Retrospective accuracy metrics for the trained regressor.

use crate::error::ApiError;
use crate::models::AccuracyMetrics;

/// Fixed edge length of the error heatmap grid.
pub const MATRIX_SIZE: usize = 10;

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<(), ApiError> {
    if actual.len() != predicted.len() {
        return Err(ApiError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    Ok(())
}

/// MSE, RMSE and R² over paired actual/predicted sequences.
///
/// A constant actual series has `SS_tot == 0`; R² is defined as 0 there
/// instead of dividing by zero.
pub fn accuracy_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics, ApiError> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;

    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let mse = ss_res / n;
    let rmse = mse.sqrt();

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let r2_score = if ss_tot != 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    };

    Ok(AccuracyMetrics {
        r2_score,
        mse,
        rmse,
    })
}

/// Per-sample `|actual − predicted| / actual · 100`.
///
/// Where `actual == 0` the divisor is substituted with 1, which biases
/// the value for those samples but keeps every sample representable.
pub fn percentage_errors(actual: &[f64], predicted: &[f64]) -> Result<Vec<f64>, ApiError> {
    check_lengths(actual, predicted)?;

    Ok(actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let divisor = if *a != 0.0 { *a } else { 1.0 };
            ((a - p) / divisor).abs() * 100.0
        })
        .collect())
}

/// Row-major 10×10 grid of the first 100 percentage errors. Shortfall is
/// zero-filled; anything past 100 values is dropped. The grid size is a
/// visualization contract, not a histogram parameter.
pub fn build_error_matrix(errors: &[f64]) -> Vec<Vec<f64>> {
    (0..MATRIX_SIZE)
        .map(|i| {
            (0..MATRIX_SIZE)
                .map(|j| errors.get(i * MATRIX_SIZE + j).copied().unwrap_or(0.0))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn accuracy_metrics_known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];

        let metrics = accuracy_metrics(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.mse, 0.25, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-10);
        // ss_res = 1.25, ss_tot = 10
        assert_relative_eq!(metrics.r2_score, 0.875, epsilon = 1e-10);
    }

    #[test]
    fn accuracy_metrics_length_mismatch() {
        let result = accuracy_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ApiError::LengthMismatch {
                actual: 3,
                predicted: 2
            })
        ));
    }

    #[test]
    fn constant_actual_series_has_zero_r2() {
        let actual = vec![5.0, 5.0, 5.0];
        let predicted = vec![5.0, 5.0, 5.0];

        let metrics = accuracy_metrics(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.r2_score, 0.0);
        assert_relative_eq!(metrics.mse, 0.0);
    }

    #[test]
    fn percentage_errors_substitute_unit_divisor_at_zero() {
        let errors = percentage_errors(&[0.0, 10.0], &[1.0, 11.0]).unwrap();

        assert_relative_eq!(errors[0], 100.0, epsilon = 1e-10);
        assert_relative_eq!(errors[1], 10.0, epsilon = 1e-10);
    }

    #[test]
    fn percentage_errors_length_mismatch() {
        assert!(percentage_errors(&[1.0], &[]).is_err());
    }

    #[test]
    fn error_matrix_drops_excess_values() {
        let errors: Vec<f64> = (0..150).map(|i| i as f64).collect();
        let matrix = build_error_matrix(&errors);

        assert_eq!(matrix.len(), MATRIX_SIZE);
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[3][7], 37.0);
        assert_eq!(matrix[9][9], 99.0);
    }

    #[test]
    fn error_matrix_zero_pads_shortfall() {
        let errors: Vec<f64> = (0..30).map(|i| (i + 1) as f64).collect();
        let matrix = build_error_matrix(&errors);

        assert_eq!(matrix[2][9], 30.0);
        for i in 3..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                assert_eq!(matrix[i][j], 0.0);
            }
        }
    }
}
