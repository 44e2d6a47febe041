//! Ridge least squares on a flat row-major normal matrix.

use crate::forecast::ForecastError;

const PIVOT_EPSILON: f64 = 1e-12;

/// Minimizes `|X b - y|^2 + sum(penalty_j * b_j^2)`.
///
/// `rows` are the rows of `X`; every row must have `penalties.len()` entries.
pub fn solve_ridge(rows: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<Vec<f64>, ForecastError> {
    let n = penalties.len();
    let mut a = vec![0.0; n * n];
    let mut b = vec![0.0; n];

    for (row, &target) in rows.iter().zip(y) {
        for i in 0..n {
            let ri = row[i];
            if ri == 0.0 {
                continue;
            }
            b[i] += ri * target;
            for j in i..n {
                a[i * n + j] += ri * row[j];
            }
        }
    }

    // Mirror the upper triangle and add the ridge diagonal
    for i in 0..n {
        for j in 0..i {
            a[i * n + j] = a[j * n + i];
        }
        a[i * n + i] += penalties[i];
    }

    if a.iter().chain(&b).any(|v| !v.is_finite()) {
        return Err(ForecastError::Degenerate("non-finite normal equations".to_string()));
    }

    solve_system(a, b, n)
}

/// Gaussian elimination with partial pivoting on an `n x n` row-major matrix.
pub fn solve_system(mut a: Vec<f64>, mut b: Vec<f64>, n: usize) -> Result<Vec<f64>, ForecastError> {
    for col in 0..n {
        // Find pivot
        let mut pivot_row = col;
        for r in (col + 1)..n {
            if a[r * n + col].abs() > a[pivot_row * n + col].abs() {
                pivot_row = r;
            }
        }

        let pivot = a[pivot_row * n + col];
        if pivot.abs() < PIVOT_EPSILON {
            return Err(ForecastError::Degenerate(format!(
                "singular normal matrix at column {}",
                col
            )));
        }

        // Swap rows
        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
            }
            b.swap(col, pivot_row);
        }

        // Eliminate below
        for r in (col + 1)..n {
            let factor = a[r * n + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                a[r * n + j] -= factor * a[col * n + j];
            }
            b[r] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = ((i + 1)..n).map(|j| a[i * n + j] * x[j]).sum();
        x[i] = (b[i] - tail) / a[i * n + i];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() {
        // 2x + y = 5, x + 3y = 10
        let x = solve_system(vec![2.0, 1.0, 1.0, 3.0], vec![5.0, 10.0], 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn pivoting_handles_zero_leading_entry() {
        let x = solve_system(vec![0.0, 1.0, 1.0, 0.0], vec![2.0, 3.0], 2).unwrap();
        assert_eq!(x, vec![3.0, 2.0]);
    }

    #[test]
    fn singular_matrix_is_degenerate() {
        let err = solve_system(vec![1.0, 2.0, 2.0, 4.0], vec![1.0, 2.0], 2).unwrap_err();
        assert!(matches!(err, ForecastError::Degenerate(_)));
    }

    #[test]
    fn ridge_recovers_exact_line() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![1.0, i as f64 / 19.0]).collect();
        let y: Vec<f64> = rows.iter().map(|r| 0.3 + 0.5 * r[1]).collect();
        let coef = solve_ridge(&rows, &y, &[1e-9, 1e-9]).unwrap();
        assert!((coef[0] - 0.3).abs() < 1e-6);
        assert!((coef[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64 / 9.0]).collect();
        let y: Vec<f64> = rows.iter().map(|r| 2.0 * r[0]).collect();
        let loose = solve_ridge(&rows, &y, &[1e-9]).unwrap();
        let tight = solve_ridge(&rows, &y, &[100.0]).unwrap();
        assert!(tight[0].abs() < loose[0].abs());
    }

    #[test]
    fn non_finite_input_is_degenerate() {
        let rows = vec![vec![1.0, f64::NAN], vec![1.0, 1.0]];
        let err = solve_ridge(&rows, &[1.0, 2.0], &[1e-6, 1e-6]).unwrap_err();
        assert!(matches!(err, ForecastError::Degenerate(_)));
    }
}
