//! Simple linear least-squares fit with standard errors.
//!
//! ```text
//! minimize Σ (y_i - (a·x_i + b))^2
//! ```
//!
//! Pairs where either coordinate is NaN or infinite are skipped. The sums are
//! taken around the means (two passes) so data with a large common offset,
//! e.g. timestamps, keeps its precision.

use thiserror::Error;

/// Why no line could be fitted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FitError {
    #[error("need at least 2 valid points, have {valid}")]
    InsufficientData { valid: usize },

    #[error("all x values are equal, slope is undefined")]
    DegenerateData,
}

/// Slope and intercept of `y = slope·x + intercept` with their standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// NaN when only two points were fitted.
    pub slope_error: f64,
    /// NaN when only two points were fitted.
    pub intercept_error: f64,
    /// Number of valid pairs used.
    pub n: usize,
    /// Pearson correlation coefficient; NaN when y is constant.
    pub r: f64,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through the finite `(xs[i], ys[i])` pairs.
///
/// If the slices differ in length the extra tail of the longer one is ignored.
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<FitResult, FitError> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return Err(FitError::InsufficientData { valid: n });
    }
    // Decided on the raw values: the centered sum of identical fractional
    // x values need not round to exactly zero.
    let x0 = pairs[0].0;
    if pairs.iter().all(|p| p.0 == x0) {
        return Err(FitError::DegenerateData);
    }
    let nf = n as f64;

    let x_mean = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let y_mean = pairs.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut sxx, mut sxy, mut syy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
        sum_x2 += x * x;
    }

    // Distinct but nearly equal x values can still underflow here.
    if sxx <= 0.0 {
        return Err(FitError::DegenerateData);
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = pairs
        .iter()
        .map(|&(x, y)| {
            let r = y - (slope * x + intercept);
            r * r
        })
        .sum();

    // n == 2 leaves no residual degrees of freedom.
    let (slope_error, intercept_error) = if n > 2 {
        let s2 = ss_res / (nf - 2.0);
        let slope_error = (s2 / sxx).sqrt();
        (slope_error, slope_error * (sum_x2 / nf).sqrt())
    } else {
        (f64::NAN, f64::NAN)
    };

    let r = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        f64::NAN
    };

    log::debug!("fit over {n} points: slope={slope}, intercept={intercept}");

    Ok(FitResult {
        slope,
        intercept,
        slope_error,
        intercept_error,
        n,
        r,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + b.abs())
    }

    /// Normal-equation solution, computed independently of `fit`.
    fn reference(xs: &[f64], ys: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let sx: f64 = xs.iter().sum();
        let sy: f64 = ys.iter().sum();
        let sxx: f64 = xs.iter().map(|x| x * x).sum();
        let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
        let det = n * sxx - sx * sx;
        ((n * sxy - sx * sy) / det, (sxx * sy - sx * sxy) / det)
    }

    #[test]
    fn exact_line() {
        let f = fit(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!(close(f.slope, 2.0, 1e-12));
        assert!(f.intercept.abs() < 1e-12);
        assert!(f.slope_error.is_finite() && f.slope_error < 1e-12);
        assert!(f.intercept_error.is_finite() && f.intercept_error < 1e-12);
        assert_eq!(f.n, 3);
        assert!(close(f.r, 1.0, 1e-12));
    }

    #[test]
    fn matches_reference_solution() {
        let xs = [0.5, 1.3, 2.0, 3.7, 4.1, 5.9, 7.2];
        let ys = [1.1, 2.9, 3.7, 8.2, 8.0, 12.5, 14.9];
        let f = fit(&xs, &ys).unwrap();
        let (a, b) = reference(&xs, &ys);
        assert!(close(f.slope, a, 1e-10));
        assert!(close(f.intercept, b, 1e-10));
    }

    #[test]
    fn standard_errors_match_textbook_values() {
        // y = x + noise; residuals are [0.1, -0.2, 0.1, 0.0] around the fit.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 0.8, 2.1, 2.9];
        let f = fit(&xs, &ys).unwrap();

        let n = 4.0;
        let x_mean = 1.5;
        let sxx: f64 = xs.iter().map(|x| (x - x_mean) * (x - x_mean)).sum();
        let ss_res: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (y - f.predict(*x)).powi(2))
            .sum();
        let slope_err = (ss_res / (n - 2.0) / sxx).sqrt();
        let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

        assert!(close(f.slope_error, slope_err, 1e-12));
        assert!(close(f.intercept_error, slope_err * (sum_x2 / n).sqrt(), 1e-12));
    }

    #[test]
    fn order_does_not_matter() {
        let xs = [3.0, 1.0, 4.0, 1.5, 5.0, 9.0];
        let ys = [2.0, 7.0, 1.0, 8.0, 2.5, 8.1];
        let a = fit(&xs, &ys).unwrap();

        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.reverse();
        pairs.swap(0, 3);
        let (rx, ry): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let b = fit(&rx, &ry).unwrap();

        assert!(close(a.slope, b.slope, 1e-12));
        assert!(close(a.intercept, b.intercept, 1e-12));
        assert!(close(a.slope_error, b.slope_error, 1e-10));
        assert!(close(a.intercept_error, b.intercept_error, 1e-10));
    }

    #[test]
    fn single_point_is_insufficient() {
        assert_eq!(
            fit(&[1.0], &[2.0]),
            Err(FitError::InsufficientData { valid: 1 })
        );
        assert_eq!(fit(&[], &[]), Err(FitError::InsufficientData { valid: 0 }));
    }

    #[test]
    fn constant_x_is_degenerate() {
        assert_eq!(
            fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]),
            Err(FitError::DegenerateData)
        );
    }

    #[test]
    fn constant_fractional_x_is_degenerate() {
        assert_eq!(
            fit(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]),
            Err(FitError::DegenerateData)
        );
        // Only valid pairs count: the differing x sits in a dropped pair.
        assert_eq!(
            fit(&[0.7, 5.0, 0.7], &[1.0, f64::NAN, 2.0]),
            Err(FitError::DegenerateData)
        );
    }

    #[test]
    fn nan_in_either_coordinate_drops_the_pair() {
        let nan = f64::NAN;
        let f = fit(&[1.0, nan, 2.0, 3.0, 10.0], &[2.0, 100.0, 4.0, 6.0, nan]).unwrap();
        assert_eq!(f.n, 3);
        assert!(close(f.slope, 2.0, 1e-12));

        assert_eq!(
            fit(&[1.0, nan, 5.0], &[nan, 2.0, 3.0]),
            Err(FitError::InsufficientData { valid: 1 })
        );
    }

    #[test]
    fn infinite_values_are_not_valid() {
        let f = fit(&[1.0, 2.0, f64::INFINITY, 3.0], &[1.0, 2.0, 5.0, 3.0]).unwrap();
        assert_eq!(f.n, 3);
        assert!(close(f.slope, 1.0, 1e-12));
    }

    #[test]
    fn two_points_have_undefined_errors() {
        let f = fit(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert!(close(f.slope, 2.0, 1e-12));
        assert!(close(f.intercept, 1.0, 1e-12));
        assert!(f.slope_error.is_nan());
        assert!(f.intercept_error.is_nan());
    }

    #[test]
    fn large_offset_keeps_precision() {
        let base = 1.0e9;
        let xs: Vec<f64> = (0..5).map(|i| base + i as f64).collect();
        let ys: Vec<f64> = (0..5).map(|i| 3.0 * i as f64 + 1.0).collect();
        let f = fit(&xs, &ys).unwrap();
        assert!(close(f.slope, 3.0, 1e-9));
        assert!(close(f.predict(base), 1.0, 1e-6));
    }

    #[test]
    fn constant_y_has_zero_slope_and_undefined_r() {
        let f = fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(f.slope, 0.0);
        assert_eq!(f.intercept, 4.0);
        assert!(f.r.is_nan());
    }
}
