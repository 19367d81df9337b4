//! Natural cubic spline interpolation of tabulated optical constants.

use crate::provider::MaterialError;

/// A natural cubic spline through real-valued knots.
///
/// Piecewise cubics with continuous first and second derivatives and zero
/// curvature at both ends.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at the knots.
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Build a spline through `(xs[i], ys[i])`.
    ///
    /// `xs` must be strictly increasing with at least two points and the
    /// same length as `ys`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        if xs.len() != ys.len() {
            return Err(MaterialError::DataError(format!(
                "{} knots but {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MaterialError::DataError("need at least 2 knots".into()));
        }
        if let Some(i) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
            return Err(MaterialError::DataError(format!(
                "knots must be strictly increasing (index {i})"
            )));
        }

        let n = xs.len();
        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Tridiagonal forward sweep
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            let slope_change =
                (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * slope_change / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        Ok(Self { xs, ys, y2s })
    }

    /// First and last knot.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate at `x`. Outside the knots the boundary cubic is extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        let hi = self.xs.partition_point(|&k| k <= x).clamp(1, self.xs.len() - 1);
        let lo = hi - 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_spline_passes_through_knots() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert_abs_diff_eq!(spline.evaluate(*x), *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_linear_data_is_reproduced_between_knots() {
        let xs = vec![0.0, 1.0, 3.0, 4.5];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 1.0).collect();
        let spline = CubicSpline::new(xs, ys).unwrap();
        for x in [0.25, 1.7, 2.9, 4.4] {
            assert_abs_diff_eq!(spline.evaluate(x), 2.0 * x - 1.0, epsilon = 1e-12);
        }
        assert_eq!(spline.domain(), (0.0, 4.5));
    }

    #[test]
    fn test_malformed_tables_are_rejected() {
        assert!(CubicSpline::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(CubicSpline::new(vec![1.0], vec![1.0]).is_err());
        assert!(CubicSpline::new(vec![1.0, 1.0, 2.0], vec![0.0; 3]).is_err());
    }
}
