// Binary logistic regression over sparse features.
//
// Minimizes mean log loss plus an L2 penalty of ||w||² / (2·C·n), the same
// objective as a C-parameterized logistic regression, with the intercept
// left unpenalized. Optimized by full-batch gradient descent with a fixed
// step of 1/L, where L bounds the curvature of the objective.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vectorizer::SparseVector;

/// Training hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// Inverse regularization strength (larger C = weaker penalty)
    pub c: f64,
    /// Maximum gradient descent iterations
    pub max_iter: usize,
    /// Stop once every gradient component is below this magnitude
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
        }
    }
}

/// How a fit ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Mean log loss on the training data at the final weights
    pub final_loss: f64,
}

/// A fitted binary logistic regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// Fit on sparse rows `x` with binary targets `y`.
    ///
    /// Both classes must be present, as with any binary classifier.
    pub fn fit(
        x: &[SparseVector],
        y: &[bool],
        n_features: usize,
        params: &LogisticParams,
    ) -> Result<(Self, FitSummary)> {
        if x.is_empty() {
            anyhow::bail!("Cannot fit logistic regression on zero samples");
        }
        if x.len() != y.len() {
            anyhow::bail!("Got {} samples but {} targets", x.len(), y.len());
        }
        if params.c <= 0.0 || !params.c.is_finite() {
            anyhow::bail!("C must be a positive number, got {}", params.c);
        }
        let positives = y.iter().filter(|&&label| label).count();
        if positives == 0 || positives == y.len() {
            anyhow::bail!(
                "Training targets contain only one class ({positives} positive of {})",
                y.len()
            );
        }
        if let Some(&(index, _)) = x.iter().flatten().find(|&&(index, _)| index >= n_features) {
            anyhow::bail!("Feature index {index} out of range for {n_features} features");
        }

        let n = x.len() as f64;
        let alpha = 1.0 / (params.c * n);

        // Log loss has curvature at most 1/4 per unit of squared row norm
        // (the intercept adds 1).
        let max_sq_norm = x
            .iter()
            .map(|row| row.iter().map(|(_, v)| v * v).sum::<f64>())
            .fold(0.0, f64::max);
        let step = 1.0 / (0.25 * (max_sq_norm + 1.0) + alpha);

        let mut model = Self {
            coefficients: vec![0.0; n_features],
            intercept: 0.0,
        };
        let mut grad = vec![0.0; n_features];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < params.max_iter {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_intercept = 0.0;

            for (row, &label) in x.iter().zip(y) {
                let err = sigmoid(model.raw_score(row)) - target(label);
                for &(j, v) in row {
                    grad[j] += err * v;
                }
                grad_intercept += err;
            }

            grad_intercept /= n;
            let mut max_grad = grad_intercept.abs();
            for (g, w) in grad.iter_mut().zip(&model.coefficients) {
                *g = *g / n + alpha * w;
                max_grad = max_grad.max(g.abs());
            }

            if max_grad < params.tolerance {
                converged = true;
                break;
            }

            for (w, g) in model.coefficients.iter_mut().zip(&grad) {
                *w -= step * g;
            }
            model.intercept -= step * grad_intercept;
            iterations += 1;
        }

        let final_loss = log_loss(
            y,
            &x.iter().map(|row| sigmoid(model.raw_score(row))).collect::<Vec<_>>(),
        );
        debug!(iterations, converged, final_loss, "Fitted logistic regression");

        Ok((
            model,
            FitSummary {
                iterations,
                converged,
                final_loss,
            },
        ))
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Log-odds `w·x + b`. Fails if `x` has a feature this model doesn't know.
    pub fn decision_function(&self, x: &SparseVector) -> Result<f64> {
        if let Some(&(index, _)) = x.iter().find(|&&(index, _)| index >= self.n_features()) {
            anyhow::bail!(
                "Feature index {index} out of range: model has {} features",
                self.n_features()
            );
        }
        Ok(self.raw_score(x))
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<f64> {
        Ok(sigmoid(self.decision_function(x)?))
    }

    fn raw_score(&self, x: &SparseVector) -> f64 {
        self.intercept
            + x.iter()
                .map(|&(j, v)| self.coefficients[j] * v)
                .sum::<f64>()
    }
}

fn target(label: bool) -> f64 {
    if label {
        1.0
    } else {
        0.0
    }
}

/// Numerically stable sigmoid: never overflows `exp` for large |z|.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Mean binary cross-entropy with probabilities clipped away from 0 and 1.
pub fn log_loss(y: &[bool], p: &[f64]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let eps = 1e-15;
    let total: f64 = y
        .iter()
        .zip(p)
        .map(|(&label, &prob)| {
            let prob = prob.clamp(eps, 1.0 - eps);
            if label {
                -prob.ln()
            } else {
                -(1.0 - prob).ln()
            }
        })
        .sum();
    total / y.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Vec<SparseVector>, Vec<bool>) {
        // feature 0 marks positives, feature 1 marks negatives
        let x = vec![
            vec![(0, 1.0)],
            vec![(0, 0.8), (2, 0.6)],
            vec![(0, 0.6), (2, 0.8)],
            vec![(1, 1.0)],
            vec![(1, 0.8), (2, 0.6)],
            vec![(1, 0.6), (2, 0.8)],
        ];
        let y = vec![true, true, true, false, false, false];
        (x, y)
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        // No overflow at the extremes
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        for z in [0.5, 1.0, 3.0] {
            assert!((sigmoid(z) + sigmoid(-z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_loss() {
        assert!(log_loss(&[true], &[1.0]) < 1e-10);
        assert!((log_loss(&[true, false], &[0.5, 0.5]) - std::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(log_loss(&[], &[]), 0.0);
    }

    #[test]
    fn test_fit_separates_classes() {
        let (x, y) = toy_data();
        let params = LogisticParams {
            c: 10.0,
            ..Default::default()
        };
        let (model, summary) = LogisticRegression::fit(&x, &y, 3, &params).unwrap();

        assert!(model.coefficients[0] > 0.0);
        assert!(model.coefficients[1] < 0.0);
        assert!(model.predict_proba(&vec![(0, 1.0)]).unwrap() > 0.5);
        assert!(model.predict_proba(&vec![(1, 1.0)]).unwrap() < 0.5);
        assert!(summary.final_loss < std::f64::consts::LN_2);
        assert!(summary.iterations <= params.max_iter);
    }

    #[test]
    fn test_stronger_penalty_shrinks_weights() {
        let (x, y) = toy_data();
        let weak = LogisticParams {
            c: 100.0,
            ..Default::default()
        };
        let strong = LogisticParams {
            c: 0.01,
            ..Default::default()
        };
        let (loose, _) = LogisticRegression::fit(&x, &y, 3, &weak).unwrap();
        let (tight, _) = LogisticRegression::fit(&x, &y, 3, &strong).unwrap();
        assert!(tight.coefficients[0].abs() < loose.coefficients[0].abs());
    }

    #[test]
    fn test_fit_rejects_single_class() {
        let x = vec![vec![(0, 1.0)], vec![(0, 0.5)]];
        let err = LogisticRegression::fit(&x, &[true, true], 1, &LogisticParams::default())
            .unwrap_err();
        assert!(err.to_string().contains("only one class"));
    }

    #[test]
    fn test_fit_rejects_bad_shapes() {
        let x = vec![vec![(5, 1.0)], vec![(0, 1.0)]];
        assert!(
            LogisticRegression::fit(&x, &[true, false], 2, &LogisticParams::default()).is_err()
        );
        assert!(LogisticRegression::fit(&x, &[true], 10, &LogisticParams::default()).is_err());
        assert!(LogisticRegression::fit(&[], &[], 10, &LogisticParams::default()).is_err());
    }

    #[test]
    fn test_decision_function_checks_dimension() {
        let model = LogisticRegression {
            coefficients: vec![1.0, -1.0],
            intercept: 0.5,
        };
        assert!((model.decision_function(&vec![(0, 2.0)]).unwrap() - 2.5).abs() < 1e-12);
        assert!(model.decision_function(&vec![(2, 1.0)]).is_err());
        // Empty vector scores the intercept alone
        assert!((model.predict_proba(&vec![]).unwrap() - sigmoid(0.5)).abs() < 1e-12);
    }
}
