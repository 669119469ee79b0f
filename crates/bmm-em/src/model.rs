//! Mixture parameters: component weights and per-feature success probabilities.

use bmm_core::EmError;
use serde::{Deserialize, Serialize};

/// Tolerance on `sum(weights) == 1` for caller-supplied models.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A `K`-component Bernoulli mixture over `d` features.
///
/// `theta` is stored component-major: component `k` owns
/// `theta[k * d..(k + 1) * d]`. Outside this crate the model is read-only;
/// only the M-step rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMixtureModel")]
pub struct MixtureModel {
    components: usize,
    features: usize,
    weights: Vec<f64>,
    theta: Vec<f64>,
}

/// Wire form of [`MixtureModel`]; checked on the way in.
#[derive(Deserialize)]
struct RawMixtureModel {
    components: usize,
    features: usize,
    weights: Vec<f64>,
    theta: Vec<f64>,
}

impl TryFrom<RawMixtureModel> for MixtureModel {
    type Error = EmError;

    fn try_from(raw: RawMixtureModel) -> Result<Self, Self::Error> {
        Self::checked(raw.components, raw.features, raw.weights, raw.theta)
    }
}

impl MixtureModel {
    /// Build a model from weights and one parameter row per component.
    ///
    /// Weights must be positive and sum to 1; parameters must lie strictly
    /// inside (0, 1) so every log-probability is finite.
    pub fn new(weights: Vec<f64>, theta: Vec<Vec<f64>>) -> Result<Self, EmError> {
        let components = weights.len();
        if components == 0 {
            return Err(EmError::InvalidComponents(0));
        }
        if theta.len() != components {
            return Err(EmError::InvalidModel {
                message: format!("{} weights but {} parameter rows", components, theta.len()),
            });
        }
        let features = theta[0].len();
        if let Some(k) = theta.iter().position(|row| row.len() != features) {
            return Err(EmError::InvalidModel {
                message: format!("parameter row {k} has {} features, expected {features}", theta[k].len()),
            });
        }
        let theta = theta.into_iter().flatten().collect();
        Self::checked(components, features, weights, theta)
    }

    /// Validate flat parts against the declared shape.
    fn checked(
        components: usize,
        features: usize,
        weights: Vec<f64>,
        theta: Vec<f64>,
    ) -> Result<Self, EmError> {
        if components == 0 {
            return Err(EmError::InvalidComponents(0));
        }
        if features == 0 {
            return Err(EmError::InvalidModel {
                message: "parameter rows are empty".to_string(),
            });
        }
        if weights.len() != components {
            return Err(EmError::InvalidModel {
                message: format!("{} weights for {components} components", weights.len()),
            });
        }
        if theta.len() != components * features {
            return Err(EmError::InvalidModel {
                message: format!(
                    "{} parameters, expected {components}x{features}",
                    theta.len()
                ),
            });
        }
        if let Some(k) = weights.iter().position(|w| !(*w > 0.0 && *w <= 1.0)) {
            return Err(EmError::InvalidModel {
                message: format!("weight {k} is {}, expected a value in (0, 1]", weights[k]),
            });
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EmError::InvalidModel {
                message: format!("weights sum to {total}, expected 1"),
            });
        }
        if let Some(i) = theta.iter().position(|t| !(*t > 0.0 && *t < 1.0)) {
            return Err(EmError::InvalidModel {
                message: format!(
                    "parameter ({}, {}) is {}, expected a value in (0, 1)",
                    i / features,
                    i % features,
                    theta[i]
                ),
            });
        }
        Ok(Self {
            components,
            features,
            weights,
            theta,
        })
    }

    /// Unchecked constructor for initializers and the M-step.
    pub(crate) fn from_parts(
        components: usize,
        features: usize,
        weights: Vec<f64>,
        theta: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(weights.len(), components);
        debug_assert_eq!(theta.len(), components * features);
        Self {
            components,
            features,
            weights,
            theta,
        }
    }

    /// Number of components (K).
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of features (d).
    pub fn features(&self) -> usize {
        self.features
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, k: usize) -> f64 {
        self.weights[k]
    }

    /// Success probabilities of component `k`.
    pub fn theta(&self, k: usize) -> &[f64] {
        &self.theta[k * self.features..(k + 1) * self.features]
    }

    /// All parameters, component-major.
    pub fn theta_flat(&self) -> &[f64] {
        &self.theta
    }

    /// Parameters as one row per component.
    pub fn theta_rows(&self) -> Vec<Vec<f64>> {
        self.theta.chunks(self.features).map(<[f64]>::to_vec).collect()
    }

    /// Log-probability of a row (one bool per feature) under component `k`
    /// alone (weight excluded).
    pub fn component_log_prob(&self, k: usize, row: &[bool]) -> f64 {
        self.theta(k)
            .iter()
            .zip(row)
            .map(|(&t, &x)| if x { t.ln() } else { (1.0 - t).ln() })
            .sum()
    }

    pub(crate) fn set_parts(&mut self, weights: Vec<f64>, theta: Vec<f64>) {
        debug_assert_eq!(weights.len(), self.components);
        debug_assert_eq!(theta.len(), self.components * self.features);
        self.weights = weights;
        self.theta = theta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_model() {
        let model = MixtureModel::new(vec![0.25, 0.75], vec![vec![0.1, 0.9], vec![0.5, 0.5]]).unwrap();
        assert_eq!(model.components(), 2);
        assert_eq!(model.features(), 2);
        assert_eq!(model.theta(1), &[0.5, 0.5]);
        assert_eq!(model.theta_rows()[0], vec![0.1, 0.9]);
        assert_eq!(model.weight(1), 0.75);
    }

    #[test]
    fn test_single_component_weight_one() {
        assert!(MixtureModel::new(vec![1.0], vec![vec![0.3]]).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_theta() {
        let err = MixtureModel::new(vec![1.0], vec![vec![0.3, 1.0]]).unwrap_err();
        assert!(matches!(err, EmError::InvalidModel { .. }));
        let err = MixtureModel::new(vec![1.0], vec![vec![0.0, 0.5]]).unwrap_err();
        assert!(matches!(err, EmError::InvalidModel { .. }));
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(MixtureModel::new(vec![0.5, 0.4], vec![vec![0.5], vec![0.5]]).is_err());
        assert!(MixtureModel::new(vec![1.0, 0.0], vec![vec![0.5], vec![0.5]]).is_err());
        assert!(matches!(
            MixtureModel::new(vec![], vec![]).unwrap_err(),
            EmError::InvalidComponents(0)
        ));
    }

    #[test]
    fn test_rejects_ragged_theta() {
        let err = MixtureModel::new(vec![0.5, 0.5], vec![vec![0.5, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(err, EmError::InvalidModel { .. }));
    }

    #[test]
    fn test_deserialize_validates() {
        let malformed = r#"{"components":2,"features":3,"weights":[1.0,0.0],"theta":[0.5]}"#;
        let err = serde_json::from_str::<MixtureModel>(malformed).unwrap_err();
        assert!(err.to_string().contains("Invalid mixture model"), "{err}");

        let degenerate = r#"{"components":1,"features":2,"weights":[1.0],"theta":[0.5,1.0]}"#;
        assert!(serde_json::from_str::<MixtureModel>(degenerate).is_err());

        let raw = RawMixtureModel {
            components: 2,
            features: 1,
            weights: vec![0.5, 0.5],
            theta: vec![0.5],
        };
        assert!(matches!(
            MixtureModel::try_from(raw),
            Err(EmError::InvalidModel { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip_keeps_model() {
        let model = MixtureModel::new(vec![0.4, 0.6], vec![vec![0.2, 0.7], vec![0.9, 0.1]]).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(serde_json::from_str::<MixtureModel>(&json).unwrap(), model);
    }

    #[test]
    fn test_component_log_prob() {
        let model = MixtureModel::new(vec![1.0], vec![vec![0.5, 0.25]]).unwrap();
        let lp = model.component_log_prob(0, &[true, false]);
        assert!((lp - (0.5f64.ln() + 0.75f64.ln())).abs() < 1e-12);
    }
}
