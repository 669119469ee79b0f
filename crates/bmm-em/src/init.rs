//! Initial mixture parameters.
//!
//! EM only finds a local optimum, so the starting point matters. The engine
//! asks an [`Initializer`] for the first model; [`from_settings`] picks the
//! one named by `EmSettings::init`. All random schemes are driven by a seeded
//! `Xoshiro256StarStar`, so the same seed reproduces the same start.

use bmm_core::config::InitStrategy;
use bmm_core::constants::{CENTRE_HIGH, CENTRE_LOW, RANDOM_THETA_RANGE};
use bmm_core::EmError;
use bmm_matrix::BinaryMatrix;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::model::MixtureModel;
use crate::mstep;
use crate::responsibilities::Responsibilities;
use crate::settings::EmSettings;

/// Produces the starting model for a fit.
///
/// `matrix` is non-empty and `components >= 1` when the engine calls this.
pub trait Initializer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn initialize(
        &self,
        matrix: &dyn BinaryMatrix,
        components: usize,
    ) -> Result<MixtureModel, EmError>;
}

/// The initializer selected by `settings.init`.
pub fn from_settings(settings: &EmSettings) -> Box<dyn Initializer> {
    match settings.init {
        InitStrategy::FarthestFirst => Box::new(FarthestFirstInit::new(settings.seed)),
        InitStrategy::Random => Box::new(RandomInit {
            seed: settings.seed,
            perturb_weights: settings.perturb_weights,
        }),
        InitStrategy::RandomAssignment => Box::new(RandomAssignmentInit {
            seed: settings.seed,
            epsilon: settings.epsilon,
        }),
    }
}

fn random_theta(rng: &mut Xoshiro256StarStar, len: usize) -> Vec<f64> {
    let (low, high) = RANDOM_THETA_RANGE;
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}

/// Centres on mutually distant rows.
///
/// The first centre is a random row; each next centre is the row with the
/// largest Hamming distance to its nearest chosen centre, lowest index on
/// ties. A centre row becomes `CENTRE_HIGH` where it has a 1 and `CENTRE_LOW`
/// elsewhere. Once every row coincides with a centre, the remaining
/// components get random parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestFirstInit {
    pub seed: u64,
}

impl FarthestFirstInit {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Initializer for FarthestFirstInit {
    fn name(&self) -> &'static str {
        InitStrategy::FarthestFirst.name()
    }

    fn initialize(
        &self,
        matrix: &dyn BinaryMatrix,
        components: usize,
    ) -> Result<MixtureModel, EmError> {
        let rows = matrix.rows();
        let d = matrix.cols();
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);

        let first = rng.gen_range(0..rows);
        let mut centres = vec![first];
        let mut nearest: Vec<usize> = (0..rows).map(|r| matrix.hamming(r, first)).collect();
        while centres.len() < components {
            let (best, distance) = nearest
                .iter()
                .copied()
                .enumerate()
                .fold((0, 0), |acc, (r, dist)| if dist > acc.1 { (r, dist) } else { acc });
            if distance == 0 {
                break;
            }
            centres.push(best);
            for (r, slot) in nearest.iter_mut().enumerate() {
                *slot = (*slot).min(matrix.hamming(r, best));
            }
        }
        tracing::debug!(centres = ?centres, "farthest-first centres");

        let mut theta = Vec::with_capacity(components * d);
        for &centre in &centres {
            theta.extend((0..d).map(|c| if matrix.at(centre, c) { CENTRE_HIGH } else { CENTRE_LOW }));
        }
        for _ in centres.len()..components {
            theta.extend(random_theta(&mut rng, d));
        }
        let weights = vec![1.0 / components as f64; components];
        Ok(MixtureModel::from_parts(components, d, weights, theta))
    }
}

/// Independent uniform parameters in `RANDOM_THETA_RANGE`.
///
/// Weights are uniform unless `perturb_weights`, in which case each weight is
/// drawn from `U(0.5, 1.5)` and the set is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomInit {
    pub seed: u64,
    pub perturb_weights: bool,
}

impl Initializer for RandomInit {
    fn name(&self) -> &'static str {
        InitStrategy::Random.name()
    }

    fn initialize(
        &self,
        matrix: &dyn BinaryMatrix,
        components: usize,
    ) -> Result<MixtureModel, EmError> {
        let d = matrix.cols();
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);
        let theta = random_theta(&mut rng, components * d);
        let weights = if self.perturb_weights {
            let raw: Vec<f64> = (0..components).map(|_| rng.gen_range(0.5..1.5)).collect();
            let total: f64 = raw.iter().sum();
            raw.into_iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / components as f64; components]
        };
        Ok(MixtureModel::from_parts(components, d, weights, theta))
    }
}

/// Random hard labels followed by one M-step.
///
/// A component that draws no rows starts at the `epsilon` floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomAssignmentInit {
    pub seed: u64,
    pub epsilon: f64,
}

impl Initializer for RandomAssignmentInit {
    fn name(&self) -> &'static str {
        InitStrategy::RandomAssignment.name()
    }

    fn initialize(
        &self,
        matrix: &dyn BinaryMatrix,
        components: usize,
    ) -> Result<MixtureModel, EmError> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);
        let labels: Vec<usize> = (0..matrix.rows())
            .map(|_| rng.gen_range(0..components))
            .collect();
        let resp = Responsibilities::from_labels(&labels, components);
        let (weights, theta) = mstep::estimate(matrix, &resp, self.epsilon, false);
        Ok(MixtureModel::from_parts(components, matrix.cols(), weights, theta))
    }
}

/// A caller-supplied starting model.
///
/// Lets two fits share the exact same start, e.g. a dense and a sparse view
/// of one matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedInit(pub MixtureModel);

impl Initializer for FixedInit {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn initialize(
        &self,
        matrix: &dyn BinaryMatrix,
        components: usize,
    ) -> Result<MixtureModel, EmError> {
        let model = &self.0;
        if model.components() != components || model.features() != matrix.cols() {
            return Err(EmError::ModelShape {
                components: model.components(),
                features: model.features(),
                expected_components: components,
                expected_features: matrix.cols(),
            });
        }
        Ok(model.clone())
    }
}
