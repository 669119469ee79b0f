use bmm_core::config::InitStrategy;
use bmm_em::{EmEngine, EmSettings};
use bmm_matrix::{DenseMatrix, Layout, SparseMatrix};
use proptest::prelude::*;

/// A random shape and its row-major cells.
fn arb_matrix() -> impl Strategy<Value = DenseMatrix> {
    (1usize..40, 1usize..10).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(0u8..=1, rows * cols).prop_map(move |cells| {
            DenseMatrix::from_values(&cells, rows, cols, Layout::RowMajor).unwrap()
        })
    })
}

fn arb_init() -> impl Strategy<Value = InitStrategy> {
    prop_oneof![
        Just(InitStrategy::FarthestFirst),
        Just(InitStrategy::Random),
        Just(InitStrategy::RandomAssignment),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fit_outputs_are_distributions(
        matrix in arb_matrix(),
        components in 1usize..5,
        seed in any::<u64>(),
        init in arb_init(),
    ) {
        let settings = EmSettings::new(components, 60).with_seed(seed).with_init(init);
        let result = EmEngine::new(settings).unwrap().fit(&matrix).unwrap();

        let total: f64 = result.model.weights().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(result.model.weights().iter().all(|w| *w > 0.0));
        prop_assert!(result.model.theta_flat().iter().all(|t| *t > 0.0 && *t < 1.0));
        for r in 0..result.responsibilities.rows() {
            let s: f64 = result.responsibilities.row(r).iter().sum();
            prop_assert!((s - 1.0).abs() < 1e-9);
        }
        prop_assert_eq!(result.iterations, result.log_likelihoods.len());
        prop_assert!(result.final_log_likelihood.is_finite());
    }

    #[test]
    fn weights_stay_normalized_after_every_iteration(
        matrix in arb_matrix(),
        components in 1usize..5,
        seed in any::<u64>(),
        init in arb_init(),
    ) {
        // Each cap leaves the model as it stood after that M-step.
        for max_iter in 1..=6 {
            let mut settings = EmSettings::new(components, max_iter)
                .with_seed(seed)
                .with_init(init);
            settings.tolerance = f64::MIN_POSITIVE;
            let result = EmEngine::new(settings).unwrap().fit(&matrix).unwrap();

            let total: f64 = result.model.weights().iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "iteration {}: sum {}", max_iter, total);
            prop_assert!(result.model.weights().iter().all(|w| *w > 0.0));
        }
    }

    #[test]
    fn log_likelihood_never_decreases(
        matrix in arb_matrix(),
        components in 1usize..5,
        seed in any::<u64>(),
    ) {
        let settings = EmSettings::new(components, 60).with_seed(seed).with_init(InitStrategy::Random);
        let result = EmEngine::new(settings).unwrap().fit(&matrix).unwrap();
        for pair in result.log_likelihoods.windows(2) {
            let slack = 1e-9 * (1.0 + pair[0].abs());
            prop_assert!(pair[1] >= pair[0] - slack, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn dense_and_sparse_fits_are_identical(
        matrix in arb_matrix(),
        components in 1usize..4,
        seed in any::<u64>(),
    ) {
        let sparse = SparseMatrix::from_matrix(&matrix);
        let engine = EmEngine::new(EmSettings::new(components, 40).with_seed(seed)).unwrap();
        prop_assert_eq!(engine.fit(&matrix).unwrap(), engine.fit(&sparse).unwrap());
    }

    #[test]
    fn parallel_and_sequential_fits_are_identical(
        matrix in arb_matrix(),
        components in 1usize..4,
    ) {
        let base = EmSettings::new(components, 40).with_init(InitStrategy::Random);
        let parallel = EmEngine::new(base.clone()).unwrap().fit(&matrix).unwrap();
        let sequential = EmEngine::new(base.with_parallel(false)).unwrap().fit(&matrix).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}
