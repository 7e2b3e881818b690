//! End-to-end behaviour of representations over small domains

use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sentient_repr_features::prelude::*;

/// One continuous dimension on [0, 4], 2 actions, terminal at 4.0
fn line_domain() -> BoxDomain {
    BoxDomain::new(vec![(0.0, 4.0)], vec![0], 2)
        .unwrap()
        .with_goal(0, 4.0)
}

fn tabular_line() -> Representation<BoxDomain, Tabular> {
    Representation::builder(line_domain())
        .discretization(5)
        .seed(17)
        .build(Tabular::new)
        .unwrap()
}

#[test]
fn test_zero_weights_score_everything_equally() {
    let rep = tabular_line();
    assert_eq!(rep.features_num(), 5);
    assert_eq!(rep.theta().len(), 10);

    for i in 0..40u32 {
        let state = [f64::from(i) * 0.1];
        for a in 0..2 {
            assert_eq!(rep.q(&state, a).unwrap(), 0.0);
        }
        assert_eq!(rep.best_actions(&state).unwrap(), vec![0, 1]);
        assert_eq!(rep.v(&state).unwrap(), 0.0);
    }
}

#[test]
fn test_single_weight_selects_its_action() {
    let mut rep = tabular_line();
    rep.theta_mut()[2] = 1.0;

    let state = [2.0];
    assert_eq!(rep.bin_state(&state).unwrap(), vec![2]);
    assert_eq!(rep.q(&state, 0).unwrap(), 1.0);
    assert_eq!(rep.q(&state, 1).unwrap(), 0.0);
    assert_eq!(rep.best_action(&state).unwrap(), 0);
    assert_eq!(rep.v(&state).unwrap(), 1.0);

    // Other bins are untouched.
    assert_eq!(rep.best_actions(&[0.5]).unwrap(), vec![0, 1]);
}

#[test]
fn test_tied_actions_are_all_best() {
    let domain = BoxDomain::new(vec![(0.0, 4.0)], vec![0], 3).unwrap();
    let mut rep = Representation::builder(domain)
        .discretization(4)
        .build(Tabular::new)
        .unwrap();
    // Actions 0 and 2 get identical weights on bin 1, action 1 less.
    rep.theta_mut()[1] = 0.75;
    rep.theta_mut()[5] = 0.25;
    rep.theta_mut()[9] = 0.75;

    let state = [1.5];
    assert_eq!(rep.best_actions(&state).unwrap(), vec![0, 2]);

    let mut rng = StdRng::seed_from_u64(2024);
    let mut counts = [0usize; 3];
    for _ in 0..200 {
        counts[rep.best_action_with(&state, &mut rng).unwrap()] += 1;
    }
    assert_eq!(counts[1], 0);
    assert!(counts[0] > 0 && counts[2] > 0);
}

#[test]
fn test_independent_discretization_sums_dimensions() {
    let domain = BoxDomain::new(vec![(-1.2, 0.6), (-0.07, 0.07)], vec![0, 1], 3)
        .unwrap()
        .with_goal(0, 0.5);
    let mut rep = Representation::builder(domain)
        .discretization(6)
        .build(|indexer| Ok(IndependentDiscretization::new(indexer)))
        .unwrap();
    assert_eq!(rep.features_num(), 12);
    assert_eq!(rep.agg_states_num(), 36);

    let state = [-1.2, 0.07];
    assert_eq!(rep.active_initial_features(&state).unwrap(), vec![0, 11]);
    // Action 2 weights: position bin 0 and velocity bin 5.
    rep.theta_mut()[24] = 0.5;
    rep.theta_mut()[35] = 0.25;
    assert_relative_eq!(rep.q(&state, 2).unwrap(), 0.75);
    assert_eq!(rep.best_action(&state).unwrap(), 2);

    let terminal = [0.55, 0.0];
    assert_eq!(rep.phi(&terminal).unwrap().sum(), 0.0);
    assert_eq!(rep.v(&terminal).unwrap(), 0.0);
}

#[test]
fn test_incremental_growth_keeps_existing_values() {
    let domain = BoxDomain::new(vec![(0.0, 10.0), (0.0, 3.0)], vec![], 2)
        .unwrap()
        .with_goal(0, 9.0);
    let mut rep = Representation::builder(domain)
        .build(|_| Ok(IncrementalTabular::new()))
        .unwrap();
    assert_eq!(rep.features_num(), 0);
    assert!(rep.theta().is_empty());
    assert_eq!(rep.q(&[1.0, 1.0], 1).unwrap(), 0.0);

    assert_eq!(rep.discover(&[1.0, 1.0]).unwrap(), 1);
    assert_eq!(rep.discover(&[1.0, 1.0]).unwrap(), 0);
    assert_eq!(rep.discover(&[9.5, 0.0]).unwrap(), 0);
    assert_eq!(rep.discover(&[4.0, 2.0]).unwrap(), 1);
    assert_eq!(rep.features_num(), 2);
    assert_eq!(rep.theta().len(), 4);

    rep.theta_mut()[0] = 3.0;
    rep.theta_mut()[3] = -2.0;
    let before = [rep.q(&[1.0, 1.0], 0).unwrap(), rep.q(&[4.0, 2.0], 1).unwrap()];

    for x in 5..9u32 {
        rep.discover(&[f64::from(x), 0.0]).unwrap();
    }
    assert_eq!(rep.features_num(), 6);
    assert_eq!(rep.theta().len(), rep.features_num() * rep.actions_num());

    let after = [rep.q(&[1.0, 1.0], 0).unwrap(), rep.q(&[4.0, 2.0], 1).unwrap()];
    assert_eq!(before, after);
    assert_eq!(after, [3.0, -2.0]);

    for state in [[1.0, 1.0], [4.0, 2.0], [6.0, 0.0], [2.0, 2.0]] {
        for a in 0..2 {
            let expected = rep.phi_sa(&state, a).unwrap().dot(rep.theta());
            assert_relative_eq!(rep.q(&state, a).unwrap(), expected);
        }
    }
}

#[test]
fn test_representation_from_json_config() {
    let domain = BoxDomain::from_json_str(
        r#"{"limits": [[0.0, 4.0]], "continuous_dims": [0], "actions_num": 2, "goal": {"dim": 0, "threshold": 4.0}}"#,
    )
    .unwrap();
    let config = RepresentationConfig::from_json_str(r#"{"discretization": 8, "seed": 1}"#).unwrap();
    let rep = Representation::builder(domain)
        .config(config)
        .build(Tabular::new)
        .unwrap();
    assert_eq!(rep.discretization(), 8);
    assert_eq!(rep.features_num(), 8);
    assert_eq!(rep.hash_state(&[3.9]).unwrap(), 7);
}

#[test]
fn test_oversized_tabular_is_rejected_not_panicking() {
    let domain = BoxDomain::new(vec![(0.0, 1.0); 4], vec![0, 1, 2, 3], 2).unwrap();
    let result = Representation::builder(domain)
        .discretization(1 << 17)
        .build(Tabular::new);
    assert!(matches!(result, Err(ReprError::Configuration(_))));

    // Fits in a u64 id but not in memory once multiplied by the actions.
    let domain = BoxDomain::new(vec![(0.0, 1.0); 2], vec![0, 1], 4).unwrap();
    let result = Representation::builder(domain)
        .discretization(1 << 31)
        .build(Tabular::new);
    assert!(matches!(result, Err(ReprError::Configuration(_))));
}

fn rbf_line() -> Representation<BoxDomain, RadialBasis> {
    let config = RadialBasisConfig {
        centers: 6,
        seed: Some(3),
        ..RadialBasisConfig::default()
    };
    Representation::builder(line_domain())
        .build(|indexer| RadialBasis::new(indexer, &config))
        .unwrap()
}

proptest! {
    #[test]
    fn terminal_states_have_zero_features(x in 4.0f64..50.0) {
        let rep = rbf_line();
        let phi = rep.phi(&[x]).unwrap();
        prop_assert_eq!(phi.len(), 7);
        prop_assert!(phi.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn non_terminal_rbf_features_include_bias(x in 0.0f64..3.99) {
        let rep = rbf_line();
        let phi = rep.phi(&[x]).unwrap();
        prop_assert_eq!(phi[6], 1.0);
        prop_assert!(phi.iter().all(|&f| (0.0..=1.0).contains(&f)));
    }

    #[test]
    fn best_actions_hold_the_maximum(w0 in -2.0f64..2.0, w1 in -2.0f64..2.0, x in 0.0f64..3.99) {
        let mut rep = tabular_line();
        let bin = rep.bin_state(&[x]).unwrap()[0];
        rep.theta_mut()[bin] = w0;
        rep.theta_mut()[5 + bin] = w1;
        let qs = rep.qs(&[x]).unwrap();
        let best = rep.best_actions(&[x]).unwrap();
        let v = rep.v(&[x]).unwrap();
        prop_assert_eq!(v, w0.max(w1));
        for (q, a) in qs.values.iter().zip(&qs.actions) {
            prop_assert_eq!(best.contains(a), *q == v);
        }
    }
}
