//! Example: greedy actions of a hand-weighted representation on Mountain Car bounds

use sentient_repr_features::prelude::*;
use tracing_subscriber::EnvFilter;

const DOMAIN: &str = r#"{
    "limits": [[-1.2, 0.6], [-0.07, 0.07]],
    "continuous_dims": [0, 1],
    "actions_num": 3,
    "goal": {"dim": 0, "threshold": 0.5}
}"#;

const CONFIG: &str = r#"{"discretization": 10, "seed": 7}"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let domain = BoxDomain::from_json_str(DOMAIN)?;
    let config = RepresentationConfig::from_json_str(CONFIG)?;
    let mut rep = Representation::builder(domain)
        .config(config)
        .build(|indexer| Ok(IndependentDiscretization::new(indexer)))?;

    // Velocity features live after the 10 position features. Push left
    // (action 0) when moving left, right (action 2) when moving right.
    let features = rep.features_num();
    for bin in 0..10u8 {
        let weight = f64::from(bin) / 9.0 - 0.5;
        rep.theta_mut()[10 + bin as usize] = -weight;
        rep.theta_mut()[2 * features + 10 + bin as usize] = weight;
    }

    let velocities = [-0.06, -0.02, 0.0, 0.02, 0.06];
    for position in [-1.0, -0.5, 0.0, 0.55] {
        let row: Vec<String> = velocities
            .iter()
            .map(|&v| {
                let state = [position, v];
                let action = rep.best_action(&state)?;
                Ok(format!("{action}({:+.2})", rep.v(&state)?))
            })
            .collect::<Result<_>>()?;
        println!("position {position:+.2}: {}", row.join("  "));
    }

    println!(
        "\n{} features, {} weights, {} aggregated states",
        rep.features_num(),
        rep.theta().len(),
        rep.agg_states_num()
    );
    Ok(())
}
