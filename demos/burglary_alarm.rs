//! # Burglary Alarm Example
//!
//! Answers the classic burglary-alarm queries exactly and by rejection
//! sampling, and prints both side by side.
//!
//! Run with:
//! ```bash
//! RUST_LOG=bayes_inference=debug cargo run --example burglary_alarm --release
//! ```

use bayes_inference::{
    ApproximateInference, Assignment, BayesianNetwork, DiscreteNetwork, ExactInference,
    Inferencer, Result, SamplingConfig,
};
use tracing_subscriber::EnvFilter;

const SAMPLE_LIMIT: usize = 200_000;

fn build_network() -> Result<DiscreteNetwork<bool>> {
    DiscreteNetwork::builder()
        .boolean_node("Burglary", &[], vec![(vec![], 0.001)])
        .boolean_node("Earthquake", &[], vec![(vec![], 0.002)])
        .boolean_node(
            "Alarm",
            &["Burglary", "Earthquake"],
            vec![
                (vec![true, true], 0.95),
                (vec![true, false], 0.94),
                (vec![false, true], 0.29),
                (vec![false, false], 0.001),
            ],
        )
        .boolean_node("JohnCalls", &["Alarm"], vec![(vec![true], 0.90), (vec![false], 0.05)])
        .boolean_node("MaryCalls", &["Alarm"], vec![(vec![true], 0.70), (vec![false], 0.01)])
        .build()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Burglary Alarm Network ===\n");

    let network = build_network()?;
    let exact = ExactInference::new();
    let sampler = ApproximateInference::with_config(
        SamplingConfig::default().with_sample_limit(SAMPLE_LIMIT),
    );

    let queries: [(&str, &[(&str, bool)]); 4] = [
        ("Burglary", &[("JohnCalls", true), ("MaryCalls", true)]),
        ("Earthquake", &[("JohnCalls", true), ("MaryCalls", true)]),
        ("Alarm", &[("JohnCalls", true)]),
        ("Burglary", &[("Alarm", true), ("Earthquake", true)]),
    ];

    for (name, observed) in queries {
        let Some(query) = network.variable(name).cloned() else {
            continue;
        };
        let evidence = Assignment::from_names(&network, observed.iter().copied())?;
        let given: Vec<String> = observed
            .iter()
            .map(|(variable, value)| format!("{variable}={value}"))
            .collect();

        println!("P({name} | {})", given.join(", "));
        println!("  exact:     {}", exact.ask(&network, &query, &evidence)?);
        match sampler.ask(&network, &query, &evidence) {
            Ok(dist) => println!("  sampled:   {dist}"),
            Err(err) => println!("  sampled:   {err}"),
        }
        println!();
    }

    Ok(())
}
