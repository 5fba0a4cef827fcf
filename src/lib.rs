//! # bayes-inference
//!
//! Posterior queries over discrete Bayesian networks, answered either exactly
//! by enumeration or approximately by rejection sampling.
//!
//! ```rust
//! use bayes_inference::{
//!     ApproximateInference, Assignment, BayesianNetwork, DiscreteNetwork, ExactInference,
//!     Inferencer, SamplingConfig,
//! };
//!
//! // Cloudy -> {Sprinkler, Rain} -> WetGrass
//! let network = DiscreteNetwork::builder()
//!     .boolean_node("Cloudy", &[], vec![(vec![], 0.5)])
//!     .boolean_node("Sprinkler", &["Cloudy"], vec![(vec![true], 0.1), (vec![false], 0.5)])
//!     .boolean_node("Rain", &["Cloudy"], vec![(vec![true], 0.8), (vec![false], 0.2)])
//!     .boolean_node("WetGrass", &["Sprinkler", "Rain"], vec![
//!         (vec![true, true], 0.99),
//!         (vec![true, false], 0.9),
//!         (vec![false, true], 0.9),
//!         (vec![false, false], 0.0),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let rain = network.variable("Rain").unwrap().clone();
//! let evidence = Assignment::from_names(&network, [("WetGrass", true)]).unwrap();
//!
//! let exact = ExactInference::new().ask(&network, &rain, &evidence).unwrap();
//! let sampled = ApproximateInference::with_config(
//!     SamplingConfig::default().with_sample_limit(20_000).with_seed(3),
//! )
//! .ask(&network, &rain, &evidence)
//! .unwrap();
//!
//! let exact_true = exact.get(&true).unwrap();
//! assert!((sampled.get("Rain true").unwrap() - exact_true).abs() < 0.05);
//! ```
//!
//! ## Features
//!
//! - **Exact inference**: recursive enumeration in topological order, summing
//!   out hidden variables; works for any finite domain
//! - **Rejection sampling**: ancestral sampling of boolean networks, discarding
//!   trials that contradict the evidence
//! - **Name-keyed identity**: variables, assignments and tallies are keyed by
//!   variable name
//! - **Parallel sampling** (feature `parallel`): batch-parallel trials with
//!   seeded per-batch generators

pub mod assignment;
pub mod distribution;
pub mod error;
pub mod inference;
pub mod network;
pub mod traits;
pub mod variable;

pub use assignment::Assignment;
pub use distribution::{DEFAULT_PRECISION, Distribution};
pub use error::{InferenceError, Result};
pub use inference::{
    ApproximateInference, ExactInference, Inferencer, SampleCounts, SamplingConfig,
    approximate_ask, exact_ask,
};
pub use network::{BayesianNetwork, DiscreteNetwork, NetworkBuilder};
pub use variable::RandomVariable;
