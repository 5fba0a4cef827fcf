pub mod exact;
pub mod rejection;

pub use exact::ExactInference;
pub use rejection::{ApproximateInference, SampleCounts, SamplingConfig};

use crate::assignment::Assignment;
use crate::distribution::Distribution;
use crate::error::{InferenceError, Result};
use crate::network::BayesianNetwork;
use crate::traits::DomainValue;
use crate::variable::RandomVariable;

/// An inference algorithm answering `P(query | evidence)` over a network.
pub trait Inferencer<V: DomainValue> {
    /// Key type of the returned distribution.
    type Key;

    /// Computes the normalized posterior distribution of `query` given `evidence`.
    ///
    /// # Errors
    /// Fails without returning a partial distribution if the query is invalid
    /// or the network cannot resolve a probability.
    fn ask<N>(
        &self,
        network: &N,
        query: &RandomVariable<V>,
        evidence: &Assignment<V>,
    ) -> Result<Distribution<Self::Key>>
    where
        N: BayesianNetwork<V> + ?Sized;
}

/// Checks a query against a network and returns the network's own copy of
/// the query variable.
///
/// # Errors
/// - `UnknownVariable` if the query or any evidence variable is absent
/// - `InconsistentEvidence` if the evidence assigns the query itself or a
///   value outside a variable's domain
/// - `EmptyDomain` if the query variable has no values
pub fn validate_query<'n, V, N>(
    network: &'n N,
    query: &RandomVariable<V>,
    evidence: &Assignment<V>,
) -> Result<&'n RandomVariable<V>>
where
    V: DomainValue,
    N: BayesianNetwork<V> + ?Sized,
{
    let resolved = network
        .variable(query.name())
        .ok_or_else(|| InferenceError::unknown_variable(query.name()))?;

    validate_evidence(network, evidence)?;
    if evidence.contains(resolved) {
        return Err(InferenceError::inconsistent_evidence(
            resolved.name(),
            "the query variable cannot also be evidence",
        ));
    }

    if resolved.domain().is_empty() {
        return Err(InferenceError::empty_domain(resolved.name()));
    }

    Ok(resolved)
}

/// Checks that every evidence variable belongs to the network and is
/// assigned a value from its domain.
///
/// # Errors
/// - `UnknownVariable` if an evidence variable is absent
/// - `InconsistentEvidence` if a value lies outside the variable's domain
pub fn validate_evidence<V, N>(network: &N, evidence: &Assignment<V>) -> Result<()>
where
    V: DomainValue,
    N: BayesianNetwork<V> + ?Sized,
{
    for (variable, value) in evidence.iter() {
        let known = network
            .variable(variable.name())
            .ok_or_else(|| InferenceError::unknown_variable(variable.name()))?;
        if !known.contains(value) {
            return Err(InferenceError::inconsistent_evidence(
                variable.name(),
                format!("value {value:?} is not in the domain {:?}", known.domain()),
            ));
        }
    }
    Ok(())
}

/// Exact posterior of `query` given `evidence`, rounded for display.
///
/// # Errors
/// See [`ExactInference::ask`](Inferencer::ask).
///
/// # Example
/// ```rust
/// use bayes_inference::{exact_ask, Assignment, BayesianNetwork, DiscreteNetwork};
///
/// let network = DiscreteNetwork::builder()
///     .boolean_node("A", &[], vec![(vec![], 0.5)])
///     .boolean_node("B", &["A"], vec![(vec![true], 0.9), (vec![false], 0.2)])
///     .build()
///     .unwrap();
/// let a = network.variable("A").unwrap().clone();
/// let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();
///
/// let posterior = exact_ask(&network, &a, &evidence).unwrap();
/// assert_eq!(posterior.get(&true), Some(0.818));
/// ```
pub fn exact_ask<V, N>(
    network: &N,
    query: &RandomVariable<V>,
    evidence: &Assignment<V>,
) -> Result<Distribution<V>>
where
    V: DomainValue,
    N: BayesianNetwork<V> + ?Sized,
{
    ExactInference::new().ask(network, query, evidence)
}

/// Rejection-sampling estimate of `query` given `evidence`, keyed by
/// `"<query> true"` and `"<query> false"`.
///
/// # Errors
/// See [`ApproximateInference::ask`](Inferencer::ask).
pub fn approximate_ask<N>(
    network: &N,
    query: &RandomVariable<bool>,
    evidence: &Assignment<bool>,
    sample_limit: usize,
) -> Result<Distribution<String>>
where
    N: BayesianNetwork<bool> + ?Sized,
{
    ApproximateInference::new(sample_limit).ask(network, query, evidence)
}
