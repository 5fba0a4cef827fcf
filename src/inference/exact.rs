use super::{Inferencer, validate_query};
use crate::assignment::Assignment;
use crate::distribution::{DEFAULT_PRECISION, Distribution};
use crate::error::{InferenceError, Result};
use crate::network::BayesianNetwork;
use crate::traits::DomainValue;
use crate::variable::RandomVariable;
use tracing::{debug, trace};

/// Exact inference by enumeration.
///
/// For each value of the query variable the joint probability of that value
/// and the evidence is computed by walking the network in topological order:
/// assigned variables contribute their conditional probability directly,
/// hidden ones are summed out over their domain. The cost is exponential in
/// the number of hidden variables.
///
/// # Example
/// ```rust
/// use bayes_inference::{Assignment, BayesianNetwork, DiscreteNetwork, ExactInference, Inferencer};
///
/// let network = DiscreteNetwork::<bool>::builder()
///     .boolean_node("Rain", &[], vec![(vec![], 0.3)])
///     .build()
///     .unwrap();
/// let rain = network.variable("Rain").unwrap().clone();
///
/// let prior = ExactInference::new().ask(&network, &rain, &Assignment::new()).unwrap();
/// assert_eq!(prior.get(&true), Some(0.3));
/// assert_eq!(prior.get(&false), Some(0.7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactInference {
    precision: Option<u32>,
}

impl ExactInference {
    /// Creates an engine that rounds results to [`DEFAULT_PRECISION`] places.
    #[must_use]
    pub fn new() -> Self {
        Self {
            precision: Some(DEFAULT_PRECISION),
        }
    }

    /// Sets the number of decimal places results are rounded to; `None`
    /// returns the normalized values untouched.
    #[must_use]
    pub fn with_precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }
}

impl Default for ExactInference {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: DomainValue> Inferencer<V> for ExactInference {
    type Key = V;

    fn ask<N>(
        &self,
        network: &N,
        query: &RandomVariable<V>,
        evidence: &Assignment<V>,
    ) -> Result<Distribution<V>>
    where
        N: BayesianNetwork<V> + ?Sized,
    {
        let query = validate_query(network, query, evidence)?;
        debug!(
            query = query.name(),
            evidence = evidence.len(),
            "starting enumeration"
        );

        let variables = network.topological_order();
        let mut dist = Distribution::new();
        for value in query.domain() {
            let extended = evidence.with(query, value.clone());
            let mass = enumerate_all(network, variables, &extended)?;
            trace!(query = query.name(), ?value, mass, "enumerated query value");
            dist.insert(value.clone(), mass);
        }

        dist.normalize()?;
        Ok(match self.precision {
            Some(places) => dist.rounded(places),
            None => dist,
        })
    }
}

/// Sums the joint probability of `assignment` over every completion of the
/// variables in `variables` that `assignment` leaves unset.
///
/// `variables` must be a topologically ordered suffix of the network so that
/// each variable's parents are fixed by the time it is reached.
///
/// # Errors
/// Propagates lookup failures from the network and reports `EmptyDomain` for
/// a hidden variable with nothing to sum over.
pub fn enumerate_all<V, N>(
    network: &N,
    variables: &[RandomVariable<V>],
    assignment: &Assignment<V>,
) -> Result<f64>
where
    V: DomainValue,
    N: BayesianNetwork<V> + ?Sized,
{
    let Some((first, rest)) = variables.split_first() else {
        return Ok(1.0);
    };

    if assignment.contains(first) {
        let p = network.conditional_probability(first, assignment)?;
        return Ok(p * enumerate_all(network, rest, assignment)?);
    }

    if first.domain().is_empty() {
        return Err(InferenceError::empty_domain(first.name()));
    }

    let mut sum = 0.0;
    for value in first.domain() {
        let branch = assignment.with(first, value.clone());
        let p = network.conditional_probability(first, &branch)?;
        sum += p * enumerate_all(network, rest, &branch)?;
    }
    Ok(sum)
}
