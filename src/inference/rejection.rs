#![allow(clippy::cast_precision_loss)]

use super::{Inferencer, validate_evidence, validate_query};
use crate::assignment::Assignment;
use crate::distribution::{DEFAULT_PRECISION, Distribution};
use crate::error::{InferenceError, Result};
use crate::network::BayesianNetwork;
use crate::variable::RandomVariable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Configuration for rejection sampling.
///
/// # Example
/// ```rust
/// use bayes_inference::SamplingConfig;
///
/// let config = SamplingConfig::default().with_sample_limit(50_000).with_seed(7);
/// assert_eq!(config.sample_limit, 50_000);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Number of trials to draw
    pub sample_limit: usize,
    /// Seed for a reproducible run; drawn from the OS when `None`
    pub seed: Option<u64>,
    /// Decimal places of the returned distribution; `None` disables rounding
    pub precision: Option<u32>,
    /// Trials per parallel batch
    pub batch_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_limit: 10_000,
            seed: None,
            precision: Some(DEFAULT_PRECISION),
            batch_size: 1_000,
        }
    }
}

impl SamplingConfig {
    /// Sets the number of trials to draw.
    #[must_use]
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    /// Fixes the generator seed for a reproducible run.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the rounding precision, or disables rounding with `None`.
    #[must_use]
    pub fn with_precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the number of trials per parallel batch.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Tallies from a sampling run: how many trials were drawn and accepted, and
/// how often each variable was true in an accepted trial.
///
/// Counts from independent runs combine with [`SampleCounts::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCounts {
    trials: usize,
    accepted: usize,
    true_counts: HashMap<Arc<str>, usize>,
}

impl SampleCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted trial.
    pub fn accept(&mut self, sample: &Assignment<bool>) {
        self.trials += 1;
        self.accepted += 1;
        for (variable, &value) in sample.iter() {
            if value {
                *self.true_counts.entry(variable.shared_name()).or_insert(0) += 1;
            }
        }
    }

    /// Records a rejected trial.
    pub fn reject(&mut self) {
        self.trials += 1;
    }

    /// Combines two tallies; the operation is commutative and associative.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.accepted += other.accepted;
        for (name, count) in other.true_counts {
            *self.true_counts.entry(name).or_insert(0) += count;
        }
        self
    }

    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of accepted trials in which `name` was true.
    #[must_use]
    pub fn true_count(&self, name: &str) -> usize {
        self.true_counts.get(name).copied().unwrap_or(0)
    }

    /// Fraction of accepted trials in which `name` was true.
    ///
    /// # Errors
    /// Returns `NoAcceptedSamples` when no trial was accepted.
    pub fn estimate(&self, name: &str) -> Result<f64> {
        if self.accepted == 0 {
            return Err(InferenceError::NoAcceptedSamples {
                samples: self.trials,
            });
        }
        Ok(self.true_count(name) as f64 / self.accepted as f64)
    }
}

/// Draws one trial in topological order, starting from a copy of `evidence`.
///
/// Each variable is first set to `true` so the network reports `P(true)` given
/// its already-sampled parents, then overwritten with a Bernoulli draw. The
/// trial is abandoned as soon as a draw contradicts the evidence.
///
/// Returns `Ok(None)` for a rejected trial.
///
/// # Errors
/// Propagates lookup failures from the network.
pub fn rejection_sample<N, R>(
    network: &N,
    evidence: &Assignment<bool>,
    rng: &mut R,
) -> Result<Option<Assignment<bool>>>
where
    N: BayesianNetwork<bool> + ?Sized,
    R: Rng,
{
    let mut sample = evidence.clone();
    for variable in network.topological_order() {
        sample.set(variable, true);
        let p_true = network.conditional_probability(variable, &sample)?;
        let outcome = rng.random::<f64>() < p_true;
        sample.set(variable, outcome);

        if evidence.get(variable).is_some_and(|&observed| observed != outcome) {
            trace!(variable = variable.name(), outcome, "trial rejected");
            return Ok(None);
        }
    }
    Ok(Some(sample))
}

fn run_trials<N, R>(
    network: &N,
    evidence: &Assignment<bool>,
    trials: usize,
    rng: &mut R,
) -> Result<SampleCounts>
where
    N: BayesianNetwork<bool> + ?Sized,
    R: Rng,
{
    let mut counts = SampleCounts::new();
    for _ in 0..trials {
        match rejection_sample(network, evidence, rng)? {
            Some(sample) => counts.accept(&sample),
            None => counts.reject(),
        }
    }
    Ok(counts)
}

/// Approximate inference by rejection sampling over boolean networks.
///
/// The posterior `P(query = true | evidence)` is estimated as the fraction of
/// accepted trials in which the query was true.
///
/// # Example
/// ```rust
/// use bayes_inference::{
///     ApproximateInference, Assignment, BayesianNetwork, DiscreteNetwork, Inferencer,
///     SamplingConfig,
/// };
///
/// let network = DiscreteNetwork::builder()
///     .boolean_node("A", &[], vec![(vec![], 0.5)])
///     .boolean_node("B", &["A"], vec![(vec![true], 0.9), (vec![false], 0.2)])
///     .build()
///     .unwrap();
/// let a = network.variable("A").unwrap().clone();
/// let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();
///
/// let engine = ApproximateInference::with_config(
///     SamplingConfig::default().with_sample_limit(20_000).with_seed(42),
/// );
/// let posterior = engine.ask(&network, &a, &evidence).unwrap();
/// assert!((posterior.get("A true").unwrap() - 0.818).abs() < 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximateInference {
    config: SamplingConfig,
}

impl ApproximateInference {
    /// Creates an engine drawing `sample_limit` trials with default settings.
    #[must_use]
    pub fn new(sample_limit: usize) -> Self {
        Self::with_config(SamplingConfig::default().with_sample_limit(sample_limit))
    }

    #[must_use]
    pub fn with_config(config: SamplingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Runs every trial and returns the raw tallies.
    ///
    /// # Errors
    /// - `InvalidSampleCount` for a zero sample limit
    /// - `UnknownVariable` if an evidence variable is not in the network
    /// - `InconsistentEvidence` for an evidence value outside its domain
    /// - lookup failures from the network
    pub fn sample_counts<N>(&self, network: &N, evidence: &Assignment<bool>) -> Result<SampleCounts>
    where
        N: BayesianNetwork<bool> + ?Sized,
    {
        self.check_sample_limit()?;
        validate_evidence(network, evidence)?;
        let mut rng = self.rng();
        run_trials(network, evidence, self.config.sample_limit, &mut rng)
    }

    /// Parallel variant of [`Inferencer::ask`]: trials are split into batches
    /// of `batch_size`, each with its own generator, and the tallies are summed.
    ///
    /// With a fixed seed the result is reproducible regardless of thread count.
    ///
    /// # Errors
    /// Same as [`Inferencer::ask`].
    #[cfg(feature = "parallel")]
    pub fn ask_par<N>(
        &self,
        network: &N,
        query: &RandomVariable<bool>,
        evidence: &Assignment<bool>,
    ) -> Result<Distribution<String>>
    where
        N: BayesianNetwork<bool> + Sync + ?Sized,
    {
        use rayon::prelude::*;

        self.check_sample_limit()?;
        let query = validate_query(network, query, evidence)?;

        let limit = self.config.sample_limit;
        let batch_size = self.config.batch_size.max(1);
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let counts = (0..limit.div_ceil(batch_size))
            .into_par_iter()
            .map(|batch| {
                let trials = batch_size.min(limit - batch * batch_size);
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(batch as u64));
                run_trials(network, evidence, trials, &mut rng)
            })
            .try_reduce(SampleCounts::new, |a, b| Ok(a.merge(b)))?;

        self.posterior(query, &counts)
    }

    fn check_sample_limit(&self) -> Result<()> {
        if self.config.sample_limit == 0 {
            return Err(InferenceError::InvalidSampleCount { count: 0 });
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn posterior(
        &self,
        query: &RandomVariable<bool>,
        counts: &SampleCounts,
    ) -> Result<Distribution<String>> {
        let p_true = counts.estimate(query.name())?;
        debug!(
            query = query.name(),
            trials = counts.trials(),
            accepted = counts.accepted(),
            p_true,
            "rejection sampling finished"
        );

        let mut dist = Distribution::new();
        dist.insert(format!("{} true", query.name()), p_true);
        dist.insert(format!("{} false", query.name()), 1.0 - p_true);
        dist.normalize()?;

        Ok(match self.config.precision {
            Some(places) => dist.rounded(places),
            None => dist,
        })
    }
}

impl Default for ApproximateInference {
    fn default() -> Self {
        Self::with_config(SamplingConfig::default())
    }
}

impl Inferencer<bool> for ApproximateInference {
    type Key = String;

    fn ask<N>(
        &self,
        network: &N,
        query: &RandomVariable<bool>,
        evidence: &Assignment<bool>,
    ) -> Result<Distribution<String>>
    where
        N: BayesianNetwork<bool> + ?Sized,
    {
        self.check_sample_limit()?;
        let query = validate_query(network, query, evidence)?;
        debug!(
            query = query.name(),
            evidence = evidence.len(),
            samples = self.config.sample_limit,
            "starting rejection sampling"
        );

        let counts = self.sample_counts(network, evidence)?;
        self.posterior(query, &counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::DiscreteNetwork;

    fn chain() -> DiscreteNetwork<bool> {
        DiscreteNetwork::builder()
            .boolean_node("A", &[], vec![(vec![], 0.5)])
            .boolean_node("B", &["A"], vec![(vec![true], 0.9), (vec![false], 0.2)])
            .build()
            .unwrap()
    }

    fn seeded(samples: usize) -> ApproximateInference {
        ApproximateInference::with_config(
            SamplingConfig::default()
                .with_sample_limit(samples)
                .with_seed(1234),
        )
    }

    #[test]
    fn test_output_keys_and_normalization() {
        let network = chain();
        let a = network.variable("A").unwrap().clone();
        let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();

        let dist = seeded(5_000).ask(&network, &a, &evidence).unwrap();

        let keys: Vec<&str> = dist.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A true", "A false"]);
        assert!((dist.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_converges_to_bayes_rule() {
        let network = chain();
        let a = network.variable("A").unwrap().clone();
        let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();

        let dist = seeded(20_000).ask(&network, &a, &evidence).unwrap();
        let expected = 0.45 / 0.55;
        assert!(
            (dist.get("A true").unwrap() - expected).abs() < 0.05,
            "estimate {:?} too far from {expected}",
            dist.get("A true")
        );
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let network = chain();
        let b = network.variable("B").unwrap().clone();

        let first = seeded(2_000).ask(&network, &b, &Assignment::new()).unwrap();
        let second = seeded(2_000).ask(&network, &b, &Assignment::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_accepted_samples_agree_with_evidence() {
        let network = chain();
        let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let mut accepted = 0;
        for _ in 0..1_000 {
            if let Some(sample) = rejection_sample(&network, &evidence, &mut rng).unwrap() {
                accepted += 1;
                assert_eq!(sample.value_of("B"), Some(&true));
                assert_eq!(sample.len(), 2);
            }
        }
        assert!(accepted > 0);
    }

    #[test]
    fn test_counts_track_accepted_trials() {
        let network = chain();
        let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();

        let counts = seeded(3_000).sample_counts(&network, &evidence).unwrap();

        assert_eq!(counts.trials(), 3_000);
        assert!(counts.accepted() < counts.trials());
        assert_eq!(counts.true_count("B"), counts.accepted());
        assert!(counts.true_count("A") <= counts.accepted());
    }

    #[test]
    fn test_counts_reject_unknown_evidence() {
        let network = chain();
        let evidence: Assignment<bool> =
            [(RandomVariable::boolean("Ghost"), true)].into_iter().collect();

        let err = seeded(100).sample_counts(&network, &evidence).unwrap_err();
        assert_eq!(err, InferenceError::unknown_variable("Ghost"));
    }

    #[test]
    fn test_impossible_evidence_has_no_accepted_samples() {
        let network = DiscreteNetwork::builder()
            .boolean_node("A", &[], vec![(vec![], 0.5)])
            .boolean_node("B", &["A"], vec![(vec![true], 0.0), (vec![false], 0.0)])
            .build()
            .unwrap();
        let a = network.variable("A").unwrap().clone();
        let evidence = Assignment::from_names(&network, [("B", true)]).unwrap();

        let err = seeded(500).ask(&network, &a, &evidence).unwrap_err();
        assert_eq!(err, InferenceError::NoAcceptedSamples { samples: 500 });
    }

    #[test]
    fn test_zero_sample_limit_is_rejected() {
        let network = chain();
        let a = network.variable("A").unwrap().clone();

        let err = ApproximateInference::new(0)
            .ask(&network, &a, &Assignment::new())
            .unwrap_err();
        assert_eq!(err, InferenceError::InvalidSampleCount { count: 0 });
    }

    #[test]
    fn test_merge_sums_counts() {
        let a = RandomVariable::boolean("A");
        let b = RandomVariable::boolean("B");
        let both: Assignment<bool> = [(a.clone(), true), (b.clone(), true)].into_iter().collect();
        let only_a: Assignment<bool> = [(a, true), (b, false)].into_iter().collect();

        let mut left = SampleCounts::new();
        left.accept(&both);
        left.reject();
        let mut right = SampleCounts::new();
        right.accept(&only_a);

        let merged = left.clone().merge(right.clone());
        assert_eq!(merged, right.merge(left));
        assert_eq!(merged.trials(), 3);
        assert_eq!(merged.accepted(), 2);
        assert_eq!(merged.true_count("A"), 2);
        assert_eq!(merged.true_count("B"), 1);
        assert!((merged.estimate("B").unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_without_accepted_trials_fails() {
        let mut counts = SampleCounts::new();
        counts.reject();
        assert_eq!(
            counts.estimate("A"),
            Err(InferenceError::NoAcceptedSamples { samples: 1 })
        );
    }
}
