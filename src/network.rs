//! The network contract consumed by the inference engines, plus an in-memory
//! implementation backed by conditional probability tables.

use crate::assignment::Assignment;
use crate::error::{InferenceError, Result};
use crate::traits::DomainValue;
use crate::variable::RandomVariable;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Tolerance for a CPT row summing to one.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Read-only view of a discrete Bayesian network.
///
/// Engines only ever read from a network, so one instance can serve any number
/// of queries (including concurrent ones when the implementor is `Sync`).
pub trait BayesianNetwork<V: DomainValue> {
    /// All variables, ordered so that every parent precedes its children.
    fn topological_order(&self) -> &[RandomVariable<V>];

    /// Probability that `variable` takes its value in `assignment`, given the
    /// values `assignment` holds for the variable's parents.
    ///
    /// # Errors
    /// Returns `UndefinedProbability` when the variable or one of its parents
    /// is unassigned, or when no table entry matches.
    fn conditional_probability(
        &self,
        variable: &RandomVariable<V>,
        assignment: &Assignment<V>,
    ) -> Result<f64>;

    /// Looks up a variable by name.
    fn variable(&self, name: &str) -> Option<&RandomVariable<V>> {
        self.topological_order().iter().find(|v| v.name() == name)
    }
}

/// A node of a [`DiscreteNetwork`]: the variable, its parents, and its table.
#[derive(Debug, Clone)]
struct Node<V> {
    variable: RandomVariable<V>,
    parents: Vec<RandomVariable<V>>,
    /// Parent values (in `parents` order) to one probability per domain value.
    table: HashMap<Vec<V>, Vec<f64>>,
}

/// An immutable in-memory Bayesian network over discrete variables.
///
/// Build one with [`DiscreteNetwork::builder`].
///
/// # Example
/// ```rust
/// use bayes_inference::{BayesianNetwork, DiscreteNetwork};
///
/// let network = DiscreteNetwork::builder()
///     .boolean_node("B", &["A"], vec![(vec![true], 0.9), (vec![false], 0.2)])
///     .boolean_node("A", &[], vec![(vec![], 0.5)])
///     .build()
///     .unwrap();
///
/// let order: Vec<&str> = network.topological_order().iter().map(|v| v.name()).collect();
/// assert_eq!(order, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteNetwork<V> {
    order: Vec<RandomVariable<V>>,
    nodes: HashMap<Arc<str>, Node<V>>,
}

impl<V: DomainValue> DiscreteNetwork<V> {
    #[must_use]
    pub fn builder() -> NetworkBuilder<V> {
        NetworkBuilder::new()
    }

    /// Parents of the named variable, in table-key order.
    pub fn parents(&self, name: &str) -> Option<&[RandomVariable<V>]> {
        self.nodes.get(name).map(|node| node.parents.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<V: DomainValue> BayesianNetwork<V> for DiscreteNetwork<V> {
    fn topological_order(&self) -> &[RandomVariable<V>] {
        &self.order
    }

    fn variable(&self, name: &str) -> Option<&RandomVariable<V>> {
        self.nodes.get(name).map(|node| &node.variable)
    }

    fn conditional_probability(
        &self,
        variable: &RandomVariable<V>,
        assignment: &Assignment<V>,
    ) -> Result<f64> {
        let name = variable.name();
        let node = self
            .nodes
            .get(name)
            .ok_or_else(|| InferenceError::unknown_variable(name))?;

        let value = assignment
            .get(variable)
            .ok_or_else(|| InferenceError::undefined_probability(name, "variable is unassigned"))?;

        let parent_values = node
            .parents
            .iter()
            .map(|parent| {
                assignment.get(parent).cloned().ok_or_else(|| {
                    InferenceError::undefined_probability(
                        name,
                        format!("parent '{}' is unassigned", parent.name()),
                    )
                })
            })
            .collect::<Result<Vec<V>>>()?;

        let row = node.table.get(&parent_values).ok_or_else(|| {
            InferenceError::undefined_probability(
                name,
                format!("no table row for parent values {parent_values:?}"),
            )
        })?;

        let index = node.variable.index_of(value).ok_or_else(|| {
            InferenceError::undefined_probability(
                name,
                format!("value {value:?} is not in the domain"),
            )
        })?;

        Ok(row[index])
    }
}

struct PendingNode<V> {
    variable: RandomVariable<V>,
    parents: Vec<String>,
    rows: Vec<(Vec<V>, Vec<f64>)>,
}

/// Collects nodes in any order and validates them into a [`DiscreteNetwork`].
///
/// Structural errors are reported by [`NetworkBuilder::build`], so nodes can be
/// chained without intermediate `?`.
pub struct NetworkBuilder<V> {
    pending: Vec<PendingNode<V>>,
}

impl<V: DomainValue> NetworkBuilder<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Adds a node. Each row pairs one combination of parent values (in
    /// `parents` order) with one probability per domain value of `variable`.
    #[must_use]
    pub fn node(
        mut self,
        variable: RandomVariable<V>,
        parents: &[&str],
        rows: Vec<(Vec<V>, Vec<f64>)>,
    ) -> Self {
        self.pending.push(PendingNode {
            variable,
            parents: parents.iter().map(ToString::to_string).collect(),
            rows,
        });
        self
    }

    /// Adds a node over `[true, false]`, giving `P(true)` for each parent row.
    #[must_use]
    pub fn boolean_node(self, name: &str, parents: &[&str], rows: Vec<(Vec<V>, f64)>) -> Self
    where
        V: From<bool>,
    {
        let variable = RandomVariable::new(name, vec![V::from(true), V::from(false)]);
        let rows = rows
            .into_iter()
            .map(|(parent_values, p)| (parent_values, vec![p, 1.0 - p]))
            .collect();
        self.node(variable, parents, rows)
    }

    /// Validates the collected nodes and sorts them topologically.
    ///
    /// Ties are broken by insertion order, so a builder fed parents first
    /// yields exactly that order.
    ///
    /// # Errors
    /// Returns `InvalidNetwork` for duplicate variables or domain values,
    /// unknown parents, malformed or duplicate rows, probabilities outside
    /// `[0, 1]`, rows that do not sum to one, and cycles.
    pub fn build(self) -> Result<DiscreteNetwork<V>> {
        let mut variables: HashMap<&str, &RandomVariable<V>> = HashMap::new();
        for pending in &self.pending {
            let variable = &pending.variable;
            if variables.insert(variable.name(), variable).is_some() {
                return Err(InferenceError::invalid_network(format!(
                    "variable '{variable}' is defined twice"
                )));
            }
            let distinct: HashSet<&V> = variable.domain().iter().collect();
            if distinct.len() != variable.domain().len() {
                return Err(InferenceError::invalid_network(format!(
                    "variable '{variable}' has duplicate domain values"
                )));
            }
        }

        let mut nodes = HashMap::with_capacity(self.pending.len());
        for pending in &self.pending {
            let node = Self::resolve(pending, &variables)?;
            nodes.insert(node.variable.shared_name(), node);
        }

        let order = Self::topological_sort(&self.pending, &nodes)?;
        Ok(DiscreteNetwork { order, nodes })
    }

    fn resolve(
        pending: &PendingNode<V>,
        variables: &HashMap<&str, &RandomVariable<V>>,
    ) -> Result<Node<V>> {
        let variable = &pending.variable;
        let parents = pending
            .parents
            .iter()
            .map(|name| {
                variables.get(name.as_str()).map(|v| (*v).clone()).ok_or_else(|| {
                    InferenceError::invalid_network(format!(
                        "variable '{variable}' has unknown parent '{name}'"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut table = HashMap::with_capacity(pending.rows.len());
        for (parent_values, probabilities) in &pending.rows {
            if parent_values.len() != parents.len() {
                return Err(InferenceError::invalid_network(format!(
                    "row for '{variable}' has {} parent values, expected {}",
                    parent_values.len(),
                    parents.len()
                )));
            }
            if let Some((parent, value)) = parents
                .iter()
                .zip(parent_values)
                .find(|(parent, value)| !parent.contains(value))
            {
                return Err(InferenceError::invalid_network(format!(
                    "row for '{variable}' uses {value:?}, outside the domain of '{parent}'"
                )));
            }
            if probabilities.len() != variable.domain().len() {
                return Err(InferenceError::invalid_network(format!(
                    "row for '{variable}' has {} probabilities, expected {}",
                    probabilities.len(),
                    variable.domain().len()
                )));
            }
            if probabilities
                .iter()
                .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
            {
                return Err(InferenceError::invalid_network(format!(
                    "row for '{variable}' has a probability outside [0, 1]"
                )));
            }
            let sum: f64 = probabilities.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(InferenceError::invalid_network(format!(
                    "row {parent_values:?} for '{variable}' sums to {sum}, expected 1"
                )));
            }
            if table
                .insert(parent_values.clone(), probabilities.clone())
                .is_some()
            {
                return Err(InferenceError::invalid_network(format!(
                    "row {parent_values:?} for '{variable}' is defined twice"
                )));
            }
        }

        Ok(Node {
            variable: variable.clone(),
            parents,
            table,
        })
    }

    fn topological_sort(
        pending: &[PendingNode<V>],
        nodes: &HashMap<Arc<str>, Node<V>>,
    ) -> Result<Vec<RandomVariable<V>>> {
        let mut placed: HashSet<&str> = HashSet::with_capacity(pending.len());
        let mut order = Vec::with_capacity(pending.len());

        while order.len() < pending.len() {
            let next = pending.iter().map(|p| &p.variable).find(|variable| {
                !placed.contains(variable.name())
                    && nodes[variable.name()]
                        .parents
                        .iter()
                        .all(|parent| placed.contains(parent.name()))
            });

            match next {
                Some(variable) => {
                    placed.insert(variable.name());
                    order.push(variable.clone());
                }
                None => {
                    let mut stuck: Vec<&str> = pending
                        .iter()
                        .map(|p| p.variable.name())
                        .filter(|name| !placed.contains(name))
                        .collect();
                    stuck.sort_unstable();
                    return Err(InferenceError::invalid_network(format!(
                        "cycle detected among {stuck:?}"
                    )));
                }
            }
        }

        Ok(order)
    }
}

impl<V: DomainValue> Default for NetworkBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
