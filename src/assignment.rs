use crate::error::{InferenceError, Result};
use crate::network::BayesianNetwork;
use crate::traits::DomainValue;
use crate::variable::RandomVariable;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A partial mapping from random variables to one concrete value each.
///
/// Entries are keyed by variable name, so setting a variable that is already
/// present overwrites its value instead of adding a second entry. Cloning an
/// assignment copies the mapping but shares the variables themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<V> {
    entries: BTreeMap<Arc<str>, (RandomVariable<V>, V)>,
}

impl<V: DomainValue> Assignment<V> {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Resolves `(name, value)` pairs against a network's variables.
    ///
    /// # Errors
    /// Returns `UnknownVariable` for a name the network does not contain, and
    /// `InconsistentEvidence` for a value outside that variable's domain.
    ///
    /// # Example
    /// ```rust
    /// use bayes_inference::{Assignment, DiscreteNetwork};
    ///
    /// let network = DiscreteNetwork::<bool>::builder()
    ///     .boolean_node("Rain", &[], vec![(vec![], 0.2)])
    ///     .build()
    ///     .unwrap();
    /// let evidence = Assignment::from_names(&network, [("Rain", true)]).unwrap();
    /// assert_eq!(evidence.value_of("Rain"), Some(&true));
    /// ```
    pub fn from_names<'a, N, I>(network: &N, pairs: I) -> Result<Self>
    where
        N: BayesianNetwork<V> + ?Sized,
        I: IntoIterator<Item = (&'a str, V)>,
    {
        let mut assignment = Self::new();
        for (name, value) in pairs {
            let variable = network
                .variable(name)
                .ok_or_else(|| InferenceError::unknown_variable(name))?;
            if !variable.contains(&value) {
                return Err(InferenceError::inconsistent_evidence(
                    name,
                    format!("value {value:?} is not in the domain {:?}", variable.domain()),
                ));
            }
            assignment.set(variable, value);
        }
        Ok(assignment)
    }

    /// Sets `variable` to `value`, returning the value it replaced.
    pub fn set(&mut self, variable: &RandomVariable<V>, value: V) -> Option<V> {
        self.entries
            .insert(variable.shared_name(), (variable.clone(), value))
            .map(|(_, previous)| previous)
    }

    /// Returns a copy of this assignment with `variable` set to `value`.
    #[must_use]
    pub fn with(&self, variable: &RandomVariable<V>, value: V) -> Self {
        let mut extended = self.clone();
        extended.set(variable, value);
        extended
    }

    /// Value assigned to `variable`, matched by name.
    pub fn get(&self, variable: &RandomVariable<V>) -> Option<&V> {
        self.value_of(variable.name())
    }

    /// Value assigned to the variable called `name`.
    pub fn value_of(&self, name: &str) -> Option<&V> {
        self.entries.get(name).map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, variable: &RandomVariable<V>) -> bool {
        self.contains_name(variable.name())
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&RandomVariable<V>, &V)> {
        self.entries.values().map(|(variable, value)| (variable, value))
    }

    pub fn variables(&self) -> impl Iterator<Item = &RandomVariable<V>> {
        self.entries.values().map(|(variable, _)| variable)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: DomainValue> Default for Assignment<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: DomainValue> FromIterator<(RandomVariable<V>, V)> for Assignment<V> {
    fn from_iter<I: IntoIterator<Item = (RandomVariable<V>, V)>>(iter: I) -> Self {
        let mut assignment = Self::new();
        for (variable, value) in iter {
            assignment.set(&variable, value);
        }
        assignment
    }
}

impl<V: DomainValue> Extend<(RandomVariable<V>, V)> for Assignment<V> {
    fn extend<I: IntoIterator<Item = (RandomVariable<V>, V)>>(&mut self, iter: I) {
        for (variable, value) in iter {
            self.set(&variable, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_existing_entry() {
        let rain = RandomVariable::boolean("Rain");
        let mut assignment = Assignment::new();

        assert_eq!(assignment.set(&rain, true), None);
        assert_eq!(assignment.set(&rain, false), Some(true));
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.get(&rain), Some(&false));
    }

    #[test]
    fn test_overwrite_matches_by_name_only() {
        let first = RandomVariable::boolean("Rain");
        let second = RandomVariable::new("Rain", vec![true]);
        let mut assignment = Assignment::new();

        assignment.set(&first, true);
        assignment.set(&second, false);

        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.value_of("Rain"), Some(&false));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let a = RandomVariable::boolean("A");
        let b = RandomVariable::boolean("B");
        let evidence: Assignment<bool> = [(a.clone(), true)].into_iter().collect();

        let extended = evidence.with(&b, false);

        assert_eq!(evidence.len(), 1);
        assert!(!evidence.contains(&b));
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.get(&b), Some(&false));
        assert_eq!(extended.get(&a), Some(&true));
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut assignment = Assignment::new();
        assignment.set(&RandomVariable::boolean("Z"), true);
        assignment.set(&RandomVariable::boolean("A"), false);

        let names: Vec<&str> = assignment.variables().map(RandomVariable::name).collect();
        assert_eq!(names, vec!["A", "Z"]);
    }
}
