use crate::traits::DomainValue;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named discrete random variable with a finite, ordered domain.
///
/// Identity is the name alone: two variables with the same name are equal
/// even if they were constructed separately. Cloning is cheap because the
/// name and domain are shared behind `Arc`.
#[derive(Clone)]
pub struct RandomVariable<V> {
    name: Arc<str>,
    domain: Arc<[V]>,
}

impl<V: DomainValue> RandomVariable<V> {
    /// Creates a variable with the given name and domain.
    ///
    /// # Example
    /// ```rust
    /// use bayes_inference::RandomVariable;
    ///
    /// let weather = RandomVariable::new("Weather", vec!["sunny", "rainy", "cloudy"]);
    /// assert_eq!(weather.domain().len(), 3);
    /// ```
    pub fn new(name: impl Into<Arc<str>>, domain: impl Into<Arc<[V]>>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// The variable's name, which is its identity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered domain of possible values.
    #[must_use]
    pub fn domain(&self) -> &[V] {
        &self.domain
    }

    /// Position of `value` in the domain, if present.
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        self.index_of(value).is_some()
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }
}

impl RandomVariable<bool> {
    /// Creates a variable over the domain `[true, false]`.
    pub fn boolean(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, vec![true, false])
    }
}

impl<V> PartialEq for RandomVariable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<V> Eq for RandomVariable<V> {}

impl<V> Hash for RandomVariable<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<V: fmt::Debug> fmt::Debug for RandomVariable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomVariable")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .finish()
    }
}

impl<V> fmt::Display for RandomVariable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_name() {
        let a = RandomVariable::new("A", vec![true, false]);
        let b = RandomVariable::new("A", vec![false]);
        let c = RandomVariable::boolean("C");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_index_of_follows_domain_order() {
        let v = RandomVariable::new("Level", vec![1, 2, 3]);
        assert_eq!(v.index_of(&2), Some(1));
        assert_eq!(v.index_of(&7), None);
        assert!(v.contains(&3));
    }

    #[test]
    fn test_boolean_domain() {
        let v = RandomVariable::boolean("Rain");
        assert_eq!(v.domain(), &[true, false]);
        assert_eq!(v.to_string(), "Rain");
    }
}
