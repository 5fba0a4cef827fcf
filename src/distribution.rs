use crate::error::{InferenceError, Result};
use std::fmt;

/// Number of decimal places used for user-facing probabilities.
pub const DEFAULT_PRECISION: u32 = 3;

/// Rounds `value` half-up to `places` decimal places.
///
/// Rounding works on the exact decimal expansion of the binary value, so a
/// number such as `0.2675`, stored just below the midpoint, rounds down.
///
/// # Example
/// ```rust
/// use bayes_inference::distribution::round_to;
///
/// assert_eq!(round_to(0.818_181_8, 3), 0.818);
/// assert_eq!(round_to(0.181_818_2, 3), 0.182);
/// assert_eq!(round_to(0.2675, 3), 0.267);
/// ```
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places as usize;
    // Every finite f64 has at most 1074 fractional digits.
    let exact = format!("{:.1100}", value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() <= places {
        return value;
    }

    let mut digits: Vec<u8> = whole.bytes().chain(fraction.bytes().take(places)).collect();
    if fraction.as_bytes()[places] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let mut text = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|&d| char::from(d)));
    if places > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|&d| char::from(d)));
    }
    text.parse().unwrap_or(value)
}

/// A mapping from keys to non-negative probability mass.
///
/// Entries keep their insertion order, which for exact inference is the
/// query variable's domain order. Inserting an existing key overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<K> {
    entries: Vec<(K, f64)>,
}

impl<K: PartialEq> Distribution<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the mass for `key`, returning the mass it replaced.
    pub fn insert(&mut self, key: K, mass: f64) -> Option<f64> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(std::mem::replace(existing, mass))
        } else {
            self.entries.push((key, mass));
            None
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, mass)| *mass)
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, mass)| mass).sum()
    }

    /// Divides every entry by the total so that entries sum to one.
    ///
    /// # Errors
    /// Returns `ZeroTotalMass` when the entries sum to zero (or the total is
    /// not finite); the distribution is left unchanged in that case.
    pub fn normalize(&mut self) -> Result<()> {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return Err(InferenceError::ZeroTotalMass);
        }
        for (_, mass) in &mut self.entries {
            *mass /= total;
        }
        Ok(())
    }

    /// Returns a copy with every entry rounded to `places` decimal places.
    #[must_use]
    pub fn rounded(&self, places: u32) -> Self
    where
        K: Clone,
    {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(key, mass)| (key.clone(), round_to(*mass, places)))
                .collect(),
        }
    }

    /// Iterates `(key, mass)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, mass)| (key, *mass))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
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

impl<K: PartialEq> Default for Distribution<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> FromIterator<(K, f64)> for Distribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (key, mass) in iter {
            dist.insert(key, mass);
        }
        dist
    }
}

impl<K: fmt::Display> fmt::Display for Distribution<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, mass)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={mass}")?;
        }
        f.write_str("}")
    }
}
