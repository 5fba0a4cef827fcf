use std::fmt::Debug;
use std::hash::Hash;

/// A trait alias for values that can populate a variable's domain.
/// Values are compared and hashed to look up CPT rows, cloned into assignments,
/// and shared across threads when sampling in parallel.
pub trait DomainValue: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

// Blanket implementation for all types that satisfy the bounds
impl<T> DomainValue for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
