//! Error types for the bayes-inference library.
//!
//! This module defines all error types that can occur while building a network
//! or answering a query against one.

use thiserror::Error;

/// The main error type for the bayes-inference library.
///
/// Every failure aborts the `ask` call that produced it; no partial
/// distribution is ever returned alongside an error.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The query or the evidence names a variable the network does not contain.
    #[error("Unknown variable '{name}': not present in the network")]
    UnknownVariable {
        /// The name that failed to resolve
        name: String,
    },

    /// The evidence assigns the query variable itself, or assigns a value
    /// outside a variable's domain.
    #[error("Inconsistent evidence for '{variable}': {reason}")]
    InconsistentEvidence {
        /// The offending variable
        variable: String,
        /// What made the evidence inconsistent
        reason: String,
    },

    /// The network could not resolve a conditional probability.
    #[error("Undefined probability for '{variable}': {reason}")]
    UndefinedProbability {
        /// The variable whose probability was requested
        variable: String,
        /// Why the lookup failed
        reason: String,
    },

    /// Rejection sampling did not accept a single trial.
    #[error("No accepted samples: all {samples} trials contradicted the evidence")]
    NoAcceptedSamples {
        /// The number of trials that were drawn
        samples: usize,
    },

    /// A variable has no domain values to enumerate over.
    #[error("Empty domain: variable '{variable}' has no values")]
    EmptyDomain {
        /// The variable with an empty domain
        variable: String,
    },

    /// The sample limit was zero.
    #[error("Invalid sample count: {count} (must be greater than zero)")]
    InvalidSampleCount {
        /// The rejected sample limit
        count: usize,
    },

    /// A distribution could not be normalized because its entries sum to zero.
    #[error("Zero total mass: distribution cannot be normalized")]
    ZeroTotalMass,

    /// The network definition is malformed.
    #[error("Invalid network: {reason}")]
    InvalidNetwork {
        /// Description of the structural problem
        reason: String,
    },
}

/// A specialized `Result` type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

impl InferenceError {
    /// Create an error for a name that is not in the network.
    ///
    /// # Example
    /// ```
    /// use bayes_inference::error::InferenceError;
    ///
    /// let error = InferenceError::unknown_variable("Burglary");
    /// assert!(error.to_string().contains("Burglary"));
    /// ```
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create an error for evidence that cannot be used with the query.
    pub fn inconsistent_evidence(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InconsistentEvidence {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a conditional probability lookup that failed.
    ///
    /// # Example
    /// ```
    /// use bayes_inference::error::InferenceError;
    ///
    /// let error = InferenceError::undefined_probability("Alarm", "parent 'Burglary' is unassigned");
    /// assert!(error.to_string().contains("parent 'Burglary'"));
    /// ```
    pub fn undefined_probability(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UndefinedProbability {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a variable with nothing to enumerate.
    pub fn empty_domain(variable: impl Into<String>) -> Self {
        Self::EmptyDomain {
            variable: variable.into(),
        }
    }

    /// Create an error for a malformed network definition.
    pub fn invalid_network(reason: impl Into<String>) -> Self {
        Self::InvalidNetwork {
            reason: reason.into(),
        }
    }
}
