//! Schedule entry conditions
//!
//! A [`Condition`] is an opaque reference into whatever state engine the
//! host simulation runs (relationships, flags, quest progress). The domain
//! never interprets it; a [`ConditionEvaluator`] supplied by the caller does.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An opaque, non-empty predicate reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Condition(String);

impl Condition {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the condition is empty after trimming.
    pub fn new(expression: impl Into<String>) -> Result<Self, DomainError> {
        let expression = expression.into();
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Condition cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Condition {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> String {
        condition.0
    }
}

/// Capability that decides whether a condition currently holds.
///
/// Closures `Fn(&Condition) -> bool` implement this trait, which keeps
/// resolution testable with throwaway evaluators.
#[cfg_attr(test, mockall::automock)]
pub trait ConditionEvaluator {
    fn evaluate(&self, condition: &Condition) -> bool;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&Condition) -> bool,
{
    fn evaluate(&self, condition: &Condition) -> bool {
        self(condition)
    }
}
