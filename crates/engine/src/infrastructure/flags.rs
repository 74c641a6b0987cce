//! Flag-backed condition evaluation.
//!
//! The default [`ConditionEvaluator`] the engine ships. Conditions are flag
//! expressions evaluated against the set of game flags currently raised:
//!
//! - `festival` holds when the flag is set
//! - `!raining` holds when the flag is not set
//! - `festival & !raining` holds when every term holds

use std::collections::BTreeSet;

use whereabouts_domain::{Condition, ConditionEvaluator};

/// A set of raised game flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagConditions {
    flags: BTreeSet<String>,
}

impl FlagConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut conditions = Self::new();
        for flag in flags {
            conditions.set(flag);
        }
        conditions
    }

    /// Raise a flag. Blank names are ignored.
    pub fn set(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        let flag = flag.trim();
        if !flag.is_empty() {
            self.flags.insert(flag.to_string());
        }
    }

    pub fn unset(&mut self, flag: &str) {
        self.flags.remove(flag.trim());
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    fn term_holds(&self, term: &str) -> bool {
        match term.trim().strip_prefix('!') {
            Some(negated) => !negated.trim().is_empty() && !self.is_set(negated.trim()),
            None => self.is_set(term.trim()),
        }
    }
}

impl ConditionEvaluator for FlagConditions {
    fn evaluate(&self, condition: &Condition) -> bool {
        condition
            .as_str()
            .split('&')
            .all(|term| !term.trim().is_empty() && self.term_holds(term))
    }
}
