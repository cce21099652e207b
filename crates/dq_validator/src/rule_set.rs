//! Ordered, uniquely named collection of rules.

use crate::{
    CompletenessRule, FlagConsistencyRule, KeyUniquenessRule, RangeRule, Rule, RuleSetError,
};
use dq_core::{RulesConfig, SCHEMA_ENTRY};
use std::sync::Arc;

/// The rules evaluated by one validation run.
///
/// Built once and shared read-only; cloning only bumps reference counts.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rule set: completeness and flag consistency.
    pub fn default_rules() -> Self {
        Self {
            rules: vec![
                Arc::new(CompletenessRule::new()),
                Arc::new(FlagConsistencyRule::new()),
            ],
        }
    }

    /// Builds the rule set described by a configuration.
    pub fn from_config(config: &RulesConfig) -> Result<Self, RuleSetError> {
        let mut rule_set = Self::new();

        if config.completeness.enabled {
            rule_set.push(CompletenessRule::with_expected_row_count(
                config.completeness.expected_row_count,
            ))?;
        }
        if config.flag_consistency.enabled {
            rule_set.push(FlagConsistencyRule::new())?;
        }
        if config.key_uniqueness.enabled {
            rule_set.push(KeyUniquenessRule::new())?;
        }
        for range in &config.ranges {
            rule_set.push(RangeRule::from(range))?;
        }

        Ok(rule_set)
    }

    /// Adds a rule, rejecting duplicate and reserved names.
    pub fn push(&mut self, rule: impl Rule + 'static) -> Result<(), RuleSetError> {
        self.push_shared(Arc::new(rule))
    }

    /// Adds an already shared rule.
    pub fn push_shared(&mut self, rule: Arc<dyn Rule>) -> Result<(), RuleSetError> {
        let name = rule.name();
        if name == SCHEMA_ENTRY {
            return Err(RuleSetError::reserved());
        }
        if self.rules.iter().any(|r| r.name() == name) {
            return Err(RuleSetError::duplicate(name));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Result<Self, RuleSetError> {
        self.push(rule)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.names())
            .finish()
    }
}
