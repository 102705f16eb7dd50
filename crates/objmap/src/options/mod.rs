// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping options: which strategies run, in which order.
//!
//! Options belong to a [`MappingRepository`](crate::MappingRepository) and
//! apply to every mapper it builds afterwards. Mappers already cached keep
//! the correspondences they were built with.
//!
//! # Example
//!
//! ```rust
//! use objmap::{ConflictPolicy, MappingOptions, MappingRepository, StrategyId};
//!
//! let options = MappingOptions::new()
//!     .with_strategies([StrategyId::Attribute])
//!     .with_conflict_policy(ConflictPolicy::Reject);
//!
//! let repo = MappingRepository::with_options(options);
//! assert_eq!(repo.options().strategies(), &[StrategyId::Attribute]);
//! ```

#[cfg(feature = "options-loaders")]
pub mod yaml;

use crate::error::Result;
use crate::member::Mapped;
use crate::strategy::{MappingStrategy, StrategyFactories, StrategyId};

/// What a build does when two correspondences write the same target member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep both; the entry evaluated last provides the value.
    #[default]
    LastWriteWins,
    /// Fail the build with [`Error::ConflictingCorrespondence`](crate::Error::ConflictingCorrespondence).
    Reject,
}

/// Strategy order used when the repository builds a new mapper.
///
/// Default order: `[Convention, Attribute]`, last write wins, so an
/// annotation overrides a same-name match on the member it targets.
#[derive(Debug, Clone)]
pub struct MappingOptions {
    strategies: Vec<StrategyId>,
    factories: StrategyFactories,
    conflict_policy: ConflictPolicy,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            strategies: vec![StrategyId::Convention, StrategyId::Attribute],
            factories: StrategyFactories::new(),
            conflict_policy: ConflictPolicy::LastWriteWins,
        }
    }
}

impl MappingOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the strategy order.
    #[must_use]
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = StrategyId>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Append a strategy at the end of the order.
    pub fn push_strategy(&mut self, id: StrategyId) {
        self.strategies.push(id);
    }

    pub fn set_strategies(&mut self, strategies: impl IntoIterator<Item = StrategyId>) {
        self.strategies = strategies.into_iter().collect();
    }

    pub fn set_conflict_policy(&mut self, policy: ConflictPolicy) {
        self.conflict_policy = policy;
    }

    pub fn strategies(&self) -> &[StrategyId] {
        &self.strategies
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    pub fn factories(&self) -> &StrategyFactories {
        &self.factories
    }

    /// Register a custom strategy for `(S, T)` under `name`.
    ///
    /// The strategy only runs when `StrategyId::Custom(name)` is part of the
    /// order.
    ///
    /// The factory runs on the building thread while the repository build
    /// lock is held; it may resolve other pairs through the same repository
    /// but not `(S, T)` itself.
    pub fn register_strategy<S, T, F>(&mut self, name: &str, factory: F)
    where
        S: Mapped,
        T: Mapped,
        F: Fn() -> Result<Box<dyn MappingStrategy<S, T>>> + Send + Sync + 'static,
    {
        self.factories.register::<S, T, F>(name, factory);
    }

    /// Instantiate the configured strategies for `(S, T)`, in order.
    pub fn instantiate<S: Mapped, T: Mapped>(&self) -> Result<Vec<Box<dyn MappingStrategy<S, T>>>> {
        self.strategies
            .iter()
            .map(|id| id.instantiate::<S, T>(&self.factories))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ManualStrategy, Mapped};

    #[derive(Mapped, Default)]
    struct Draft {
        title: String,
    }

    #[derive(Mapped, Default)]
    struct Published {
        headline: String,
    }

    #[test]
    fn test_default_order() {
        let options = MappingOptions::default();
        assert_eq!(
            options.strategies(),
            &[StrategyId::Convention, StrategyId::Attribute]
        );
        assert_eq!(options.conflict_policy(), ConflictPolicy::LastWriteWins);
    }

    #[test]
    fn test_instantiate_keeps_order() {
        let mut options = MappingOptions::new().with_strategies([
            StrategyId::Attribute,
            StrategyId::custom("headline"),
            StrategyId::Convention,
        ]);
        options.register_strategy::<Draft, Published, _>("headline", || {
            Ok(Box::new(ManualStrategy::new().link("title", "headline"))
                as Box<dyn MappingStrategy<Draft, Published>>)
        });

        let names: Vec<_> = options
            .instantiate::<Draft, Published>()
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["attribute", "manual", "convention"]);
    }

    #[test]
    fn test_missing_factory_fails_instantiation() {
        let options = MappingOptions::new().with_strategies([StrategyId::custom("headline")]);
        let err = options.instantiate::<Draft, Published>().err().unwrap();
        assert!(matches!(err, Error::StrategyUnavailable { .. }));
    }
}
