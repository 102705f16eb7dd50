// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping strategies: pluggable discovery of correspondences.
//!
//! A strategy inspects the member tables of a concrete `(S, T)` pair and
//! appends [`Correspondence`](crate::Correspondence)s to the
//! [`TypeMapping`] under construction. Strategies run once, when a
//! [`CompositeMapper`](crate::CompositeMapper) is built; their output must be
//! deterministic for the same pair.
//!
//! # Identification
//!
//! ```text
//! StrategyId::Attribute    -> AttributeStrategy   (any pair)
//! StrategyId::Convention   -> ConventionStrategy  (any pair)
//! StrategyId::Custom(name) -> StrategyFactories[(name, TypePair)]
//! ```
//!
//! Custom strategies are bound to one pair at registration time: the
//! factory registry is keyed by `(name, TypePair)` and looked up when the
//! repository builds a mapper.

mod attribute;
mod convention;
mod manual;

pub use attribute::AttributeStrategy;
pub use convention::ConventionStrategy;
pub use manual::ManualStrategy;

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::TypeMapping;
use crate::error::{Error, Result};
use crate::member::Mapped;
use crate::pair::TypePair;

/// Discovers correspondences for one `(S, T)` pair.
pub trait MappingStrategy<S: Mapped, T: Mapped> {
    /// Short identifier, recorded as origin of every produced correspondence.
    fn name(&self) -> &'static str;

    /// Append this strategy's correspondences to `mapping`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the strategy cannot describe the pair; the build
    /// that invoked it fails and nothing is cached.
    fn generate(&self, mapping: &mut TypeMapping<S, T>) -> Result<()>;
}

/// Identifier of a strategy in [`MappingOptions`](crate::MappingOptions).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrategyId {
    Attribute,
    Convention,
    /// Named strategy resolved through [`StrategyFactories`].
    Custom(Arc<str>),
}

impl StrategyId {
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        StrategyId::Custom(name.into())
    }

    /// Parse a configuration name; unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "attribute" | "attributes" => StrategyId::Attribute,
            "convention" | "conventions" => StrategyId::Convention,
            other => StrategyId::custom(other),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StrategyId::Attribute => "attribute",
            StrategyId::Convention => "convention",
            StrategyId::Custom(name) => name,
        }
    }

    /// Build the strategy for the concrete pair `(S, T)`.
    pub fn instantiate<S: Mapped, T: Mapped>(
        &self,
        factories: &StrategyFactories,
    ) -> Result<Box<dyn MappingStrategy<S, T>>> {
        match self {
            StrategyId::Attribute => Ok(Box::new(AttributeStrategy)),
            StrategyId::Convention => Ok(Box::new(ConventionStrategy)),
            StrategyId::Custom(name) => factories.create::<S, T>(name),
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

type ErasedFactory = Arc<dyn Fn() -> Result<Box<dyn Any>> + Send + Sync>;

/// Registry of custom strategy constructors keyed by `(name, TypePair)`.
#[derive(Clone, Default)]
pub struct StrategyFactories {
    factories: HashMap<(Arc<str>, TypePair), ErasedFactory>,
}

impl StrategyFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` as strategy `name` for the pair `(S, T)`.
    ///
    /// Replaces any factory already registered under the same key.
    pub fn register<S, T, F>(&mut self, name: &str, factory: F)
    where
        S: Mapped,
        T: Mapped,
        F: Fn() -> Result<Box<dyn MappingStrategy<S, T>>> + Send + Sync + 'static,
    {
        let erased: ErasedFactory =
            Arc::new(move || factory().map(|strategy| Box::new(strategy) as Box<dyn Any>));
        self.factories
            .insert((Arc::from(name), TypePair::of::<S, T>()), erased);
    }

    /// Whether a factory exists for `name` on `(S, T)`.
    pub fn contains<S: Mapped, T: Mapped>(&self, name: &str) -> bool {
        self.factories
            .contains_key(&(Arc::from(name), TypePair::of::<S, T>()))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Run the factory registered for `name` on `(S, T)`.
    pub fn create<S: Mapped, T: Mapped>(
        &self,
        name: &str,
    ) -> Result<Box<dyn MappingStrategy<S, T>>> {
        let pair = TypePair::of::<S, T>();
        let factory = self
            .factories
            .get(&(Arc::from(name), pair))
            .ok_or_else(|| Error::StrategyUnavailable {
                strategy: name.to_string(),
                pair,
            })?;

        let erased = factory()?;
        erased
            .downcast::<Box<dyn MappingStrategy<S, T>>>()
            .map(|strategy| *strategy)
            .map_err(|_| Error::StrategyFailed {
                strategy: name.to_string(),
                reason: format!("factory did not produce a strategy for {}", pair),
            })
    }
}

impl std::fmt::Debug for StrategyFactories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.factories.keys().map(|(name, pair)| format!("{} @ {}", name, pair)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapped;

    #[derive(Mapped, Default)]
    struct Invoice {
        number: u32,
    }

    #[derive(Mapped, Default)]
    struct InvoiceView {
        number: u32,
    }

    #[test]
    fn test_strategy_id_names() {
        assert_eq!(StrategyId::from_name("attribute"), StrategyId::Attribute);
        assert_eq!(StrategyId::from_name("convention"), StrategyId::Convention);
        assert_eq!(StrategyId::from_name("audit"), StrategyId::custom("audit"));
        assert_eq!(StrategyId::custom("audit").to_string(), "audit");
    }

    #[test]
    fn test_custom_factory_is_bound_to_pair() {
        let mut factories = StrategyFactories::new();
        factories.register::<Invoice, InvoiceView, _>("manual", || {
            Ok(Box::new(ManualStrategy::new().link("number", "number"))
                as Box<dyn MappingStrategy<Invoice, InvoiceView>>)
        });

        assert!(factories.contains::<Invoice, InvoiceView>("manual"));
        assert!(!factories.contains::<InvoiceView, Invoice>("manual"));

        let strategy = factories.create::<Invoice, InvoiceView>("manual").unwrap();
        assert_eq!(strategy.name(), "manual");

        let err = factories
            .create::<InvoiceView, Invoice>("manual")
            .err()
            .unwrap();
        assert!(matches!(err, Error::StrategyUnavailable { .. }));
    }

    #[test]
    fn test_factory_failure_propagates() {
        let mut factories = StrategyFactories::new();
        factories.register::<Invoice, InvoiceView, _>("broken", || {
            Err(Error::StrategyFailed {
                strategy: "broken".to_string(),
                reason: "not configured".to_string(),
            })
        });

        let id = StrategyId::custom("broken");
        let err = id.instantiate::<Invoice, InvoiceView>(&factories).err().unwrap();
        assert!(matches!(err, Error::StrategyFailed { .. }));
    }

    #[test]
    fn test_builtin_ids_need_no_factory() {
        let factories = StrategyFactories::new();
        assert!(StrategyId::Attribute
            .instantiate::<Invoice, InvoiceView>(&factories)
            .is_ok());
        assert!(StrategyId::Convention
            .instantiate::<Invoice, InvoiceView>(&factories)
            .is_ok());
    }
}
