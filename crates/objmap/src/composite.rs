// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapper capability and the composite mapper built from strategies.
//!
//! # Lifecycle
//!
//! ```text
//! CompositeMapper::new([convention, attribute, ...])
//!   +-- strategy 1 .generate(&mut mapping)   (build phase, once)
//!   +-- strategy 2 .generate(&mut mapping)
//!   +-- conflict check (ConflictPolicy)
//!   v
//! TypeMapping (immutable)  <---  map / map_onto (execution phase, many times)
//! ```
//!
//! The execution phase only calls the accessor function pointers stored in
//! the correspondences and touches nothing but the caller's values, so one
//! mapper serves any number of threads.

use crate::descriptor::TypeMapping;
use crate::error::{Error, Result};
use crate::member::Mapped;
use crate::options::ConflictPolicy;
use crate::strategy::MappingStrategy;

/// Copies values from an `S` into a `T`.
pub trait Mapper<S: Mapped, T: Mapped>: Send + Sync {
    /// Update `target` in place; target members without a correspondence
    /// keep their value.
    fn map_onto(&self, source: &S, target: &mut T) -> Result<()>;

    /// Allocate a target through [`Mapped::construct`] and map into it.
    ///
    /// # Errors
    ///
    /// [`Error::NotConstructible`] when `T` cannot be allocated; no partial
    /// target is returned.
    fn map(&self, source: &S) -> Result<T> {
        let mut target = T::construct()?;
        self.map_onto(source, &mut target)?;
        Ok(target)
    }
}

/// Mapper aggregating the correspondences of an ordered list of strategies.
pub struct CompositeMapper<S: Mapped, T: Mapped> {
    mapping: TypeMapping<S, T>,
    strategies: Vec<&'static str>,
}

impl<S: Mapped, T: Mapped> CompositeMapper<S, T> {
    /// Build with [`ConflictPolicy::LastWriteWins`].
    pub fn new(strategies: Vec<Box<dyn MappingStrategy<S, T>>>) -> Result<Self> {
        Self::with_policy(strategies, ConflictPolicy::LastWriteWins)
    }

    /// Run every strategy once, in order, into one type mapping.
    pub fn with_policy(
        strategies: Vec<Box<dyn MappingStrategy<S, T>>>,
        policy: ConflictPolicy,
    ) -> Result<Self> {
        let mut mapping = TypeMapping::new();
        let mut names = Vec::with_capacity(strategies.len());

        for strategy in &strategies {
            let before = mapping.len();
            strategy.generate(&mut mapping)?;
            log::debug!(
                "[CompositeMapper] {} contributed {} correspondence(s) to {}",
                strategy.name(),
                mapping.len() - before,
                mapping.pair()
            );
            names.push(strategy.name());
        }

        if let Some(member) = mapping.first_overlap() {
            match policy {
                ConflictPolicy::LastWriteWins => log::debug!(
                    "[CompositeMapper] {}: target member '{}' written {} times, last write wins",
                    mapping.pair(),
                    member,
                    mapping.writers_of(member).count()
                ),
                ConflictPolicy::Reject => {
                    return Err(Error::ConflictingCorrespondence {
                        pair: mapping.pair(),
                        member,
                    })
                }
            }
        }

        Ok(Self {
            mapping,
            strategies: names,
        })
    }

    /// Correspondences executed by this mapper, in evaluation order.
    pub fn type_mapping(&self) -> &TypeMapping<S, T> {
        &self.mapping
    }

    /// Names of the strategies that built this mapper, in order.
    pub fn strategy_names(&self) -> &[&'static str] {
        &self.strategies
    }
}

impl<S: Mapped, T: Mapped> Mapper<S, T> for CompositeMapper<S, T> {
    fn map_onto(&self, source: &S, target: &mut T) -> Result<()> {
        self.mapping.apply(source, target);
        Ok(())
    }
}

impl<S: Mapped, T: Mapped> std::fmt::Debug for CompositeMapper<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMapper")
            .field("strategies", &self.strategies)
            .field("mapping", &self.mapping)
            .finish()
    }
}
