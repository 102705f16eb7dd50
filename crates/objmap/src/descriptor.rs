// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Correspondence descriptors and the per-pair type mapping.

use crate::member::{Mapped, Member};
use crate::pair::TypePair;

/// Flow allowed by a [`Correspondence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SourceToTarget,
    TargetToSource,
    Both,
}

impl Direction {
    /// Whether a forward `map(source -> target)` applies the descriptor.
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::SourceToTarget | Direction::Both)
    }

    /// Whether a reverse flow applies the descriptor.
    pub const fn is_backward(self) -> bool {
        matches!(self, Direction::TargetToSource | Direction::Both)
    }
}

/// Link between one member of `S` and one member of `T`.
///
/// Both members are guaranteed to share the same value type; construction
/// through [`Correspondence::link`] refuses anything else.
pub struct Correspondence<S: 'static, T: 'static> {
    source: &'static Member<S>,
    target: &'static Member<T>,
    direction: Direction,
    origin: &'static str,
}

impl<S: 'static, T: 'static> Correspondence<S, T> {
    /// Link two members, or `None` if their value types differ.
    pub fn link(
        source: &'static Member<S>,
        target: &'static Member<T>,
        direction: Direction,
        origin: &'static str,
    ) -> Option<Self> {
        if !source.same_value_type(target) {
            return None;
        }
        Some(Self {
            source,
            target,
            direction,
            origin,
        })
    }

    pub fn source(&self) -> &'static Member<S> {
        self.source
    }

    pub fn target(&self) -> &'static Member<T> {
        self.target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Name of the strategy that produced this link.
    pub fn origin(&self) -> &'static str {
        self.origin
    }

    /// Copy the source member value into the target member.
    pub fn apply(&self, source: &S, target: &mut T) {
        let value = (self.source.get)(source);
        let slot = (self.target.get_mut)(target);
        let copied = (self.target.assign)(value, slot);
        debug_assert!(
            copied,
            "value type checked at link time: {} -> {}",
            self.source.qualified_name(),
            self.target.qualified_name()
        );
    }

    /// Copy the target member value back into the source member.
    pub fn apply_backward(&self, target: &T, source: &mut S) {
        let value = (self.target.get)(target);
        let slot = (self.source.get_mut)(source);
        let copied = (self.source.assign)(value, slot);
        debug_assert!(copied, "value type checked at link time");
    }
}

impl<S: 'static, T: 'static> Clone for Correspondence<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static, T: 'static> Copy for Correspondence<S, T> {}

impl<S: 'static, T: 'static> std::fmt::Debug for Correspondence<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correspondence")
            .field("source", &self.source.name)
            .field("target", &self.target.name)
            .field("direction", &self.direction)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Ordered correspondences for one `(S, T)` pair.
///
/// Order is evaluation order: a later entry writing the same target member
/// overwrites an earlier one.
pub struct TypeMapping<S: 'static, T: 'static> {
    entries: Vec<Correspondence<S, T>>,
}

impl<S: Mapped, T: Mapped> TypeMapping<S, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn pair(&self) -> TypePair {
        TypePair::of::<S, T>()
    }

    pub fn push(&mut self, correspondence: Correspondence<S, T>) {
        self.entries.push(correspondence);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Correspondence<S, T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that write `member` on the target during a forward map.
    pub fn writers_of<'a>(
        &'a self,
        member: &'a str,
    ) -> impl Iterator<Item = &'a Correspondence<S, T>> + 'a {
        self.entries
            .iter()
            .filter(move |c| c.direction.is_forward() && c.target.name == member)
    }

    /// First target member written by more than one forward entry.
    pub fn first_overlap(&self) -> Option<&'static str> {
        let mut seen: Vec<&'static str> = Vec::with_capacity(self.entries.len());
        for c in self.entries.iter().filter(|c| c.direction.is_forward()) {
            if seen.contains(&c.target.name) {
                return Some(c.target.name);
            }
            seen.push(c.target.name);
        }
        None
    }

    /// Execute every forward entry in order.
    pub fn apply(&self, source: &S, target: &mut T) {
        for c in self.entries.iter().filter(|c| c.direction.is_forward()) {
            c.apply(source, target);
        }
    }
}

impl<S: Mapped, T: Mapped> Default for TypeMapping<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: Mapped, T: Mapped> IntoIterator for &'a TypeMapping<S, T> {
    type Item = &'a Correspondence<S, T>;
    type IntoIter = std::slice::Iter<'a, Correspondence<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Mapped, T: Mapped> std::fmt::Debug for TypeMapping<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMapping")
            .field("pair", &self.pair())
            .field("entries", &self.entries)
            .finish()
    }
}
