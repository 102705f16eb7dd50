// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Directional (source, target) type key.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Cache key identifying one mapper.
///
/// Two pairs are equal when both `TypeId`s are equal; the names only serve
/// diagnostics. The key is directional: `(S, T)` and `(T, S)` are distinct.
#[derive(Clone, Copy)]
pub struct TypePair {
    source: TypeId,
    target: TypeId,
    source_name: &'static str,
    target_name: &'static str,
}

impl TypePair {
    /// Key for mapping `S` into `T`.
    pub fn of<S: 'static, T: 'static>() -> Self {
        Self {
            source: TypeId::of::<S>(),
            target: TypeId::of::<T>(),
            source_name: std::any::type_name::<S>(),
            target_name: std::any::type_name::<T>(),
        }
    }

    /// Same pair with source and target swapped.
    pub const fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            source_name: self.target_name,
            target_name: self.source_name,
        }
    }

    pub const fn source(&self) -> TypeId {
        self.source
    }

    pub const fn target(&self) -> TypeId {
        self.target
    }

    pub const fn source_name(&self) -> &'static str {
        self.source_name
    }

    pub const fn target_name(&self) -> &'static str {
        self.target_name
    }
}

impl PartialEq for TypePair {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target
    }
}

impl Eq for TypePair {}

impl Hash for TypePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
    }
}

impl std::fmt::Debug for TypePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypePair({} -> {})", self.source_name, self.target_name)
    }
}

impl std::fmt::Display for TypePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source_name, self.target_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Person;
    struct PersonView;

    #[test]
    fn test_pair_identity_is_stable() {
        assert_eq!(
            TypePair::of::<Person, PersonView>(),
            TypePair::of::<Person, PersonView>()
        );
    }

    #[test]
    fn test_pair_is_directional() {
        let forward = TypePair::of::<Person, PersonView>();
        let backward = TypePair::of::<PersonView, Person>();

        assert_ne!(forward, backward);
        assert_eq!(forward.reversed(), backward);

        let set: HashSet<_> = [forward, backward].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pair_display() {
        let pair = TypePair::of::<u8, String>();
        let text = pair.to_string();
        assert!(text.starts_with("u8 -> "));
        assert!(text.ends_with("String"));
    }
}
