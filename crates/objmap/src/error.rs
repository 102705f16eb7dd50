// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the repository, strategies and mappers.

use crate::pair::TypePair;

/// Errors returned by objmap operations.
///
/// Build failures (strategy, member and conflict variants) are reported by
/// [`MappingRepository::resolve`](crate::MappingRepository::resolve); the pair
/// is left unresolved and a later call rebuilds from scratch.
///
/// # Example
///
/// ```rust
/// use objmap::{Error, Mapped, Mapper, MappingRepository};
///
/// #[derive(Mapped)]
/// #[mapped(no_default)]
/// struct Locked {
///     id: u32,
/// }
///
/// #[derive(Mapped, Default)]
/// struct Source {
///     id: u32,
/// }
///
/// let repo = MappingRepository::new();
/// let mapper = repo.resolve::<Source, Locked>().unwrap();
///
/// match mapper.map(&Source { id: 7 }) {
///     Err(Error::NotConstructible(name)) => println!("cannot allocate {}", name),
///     Err(e) => println!("other error: {}", e),
///     Ok(_) => println!("mapped"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Build Errors
    // ========================================================================
    /// A custom strategy id has no factory registered for this type pair.
    StrategyUnavailable {
        /// Strategy identifier as configured.
        strategy: String,
        /// Pair the build was attempted for.
        pair: TypePair,
    },
    /// A strategy factory or generation pass failed.
    StrategyFailed {
        /// Strategy identifier.
        strategy: String,
        /// Human-readable cause.
        reason: String,
    },
    /// A member named by an explicit link does not exist.
    UnknownMember {
        /// Type that was searched.
        type_name: &'static str,
        /// Member name that was requested.
        member: String,
    },
    /// Two linked members carry different value types.
    MemberTypeMismatch {
        /// `Type::member` on the source side.
        source: String,
        /// `Type::member` on the target side.
        target: String,
    },
    /// Two correspondences write the same target member and the conflict
    /// policy rejects overlaps.
    ConflictingCorrespondence {
        /// Pair being built.
        pair: TypePair,
        /// Target member written more than once.
        member: &'static str,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// The target type cannot be allocated by `map(source)`.
    NotConstructible(&'static str),
    /// A custom mapper failed while copying values.
    MappingFailed(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Options file could not be read or parsed.
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StrategyUnavailable { strategy, pair } => {
                write!(f, "No factory for strategy '{}' on {}", strategy, pair)
            }
            Error::StrategyFailed { strategy, reason } => {
                write!(f, "Strategy '{}' failed: {}", strategy, reason)
            }
            Error::UnknownMember { type_name, member } => {
                write!(f, "Unknown member '{}' on {}", member, type_name)
            }
            Error::MemberTypeMismatch { source, target } => {
                write!(f, "Member type mismatch: {} -> {}", source, target)
            }
            Error::ConflictingCorrespondence { pair, member } => write!(
                f,
                "Target member '{}' written by several correspondences on {}",
                member, pair
            ),
            Error::NotConstructible(name) => write!(f, "Type {} cannot be constructed", name),
            Error::MappingFailed(msg) => write!(f, "Mapping failed: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for results using the crate `Error`.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn test_display_mentions_pair_names() {
        let err = Error::StrategyUnavailable {
            strategy: "audit".to_string(),
            pair: TypePair::of::<A, B>(),
        };
        let msg = err.to_string();
        assert!(msg.contains("audit"));
        assert!(msg.contains("A"));
        assert!(msg.contains("B"));
    }

    #[test]
    fn test_display_unknown_member() {
        let err = Error::UnknownMember {
            type_name: "Person",
            member: "nickname".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown member 'nickname' on Person");
    }
}
