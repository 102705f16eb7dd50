// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # objmap - Object-to-object mapping
//!
//! Copies values between members of two struct types, driven by pluggable
//! strategies. Correspondences for a `(source, target)` pair are discovered
//! once, cached in a [`MappingRepository`], and executed many times.
//!
//! ## Quick Start
//!
//! ```rust
//! use objmap::{MappingRepository, Mapped, Mapper, Result};
//!
//! #[derive(Mapped, Default)]
//! struct Person {
//!     id: u32,
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! #[derive(Mapped, Default)]
//! struct PersonIndexModel {
//!     id: u32,
//!     #[mapping(to_target, other = Person, member = "first_name")]
//!     name: String,
//! }
//!
//! fn main() -> Result<()> {
//!     let mapper = MappingRepository::global().resolve::<Person, PersonIndexModel>()?;
//!     let model = mapper.map(&Person {
//!         id: 7,
//!         first_name: "Ada".into(),
//!         last_name: "Lovelace".into(),
//!     })?;
//!
//!     assert_eq!(model.id, 7);
//!     assert_eq!(model.name, "Ada");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  MappingRepository   resolve / register / clear / global            |
//! |     cache: TypePair -> Arc<dyn Mapper<S, T>>                        |
//! +---------------------------------------------------------------------+
//! |  CompositeMapper     ordered strategies -> TypeMapping<S, T>        |
//! +---------------------------------------------------------------------+
//! |  Strategies          Convention | Attribute | Manual | custom       |
//! +---------------------------------------------------------------------+
//! |  #[derive(Mapped)]   static member tables + #[mapping] annotations  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Annotations
//!
//! `#[mapping(direction, other = Type, member = "name")]` on a field
//! declares that it corresponds to member `name` of `Type`. The direction
//! is the role the annotated field plays:
//!
//! | Direction | Used when the annotated struct is |
//! |-----------|-----------------------------------|
//! | `to_target` | the target (the field is written) |
//! | `to_source` | the source (the field is read) |
//! | `both` (default) | either |
//!
//! ## Features
//!
//! - `options-loaders` (default): [`YamlLoader`] for options files.

// Allow the derive macro to work inside this crate's tests
extern crate self as objmap;

/// Composite mapper and the `Mapper` capability.
pub mod composite;
/// Correspondence and type mapping descriptors.
pub mod descriptor;
/// Error type and `Result` alias.
pub mod error;
/// Fluent mapping calls on mapped values.
pub mod ext;
/// Member tables generated by `#[derive(Mapped)]`.
pub mod member;
/// Strategy order and conflict policy.
pub mod options;
/// Type pair cache key.
pub mod pair;
/// Mapper cache and build lock.
pub mod repository;
/// Correspondence discovery strategies.
pub mod strategy;

pub use composite::{CompositeMapper, Mapper};
pub use descriptor::{Correspondence, Direction, TypeMapping};
pub use error::{Error, Result};
pub use ext::MapExt;
pub use member::{AnnotationDirection, Mapped, MappingAnnotation, Member};
pub use objmap_codegen::Mapped; // Derive macro (for #[derive(objmap::Mapped)])
#[cfg(feature = "options-loaders")]
pub use options::yaml::YamlLoader;
pub use options::{ConflictPolicy, MappingOptions};
pub use pair::TypePair;
pub use repository::{MappingRepository, RepositoryStats};
pub use strategy::{
    AttributeStrategy, ConventionStrategy, ManualStrategy, MappingStrategy, StrategyFactories,
    StrategyId,
};
