// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Manual strategy: explicit member links declared in code.

use crate::descriptor::{Correspondence, Direction, TypeMapping};
use crate::error::{Error, Result};
use crate::member::Mapped;
use crate::strategy::MappingStrategy;

/// Explicit `source member -> target member` links by name.
///
/// Unlike annotations, a link naming an unknown member is a build error.
///
/// # Example
///
/// ```rust
/// use objmap::{CompositeMapper, Mapped, ManualStrategy, Mapper};
///
/// #[derive(Mapped, Default)]
/// struct Person { first_name: String }
///
/// #[derive(Mapped, Default)]
/// struct Badge { caption: String }
///
/// let mapper = CompositeMapper::<Person, Badge>::new(vec![
///     Box::new(ManualStrategy::new().link("first_name", "caption")),
/// ])
/// .unwrap();
///
/// let badge = mapper.map(&Person { first_name: "Grace".into() }).unwrap();
/// assert_eq!(badge.caption, "Grace");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualStrategy {
    links: Vec<(String, String)>,
}

impl ManualStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link from `source` (member of S) to `target` (member of T).
    pub fn link(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.links.push((source.into(), target.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<S: Mapped, T: Mapped> MappingStrategy<S, T> for ManualStrategy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn generate(&self, mapping: &mut TypeMapping<S, T>) -> Result<()> {
        for (source_name, target_name) in &self.links {
            let source = S::member(source_name).ok_or_else(|| Error::UnknownMember {
                type_name: S::type_name(),
                member: source_name.clone(),
            })?;
            let target = T::member(target_name).ok_or_else(|| Error::UnknownMember {
                type_name: T::type_name(),
                member: target_name.clone(),
            })?;

            let link = Correspondence::link(source, target, Direction::SourceToTarget, "manual")
                .ok_or_else(|| Error::MemberTypeMismatch {
                    source: format!("{} ({})", source.qualified_name(), (source.value_type_name)()),
                    target: format!("{} ({})", target.qualified_name(), (target.value_type_name)()),
                })?;
            mapping.push(link);
        }
        Ok(())
    }
}
