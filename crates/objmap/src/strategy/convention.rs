// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Convention strategy: same member name, same value type.

use crate::descriptor::{Correspondence, Direction, TypeMapping};
use crate::error::Result;
use crate::member::Mapped;
use crate::strategy::MappingStrategy;

/// Links every target member to the source member of the same name when
/// both hold the same value type. Walks the target members in declaration
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionStrategy;

impl<S: Mapped, T: Mapped> MappingStrategy<S, T> for ConventionStrategy {
    fn name(&self) -> &'static str {
        "convention"
    }

    fn generate(&self, mapping: &mut TypeMapping<S, T>) -> Result<()> {
        for target in T::members() {
            let Some(source) = S::member(target.name) else {
                continue;
            };
            if let Some(link) = Correspondence::link(source, target, Direction::Both, "convention")
            {
                mapping.push(link);
            }
        }
        Ok(())
    }
}
