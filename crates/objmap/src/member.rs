// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static member tables describing mappable structs.
//!
//! A [`Mapped`] type exposes one [`Member`] per field. Each member carries
//! typed accessors (plain function pointers bound to one field), the identity
//! of its value type, and the [`MappingAnnotation`]s declared on the field.
//! Tables are generated once per type by `#[derive(Mapped)]` and live in
//! static memory, so strategies can hand out `&'static` references to them.
//!
//! # Generated Layout
//!
//! ```text
//! #[derive(Mapped)]
//! struct PersonView {
//!     #[mapping(to_target, other = Person, member = "first_name")]
//!     name: String,
//! }
//!
//! PersonView::members()
//! +-- Member { name: "name", value_type: TypeId::of::<String>,
//!              get, get_mut, assign::<String>,
//!              annotations: [ToTarget Person::first_name] }
//! ```

use std::any::{Any, TypeId};

use crate::error::{Error, Result};

/// Struct whose fields can take part in a mapping.
///
/// Normally implemented through `#[derive(Mapped)]`.
pub trait Mapped: Sized + 'static {
    /// Member table in field declaration order.
    fn members() -> &'static [Member<Self>];

    /// Allocate a fresh instance used as target by `map(source)`.
    ///
    /// The derive uses `Default::default()` unless the struct is marked
    /// `#[mapped(no_default)]`.
    fn construct() -> Result<Self> {
        Err(Error::NotConstructible(std::any::type_name::<Self>()))
    }

    /// Fully-qualified type name, for diagnostics.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Look up a member by exact name.
    fn member(name: &str) -> Option<&'static Member<Self>> {
        Self::members().iter().find(|m| m.name == name)
    }
}

/// Role a [`MappingAnnotation`] gives to the annotated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationDirection {
    /// The annotated member is written when its struct is the mapping target.
    ToTarget,
    /// The annotated member is read when its struct is the mapping source.
    ToSource,
    /// Either of the above.
    Both,
}

impl AnnotationDirection {
    /// Whether this annotation applies to a scan pass looking for `role`.
    pub const fn includes(self, role: AnnotationDirection) -> bool {
        matches!(
            (self, role),
            (AnnotationDirection::Both, _)
                | (AnnotationDirection::ToTarget, AnnotationDirection::ToTarget)
                | (AnnotationDirection::ToSource, AnnotationDirection::ToSource)
        )
    }
}

/// `#[mapping(direction, other = Type, member = "name")]` as stored in the
/// member table.
#[derive(Clone, Copy)]
pub struct MappingAnnotation {
    pub direction: AnnotationDirection,
    /// Identity of the type the annotation points at.
    pub other_type: fn() -> TypeId,
    pub other_type_name: fn() -> &'static str,
    /// Member name looked up on the other type.
    pub member: &'static str,
}

impl MappingAnnotation {
    /// Whether the annotation points at `U`.
    pub fn targets<U: 'static>(&self) -> bool {
        (self.other_type)() == TypeId::of::<U>()
    }
}

impl std::fmt::Debug for MappingAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingAnnotation")
            .field("direction", &self.direction)
            .field("other_type", &(self.other_type_name)())
            .field("member", &self.member)
            .finish()
    }
}

/// One field of a [`Mapped`] struct.
pub struct Member<T: 'static> {
    pub name: &'static str,
    pub value_type: fn() -> TypeId,
    pub value_type_name: fn() -> &'static str,
    pub get: fn(&T) -> &dyn Any,
    pub get_mut: fn(&mut T) -> &mut dyn Any,
    /// Clones a value of this member's type from the first slot into the
    /// second. Returns `false` when either slot has another type.
    pub assign: fn(&dyn Any, &mut dyn Any) -> bool,
    pub annotations: &'static [MappingAnnotation],
}

impl<T: 'static> Member<T> {
    /// Whether `other` holds the same value type as `self`.
    pub fn same_value_type<U: 'static>(&self, other: &Member<U>) -> bool {
        (self.value_type)() == (other.value_type)()
    }

    /// Annotations that apply to a scan pass for `role` pointing at `U`.
    pub fn annotations_for<U: 'static>(
        &self,
        role: AnnotationDirection,
    ) -> impl Iterator<Item = &'static MappingAnnotation> {
        let annotations: &'static [MappingAnnotation] = self.annotations;
        annotations
            .iter()
            .filter(move |a| a.direction.includes(role) && a.targets::<U>())
    }

    /// `Type::member` label for diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", std::any::type_name::<T>(), self.name)
    }
}

impl<T: 'static> std::fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("value_type", &(self.value_type_name)())
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// Assignment thunk stored in [`Member::assign`] for value type `V`.
pub fn assign<V: Any + Clone>(from: &dyn Any, to: &mut dyn Any) -> bool {
    match (from.downcast_ref::<V>(), to.downcast_mut::<V>()) {
        (Some(value), Some(slot)) => {
            slot.clone_from(value);
            true
        }
        _ => false,
    }
}
