// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute-driven strategy: correspondences declared with `#[mapping]`.
//!
//! An annotation may sit on either side of the pair, so the strategy scans
//! twice:
//!
//! ```text
//! pass 1: members of S, annotations with role ToSource pointing at T
//!         S.annotated  ----read---->  T.named
//! pass 2: members of T, annotations with role ToTarget pointing at S
//!         S.named      ----read---->  T.annotated
//! ```
//!
//! Pass 1 entries come first, each pass in member declaration order then
//! annotation order. An annotation naming a member the other type does not
//! have contributes nothing; annotations are often written for a family of
//! types rather than for one pair.

use crate::descriptor::{Correspondence, Direction, TypeMapping};
use crate::error::Result;
use crate::member::{AnnotationDirection, Mapped, Member};
use crate::strategy::MappingStrategy;

/// Strategy reading `#[mapping(...)]` annotations on both types of the pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeStrategy;

const NAME: &str = "attribute";

/// Annotated member of `D` paired with the member it names on `O`.
type Found<D, O> = (&'static Member<D>, &'static Member<O>);

/// Scan `D`'s members for annotations playing `role` towards `O`.
fn scan<D: Mapped, O: Mapped>(role: AnnotationDirection) -> Vec<Found<D, O>> {
    let mut found = Vec::new();
    for member in D::members() {
        for annotation in member.annotations_for::<O>(role) {
            match O::member(annotation.member) {
                Some(other) => found.push((member, other)),
                None => log::debug!(
                    "[AttributeStrategy] {} names unknown member '{}' on {}, skipped",
                    member.qualified_name(),
                    annotation.member,
                    O::type_name()
                ),
            }
        }
    }
    found
}

fn push_link<S: Mapped, T: Mapped>(
    mapping: &mut TypeMapping<S, T>,
    source: &'static Member<S>,
    target: &'static Member<T>,
) {
    match Correspondence::link(source, target, Direction::SourceToTarget, NAME) {
        Some(link) => mapping.push(link),
        None => log::warn!(
            "[AttributeStrategy] {} ({}) and {} ({}) hold different types, skipped",
            source.qualified_name(),
            (source.value_type_name)(),
            target.qualified_name(),
            (target.value_type_name)()
        ),
    }
}

impl<S: Mapped, T: Mapped> MappingStrategy<S, T> for AttributeStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&self, mapping: &mut TypeMapping<S, T>) -> Result<()> {
        for (annotated, other) in scan::<S, T>(AnnotationDirection::ToSource) {
            push_link(mapping, annotated, other);
        }

        for (annotated, other) in scan::<T, S>(AnnotationDirection::ToTarget) {
            push_link(mapping, other, annotated);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapped;

    #[derive(Mapped, Default)]
    struct Account {
        code: i32,
        name: String,
    }

    #[derive(Mapped, Default)]
    struct AccountForm {
        #[mapping(both, other = Account, member = "name")]
        display_name: String,
        #[mapping(to_target, other = Account, member = "code")]
        account_code: i32,
        #[mapping(to_target, other = Account, member = "missing")]
        orphan: String,
        #[mapping(to_target, other = Account, member = "code")]
        wrong_type: String,
    }

    fn generate<S: Mapped, T: Mapped>() -> TypeMapping<S, T> {
        let mut mapping = TypeMapping::<S, T>::new();
        AttributeStrategy.generate(&mut mapping).unwrap();
        mapping
    }

    fn links<S: Mapped, T: Mapped>(mapping: &TypeMapping<S, T>) -> Vec<(&str, &str)> {
        mapping
            .iter()
            .map(|c| (c.source().name, c.target().name))
            .collect()
    }

    #[test]
    fn test_annotations_on_source_side() {
        let mapping = generate::<AccountForm, Account>();
        assert_eq!(links(&mapping), vec![("display_name", "name")]);
    }

    #[test]
    fn test_annotations_on_target_side() {
        let mapping = generate::<Account, AccountForm>();
        assert_eq!(
            links(&mapping),
            vec![("name", "display_name"), ("code", "account_code")]
        );
        assert!(mapping
            .iter()
            .all(|c| c.direction() == Direction::SourceToTarget && c.origin() == "attribute"));
    }

    #[test]
    fn test_unrelated_pair_yields_nothing() {
        let mapping = generate::<Account, Account>();
        assert!(mapping.is_empty());
    }

    #[derive(Mapped, Default)]
    struct Left {
        #[mapping(to_source, other = Right, member = "value")]
        value: u8,
    }

    #[derive(Mapped, Default)]
    struct Right {
        #[mapping(to_target, other = Left, member = "value")]
        value: u8,
    }

    #[test]
    fn test_both_passes_in_order() {
        let mapping = generate::<Left, Right>();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.first_overlap(), Some("value"));
    }

    #[derive(Mapped, Default)]
    struct Reading {
        #[mapping(to_source, other = ReadingLabel, member = "text")]
        raw: String,
        formatted: String,
    }

    #[derive(Mapped, Default)]
    struct ReadingLabel {
        #[mapping(to_target, other = Reading, member = "formatted")]
        text: String,
    }

    #[test]
    fn test_target_side_pass_runs_last() {
        let mapping = generate::<Reading, ReadingLabel>();
        assert_eq!(
            links(&mapping),
            vec![("raw", "text"), ("formatted", "text")]
        );

        let reading = Reading {
            raw: "21.5".to_string(),
            formatted: "21.5 C".to_string(),
        };
        let mut display = ReadingLabel::default();
        mapping.apply(&reading, &mut display);
        assert_eq!(display.text, "21.5 C");
    }
}
