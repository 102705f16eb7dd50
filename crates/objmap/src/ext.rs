// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent mapping calls on any [`Mapped`] value.
//!
//! ```rust
//! use objmap::{MapExt, Mapped};
//!
//! #[derive(Mapped, Default)]
//! struct User { login: String, age: u8 }
//!
//! #[derive(Mapped, Default)]
//! struct UserDto { login: String }
//!
//! let dto: UserDto = User { login: "kay".into(), age: 40 }.map_to().unwrap();
//! assert_eq!(dto.login, "kay");
//! ```

use crate::composite::Mapper;
use crate::error::Result;
use crate::member::Mapped;
use crate::repository::MappingRepository;

pub trait MapExt: Mapped {
    /// Map into a new `T` through the global repository.
    fn map_to<T: Mapped>(&self) -> Result<T> {
        self.map_to_in(MappingRepository::global())
    }

    /// Map into a new `T` through `repo`.
    fn map_to_in<T: Mapped>(&self, repo: &MappingRepository) -> Result<T> {
        repo.resolve::<Self, T>()?.map(self)
    }

    fn map_to_with<T: Mapped>(&self, mapper: &dyn Mapper<Self, T>) -> Result<T> {
        mapper.map(self)
    }

    /// Update `target` in place through the global repository.
    fn map_onto<T: Mapped>(&self, target: &mut T) -> Result<()> {
        self.map_onto_in(MappingRepository::global(), target)
    }

    fn map_onto_in<T: Mapped>(&self, repo: &MappingRepository, target: &mut T) -> Result<()> {
        repo.resolve::<Self, T>()?.map_onto(self, target)
    }

    fn map_onto_with<T: Mapped>(&self, mapper: &dyn Mapper<Self, T>, target: &mut T) -> Result<()> {
        mapper.map_onto(self, target)
    }
}

impl<S: Mapped> MapExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompositeMapper, ManualStrategy, Mapped, MappingOptions, StrategyId};

    #[derive(Mapped, Default, Debug, PartialEq)]
    struct Sensor {
        id: u16,
        label: String,
    }

    #[derive(Mapped, Default, Debug, PartialEq)]
    struct SensorRow {
        id: u16,
        caption: String,
    }

    fn sensor() -> Sensor {
        Sensor {
            id: 9,
            label: "boiler".to_string(),
        }
    }

    #[test]
    fn test_map_to_in_repository() {
        let repo = MappingRepository::new();
        let row: SensorRow = sensor().map_to_in(&repo).unwrap();
        assert_eq!(row.id, 9);
        assert_eq!(row.caption, "");
        assert!(repo.contains::<Sensor, SensorRow>());
    }

    #[test]
    fn test_map_onto_in_repository() {
        let repo = MappingRepository::with_options(
            MappingOptions::new().with_strategies([StrategyId::Attribute]),
        );
        let mut row = SensorRow {
            id: 1,
            caption: "kept".to_string(),
        };
        sensor().map_onto_in(&repo, &mut row).unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.caption, "kept");
    }

    #[test]
    fn test_explicit_mapper() {
        let mapper = CompositeMapper::<Sensor, SensorRow>::new(vec![Box::new(
            ManualStrategy::new().link("label", "caption"),
        )])
        .unwrap();

        let row = sensor().map_to_with::<SensorRow>(&mapper).unwrap();
        assert_eq!(row.caption, "boiler");
        assert_eq!(row.id, 0);

        let mut row = SensorRow::default();
        sensor().map_onto_with::<SensorRow>(&mapper, &mut row).unwrap();
        assert_eq!(row.caption, "boiler");
    }

    #[test]
    fn test_global_repository() {
        let mut row = SensorRow::default();
        sensor().map_onto(&mut row).unwrap();
        assert_eq!(row.id, 9);

        let row: SensorRow = sensor().map_to().unwrap();
        assert_eq!(row.id, 9);
    }
}
