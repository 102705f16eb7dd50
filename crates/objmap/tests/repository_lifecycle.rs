// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::needless_pass_by_value)] // Test functions
#![allow(clippy::float_cmp)] // Test assertions with constants

//! Repository lifecycle: caching, replacement, clearing, concurrent builds
//! and options loaded from YAML.

use std::sync::{Arc, Barrier};
use std::thread;

use objmap::{
    Error, Mapped, Mapper, MappingOptions, MappingRepository, MappingStrategy, ManualStrategy,
    Result, StrategyId,
};

#[derive(Mapped, Default, Debug, Clone, PartialEq)]
struct Telemetry {
    sensor_id: u32,
    celsius: f64,
    site: String,
}

#[derive(Mapped, Default, Debug, Clone, PartialEq)]
struct TelemetryRow {
    sensor_id: u32,
    #[mapping(to_target, other = Telemetry, member = "celsius")]
    temperature: f64,
    site: String,
}

fn sample() -> Telemetry {
    Telemetry {
        sensor_id: 12,
        celsius: 21.5,
        site: "north".to_string(),
    }
}

#[test]
fn test_concurrent_first_resolution() {
    const THREADS: usize = 16;

    let repo = Arc::new(MappingRepository::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let repo = Arc::clone(&repo);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mapper = repo.resolve::<Telemetry, TelemetryRow>().unwrap();
                let row = mapper.map(&sample()).unwrap();
                (mapper, row)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let (first, _) = &results[0];
    for (mapper, row) in &results {
        assert!(Arc::ptr_eq(first, mapper));
        assert_eq!(row.temperature, 21.5);
        assert_eq!(row.site, "north");
    }
    assert_eq!(repo.stats().builds, 1);
    assert_eq!(repo.stats().cached_pairs, 1);
}

#[test]
fn test_shared_mapper_across_threads() {
    let repo = MappingRepository::new();
    let mapper = repo.resolve::<Telemetry, TelemetryRow>().unwrap();

    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let mapper = Arc::clone(&mapper);
            thread::spawn(move || {
                let source = Telemetry {
                    sensor_id: i,
                    ..sample()
                };
                mapper.map(&source).unwrap().sensor_id
            })
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

struct Redacted;

impl Mapper<Telemetry, TelemetryRow> for Redacted {
    fn map_onto(&self, source: &Telemetry, target: &mut TelemetryRow) -> Result<()> {
        if source.site.is_empty() {
            return Err(Error::MappingFailed("telemetry without site".to_string()));
        }
        target.sensor_id = source.sensor_id;
        target.site = "redacted".to_string();
        Ok(())
    }
}

#[test]
fn test_registered_mapper_until_clear() {
    let repo = MappingRepository::new();
    repo.register::<Telemetry, TelemetryRow>(Arc::new(Redacted));
    assert!(repo.contains::<Telemetry, TelemetryRow>());

    let mapper = repo.resolve::<Telemetry, TelemetryRow>().unwrap();
    assert_eq!(mapper.map(&sample()).unwrap().site, "redacted");

    let err = mapper
        .map(&Telemetry {
            site: String::new(),
            ..sample()
        })
        .err()
        .unwrap();
    assert!(matches!(err, Error::MappingFailed(_)));
    assert_eq!(repo.stats().builds, 0);

    repo.clear();
    let rebuilt = repo.resolve::<Telemetry, TelemetryRow>().unwrap();
    assert_eq!(rebuilt.map(&sample()).unwrap().site, "north");
    assert_eq!(mapper.map(&sample()).unwrap().site, "redacted");
}

#[test]
fn test_clear_keeps_results_identical() {
    let repo = MappingRepository::new();
    let before = repo.resolve::<Telemetry, TelemetryRow>().unwrap().map(&sample()).unwrap();
    repo.clear();
    let after = repo.resolve::<Telemetry, TelemetryRow>().unwrap().map(&sample()).unwrap();
    assert_eq!(before, after);
    assert_eq!(repo.stats().builds, 2);
}

#[test]
fn test_custom_strategy_from_options() {
    let mut options = MappingOptions::new().with_strategies([
        StrategyId::Convention,
        StrategyId::custom("temperature_link"),
    ]);
    options.register_strategy::<Telemetry, TelemetryRow, _>("temperature_link", || {
        Ok(Box::new(ManualStrategy::new().link("celsius", "temperature"))
            as Box<dyn MappingStrategy<Telemetry, TelemetryRow>>)
    });

    let repo = MappingRepository::with_options(options);
    let row = repo
        .resolve::<Telemetry, TelemetryRow>()
        .unwrap()
        .map(&sample())
        .unwrap();
    assert_eq!(row.temperature, 21.5);
    assert_eq!(row.sensor_id, 12);

    let err = repo.resolve::<TelemetryRow, Telemetry>().err().unwrap();
    assert!(matches!(err, Error::StrategyUnavailable { .. }));
}

#[cfg(feature = "options-loaders")]
#[test]
fn test_options_from_yaml_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "strategies:").unwrap();
    writeln!(file, "  - convention").unwrap();
    writeln!(file, "conflict_policy: reject").unwrap();

    let options = objmap::YamlLoader::load_from_file(file.path()).unwrap();
    let repo = MappingRepository::with_options(options);

    let row = repo
        .resolve::<Telemetry, TelemetryRow>()
        .unwrap()
        .map(&sample())
        .unwrap();
    assert_eq!(row.sensor_id, 12);
    assert_eq!(row.temperature, 0.0);
}
