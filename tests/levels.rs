use std::collections::HashSet;
use std::thread;

use onestroke::config::GeneratorConfig;
use onestroke::generator::difficulty::{self, Tier};
use onestroke::generator::fallback::{self, FallbackPattern};
use onestroke::{Level, LevelGenerator, MAX_LEVEL, Point};

fn assert_playable(level: &Level) {
    let violations = level.validate();
    assert!(violations.is_empty(), "level {}: {violations:?}", level.id);
    assert_eq!(level.start, level.solution[0]);
    let solution: HashSet<Point> = level.solution.iter().copied().collect();
    assert_eq!(solution.len(), level.solution.len());
}

#[test]
fn every_level_is_playable() {
    let generator = LevelGenerator::default();
    for id in 1..=MAX_LEVEL {
        let level = generator.generate(id).unwrap();
        assert_eq!(level.id, id);
        assert_eq!(level.grid_size, difficulty::grid_size(id));
        assert_playable(&level);
    }
}

#[test]
fn same_id_gives_same_level() {
    for id in [1, 2, 9, 17, 33, 64, 99, 150] {
        let first = onestroke::generate(id).unwrap();
        let second = LevelGenerator::default().generate(id).unwrap();
        assert_eq!(first, second, "level {id}");
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn first_level_is_small() {
    let level = onestroke::generate(1).unwrap();
    assert!(level.grid_size <= 3);
    assert!(level.nodes.len() <= 5);
    assert_eq!(Tier::from_level(1), Some(Tier::Tutorial));
}

#[test]
fn last_level_fills_the_largest_grid() {
    let level = onestroke::generate(MAX_LEVEL).unwrap();
    assert_eq!(level.grid_size, difficulty::MAX_GRID_SIZE);
    assert!(level.metrics().coverage >= 80.0);
    assert_playable(&level);
}

#[test]
fn hint_is_the_solution() {
    for id in [1, 10, 25, 70] {
        let level = onestroke::generate(id).unwrap();
        assert_eq!(onestroke::solution(id).unwrap(), level.solution);
        assert_eq!(level.hint().path, level.solution);
    }
}

#[test]
fn grid_never_shrinks() {
    let sizes: Vec<u32> = (1..=MAX_LEVEL).map(difficulty::grid_size).collect();
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(sizes[0], 3);
    assert_eq!(sizes[MAX_LEVEL as usize - 1], 8);
}

#[test]
fn fallback_levels_are_playable() {
    let generator = LevelGenerator::new(GeneratorConfig::fallback_only());
    for id in (1..=MAX_LEVEL).step_by(7) {
        let (level, stats) = generator.generate_with_stats(id).unwrap();
        assert_eq!(stats.fallback, Some(FallbackPattern::for_level(id)));
        let target = difficulty::curve(id).target_nodes();
        assert_eq!(level.solution, fallback::fallback_path(id, level.grid_size, target));
        assert!(level.nodes.len() >= target, "level {id}");
        assert_playable(&level);
    }
}

#[test]
fn threads_see_the_same_levels() {
    let ids: Vec<u32> = vec![4, 12, 31, 48];
    let expected: Vec<Level> = ids
        .iter()
        .map(|id| onestroke::generate(*id).unwrap())
        .collect();

    let generator = LevelGenerator::default();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = generator.clone();
            let ids = ids.clone();
            thread::spawn(move || {
                ids.iter()
                    .map(|id| generator.generate(*id).unwrap())
                    .collect::<Vec<Level>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn data_does_not_leak_the_solution() {
    let level = onestroke::generate(20).unwrap();
    let json = serde_json::to_value(level.data()).unwrap();
    assert!(json.get("solution").is_none());
    assert_eq!(json["id"], 20);
    assert_eq!(json["gridSize"], level.grid_size);
    assert_eq!(
        json["nodes"].as_array().map(Vec::len),
        Some(level.nodes.len())
    );
}
