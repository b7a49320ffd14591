//! Level catalog
//!
//! Pure data: each level is a function from viewport size to the body
//! descriptors that make up its structure. Builders are deterministic and
//! re-invocable, so a retry reproduces the level exactly.

use glam::Vec2;

use crate::sim::{BodyDef, BodyKind, Shape};

type LevelBuilder = fn(f32, f32) -> Vec<BodyDef>;

const LEVELS: &[LevelBuilder] = &[level_stack, level_bunker];

/// Number of levels in the catalog.
pub fn level_count() -> usize {
    LEVELS.len()
}

/// Body descriptors for level `index` at the given viewport size.
///
/// Panics on an out-of-range index; callers validate against
/// [`level_count`] first.
pub fn build(index: usize, width: f32, height: f32) -> Vec<BodyDef> {
    assert!(
        index < LEVELS.len(),
        "level index {index} out of range (have {})",
        LEVELS.len()
    );
    LEVELS[index](width, height)
}

/// The ground strip spanning the viewport, just below the bottom edge.
pub fn ground(width: f32, height: f32) -> BodyDef {
    BodyDef::new(
        BodyKind::Ground,
        Shape::rect(width, 100.0),
        Vec2::new(width / 2.0, height + 20.0),
    )
    .fixed()
    .with_friction(1.0)
}

fn wood(pos: Vec2, width: f32, height: f32) -> BodyDef {
    BodyDef::new(BodyKind::Wood, Shape::rect(width, height), pos)
}

fn ice(pos: Vec2, width: f32, height: f32) -> BodyDef {
    BodyDef::new(BodyKind::Ice, Shape::rect(width, height), pos)
}

fn pig(pos: Vec2, radius: f32) -> BodyDef {
    BodyDef::new(BodyKind::Pig, Shape::circle(radius), pos)
}

fn platform(pos: Vec2, width: f32) -> BodyDef {
    BodyDef::new(BodyKind::Platform, Shape::rect(width, 20.0), pos).fixed()
}

/// Level 1: a small tower, one pig inside and one on top.
fn level_stack(w: f32, h: f32) -> Vec<BodyDef> {
    let px = w * 0.7;
    let py = h - 150.0;
    vec![
        platform(Vec2::new(px, py), 200.0),
        wood(Vec2::new(px - 40.0, py - 30.0), 40.0, 40.0),
        wood(Vec2::new(px + 40.0, py - 30.0), 40.0, 40.0),
        pig(Vec2::new(px, py - 30.0), 20.0),
        // Roof plank over the sheltered pig
        wood(Vec2::new(px, py - 70.0), 120.0, 20.0),
        wood(Vec2::new(px, py - 100.0), 40.0, 40.0),
        pig(Vec2::new(px, py - 140.0), 20.0),
    ]
}

/// Level 2: a bunker — pyramid base, two pigs under a long plank, an ice
/// cap with a big pig on top.
fn level_bunker(w: f32, h: f32) -> Vec<BodyDef> {
    let px = w * 0.75;
    let py = h - 150.0;
    let mut bodies = vec![platform(Vec2::new(px, py), 300.0)];
    for i in 0..3 {
        bodies.push(wood(
            Vec2::new(px - 60.0 + i as f32 * 60.0, py - 30.0),
            50.0,
            50.0,
        ));
    }
    bodies.push(pig(Vec2::new(px - 30.0, py - 80.0), 20.0));
    bodies.push(pig(Vec2::new(px + 30.0, py - 80.0), 20.0));
    bodies.push(wood(Vec2::new(px, py - 130.0), 200.0, 20.0));
    bodies.push(ice(Vec2::new(px, py - 170.0), 40.0, 40.0));
    bodies.push(pig(Vec2::new(px, py - 210.0), 25.0));
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_are_deterministic() {
        for index in 0..level_count() {
            let first = build(index, 1280.0, 720.0);
            let second = build(index, 1280.0, 720.0);
            assert_eq!(first, second, "level {index} not reproducible");
        }
    }

    #[test]
    fn test_every_level_has_pigs_and_a_platform() {
        for index in 0..level_count() {
            let bodies = build(index, 1280.0, 720.0);
            let pigs = bodies.iter().filter(|b| b.kind == BodyKind::Pig).count();
            assert!(pigs > 0, "level {index} has no pigs");
            assert!(
                bodies
                    .iter()
                    .any(|b| b.kind == BodyKind::Platform && b.is_static),
                "level {index} has no static platform"
            );
        }
    }

    #[test]
    fn test_destructibles_are_dynamic() {
        for index in 0..level_count() {
            for body in build(index, 1280.0, 720.0) {
                if matches!(body.kind, BodyKind::Pig | BodyKind::Wood | BodyKind::Ice) {
                    assert!(!body.is_static);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        build(level_count(), 800.0, 600.0);
    }

    #[test]
    fn test_ground_spans_viewport() {
        let g = ground(1024.0, 768.0);
        assert!(g.is_static);
        assert_eq!(g.kind, BodyKind::Ground);
        assert_eq!(g.shape.extents().x, 1024.0);
        assert_eq!(g.pos, Vec2::new(512.0, 788.0));
    }
}
