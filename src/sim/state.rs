//! Round state and core simulation types
//!
//! `RoundState` is an explicit owned value (no ambient globals) so collision
//! classification and outcome evaluation are unit-testable against a fake
//! physics backend.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier for a body owned by the physics backend.
pub type BodyId = u32;

/// Identifier for the sling constraint.
pub type SlingId = u32;

/// Closed taxonomy of body kinds.
///
/// `Pig` is the fragile target; `Wood` and `Ice` are structural blocks with
/// a shared destruction rule but distinct burst colors. `Ground` and
/// `Platform` are indestructible level fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Bird,
    Pig,
    Wood,
    Ice,
    Platform,
    Ground,
}

/// Collider shape for a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Shape::Rect {
            half_extents: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Full bounding extents (width, height), ignoring rotation.
    pub fn extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Rect { half_extents } => half_extents * 2.0,
        }
    }
}

/// Everything needed to create a body in the physics backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub shape: Shape,
    pub pos: Vec2,
    pub is_static: bool,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl BodyDef {
    pub fn new(kind: BodyKind, shape: Shape, pos: Vec2) -> Self {
        Self {
            kind,
            shape,
            pos,
            is_static: false,
            density: 0.001,
            restitution: 0.2,
            friction: 0.5,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

/// Win/loss state of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    InProgress,
    Won,
    Lost,
}

/// Mutable per-round state owned by the controller.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Current level index into the catalog
    pub level: usize,
    /// Cumulative score; reset only when level 0 loads
    pub score: u32,
    /// Round outcome; terminal once it leaves `InProgress`
    pub outcome: RoundOutcome,
    /// Fixed sling anchor derived from the viewport
    pub anchor: Vec2,
    /// The live projectile, if a level is loaded
    pub bird: Option<BodyId>,
    /// The sling constraint; `None` means "already launched"
    pub sling: Option<SlingId>,
    /// Bodies whose destruction side effects already fired
    dead: HashSet<BodyId>,
    /// Bumped on every level (re)load to invalidate stale timers
    pub generation: u64,
}

impl RoundState {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            level: 0,
            score: 0,
            outcome: RoundOutcome::InProgress,
            anchor,
            bird: None,
            sling: None,
            dead: HashSet::new(),
            generation: 0,
        }
    }

    /// Reset for a fresh level. Score survives unless this is level 0.
    pub fn begin_level(&mut self, index: usize) {
        self.level = index;
        if index == 0 {
            self.score = 0;
        }
        self.outcome = RoundOutcome::InProgress;
        self.bird = None;
        self.sling = None;
        self.dead.clear();
        self.generation += 1;
    }

    /// Score only ever goes up within a round.
    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// Mark a body dead. Returns `false` if it already was, so destruction
    /// side effects fire exactly once per body.
    pub fn mark_dead(&mut self, id: BodyId) -> bool {
        self.dead.insert(id)
    }

    pub fn is_dead(&self, id: BodyId) -> bool {
        self.dead.contains(&id)
    }

    /// Transition out of `InProgress`. Returns `false` (and leaves the state
    /// untouched) if the round already concluded: outcomes never reverse.
    pub fn conclude(&mut self, outcome: RoundOutcome) -> bool {
        debug_assert_ne!(outcome, RoundOutcome::InProgress);
        if self.outcome != RoundOutcome::InProgress {
            return false;
        }
        self.outcome = outcome;
        true
    }

    /// Whether the bird is still held by the sling.
    pub fn bird_on_sling(&self) -> bool {
        self.sling.is_some()
    }
}
