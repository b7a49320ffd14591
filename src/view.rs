//! Presentation-facing projection
//!
//! The renderer never reaches into the simulation; each frame it receives a
//! [`FrameSnapshot`] (what to draw, where, with what semantic kind) and
//! drains [`OutcomeEvent`]s for UI. How pixels are produced is entirely the
//! adapter's business.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::particles::Particle;
use crate::sim::BodyKind;

/// An sRGB color the adapter maps to its own paint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Semantic colors shared by burst particles and the default renderer.
pub mod palette {
    use super::Color;

    pub const WOOD: Color = Color::rgb(0xde, 0xb8, 0x87);
    pub const ICE: Color = Color::rgb(0xa5, 0xf2, 0xf3);
    pub const PIG_BURST: Color = Color::rgb(0x76, 0xc8, 0x93);
    pub const SLING_BAND: Color = Color::rgb(0x3e, 0x27, 0x23);
}

/// Burst color for a destructible kind.
pub fn burst_color(kind: BodyKind) -> Color {
    match kind {
        BodyKind::Wood => palette::WOOD,
        BodyKind::Ice => palette::ICE,
        // Pigs and everything else share the green pop; only destructible
        // kinds ever reach a spawn call.
        _ => palette::PIG_BURST,
    }
}

/// Pose of one live body, enough for the adapter to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub rotation: f32,
    /// Full bounding extents (width, height)
    pub extents: Vec2,
}

/// Where to draw the sling bands while the bird is still held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlingView {
    /// Back band attachment (drawn behind the bird)
    pub left_fork: Vec2,
    /// Front band attachment (drawn over the bird)
    pub right_fork: Vec2,
    /// Both bands run to the bird's center
    pub pouch: Vec2,
}

/// Everything the adapter needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Live bodies in stable (creation) order
    pub bodies: Vec<BodyView>,
    pub particles: Vec<Particle>,
    /// `None` once the bird has launched
    pub sling: Option<SlingView>,
    /// Aim guide; present exactly while the sling is
    pub trajectory: Option<Vec<Vec2>>,
}

/// Round conclusion notifications for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    Won {
        score: u32,
        /// True when there is no next level to advance to
        cleared_all: bool,
    },
    Lost {
        score: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_colors_are_kind_specific() {
        assert_eq!(burst_color(BodyKind::Wood), palette::WOOD);
        assert_eq!(burst_color(BodyKind::Ice), palette::ICE);
        assert_eq!(burst_color(BodyKind::Pig), palette::PIG_BURST);
        assert_ne!(palette::WOOD, palette::ICE);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = FrameSnapshot {
            bodies: vec![BodyView {
                kind: BodyKind::Pig,
                pos: Vec2::new(10.0, 20.0),
                rotation: 0.0,
                extents: Vec2::splat(40.0),
            }],
            particles: Vec::new(),
            sling: None,
            trajectory: None,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Pig\""));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bodies.len(), 1);
    }
}
