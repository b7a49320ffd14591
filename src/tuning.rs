//! Data-driven game balance
//!
//! The two shipped balance variants use different block thresholds and bird
//! sizes; both are exposed as named constructors rather than baking a single
//! "correct" value into the sim.

use serde::{Deserialize, Serialize};

/// Balance knobs carried by the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Bird collider radius
    pub bird_radius: f32,
    /// Bird body density
    pub bird_density: f32,
    /// Bird bounciness
    pub bird_restitution: f32,

    /// Sling spring stiffness
    pub sling_stiffness: f32,
    /// Sling spring damping
    pub sling_damping: f32,
    /// Sling spring rest length
    pub sling_rest_length: f32,

    /// Normal impulse above which a pig dies (pigs are fragile)
    pub pig_break_impulse: f32,
    /// Normal impulse above which wood/ice blocks shatter
    pub block_break_impulse: f32,

    /// Particles emitted when a block shatters
    pub block_burst: u32,
    /// Particles emitted when a pig pops
    pub pig_burst: u32,
}

impl Tuning {
    /// The original balance: light bird, sturdy blocks.
    pub fn classic() -> Self {
        Self {
            bird_radius: 20.0,
            bird_density: 0.004,
            bird_restitution: 0.6,
            sling_stiffness: 0.05,
            sling_damping: 0.01,
            sling_rest_length: 1.0,
            pig_break_impulse: 3.0,
            block_break_impulse: 15.0,
            block_burst: 5,
            pig_burst: 10,
        }
    }

    /// Variant balance: bigger bird, blocks shatter a little easier.
    pub fn heavy() -> Self {
        Self {
            bird_radius: 25.0,
            block_break_impulse: 12.0,
            ..Self::classic()
        }
    }

    /// Destruction threshold for a destructible kind, if any.
    pub fn break_impulse(&self, kind: crate::sim::BodyKind) -> Option<f32> {
        use crate::sim::BodyKind;
        match kind {
            BodyKind::Pig => Some(self.pig_break_impulse),
            BodyKind::Wood | BodyKind::Ice => Some(self.block_break_impulse),
            BodyKind::Bird | BodyKind::Ground | BodyKind::Platform => None,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyKind;

    #[test]
    fn test_variants_differ_only_in_documented_knobs() {
        let classic = Tuning::classic();
        let heavy = Tuning::heavy();
        assert_eq!(classic.block_break_impulse, 15.0);
        assert_eq!(heavy.block_break_impulse, 12.0);
        assert_eq!(classic.bird_radius, 20.0);
        assert_eq!(heavy.bird_radius, 25.0);
        assert_eq!(classic.pig_break_impulse, heavy.pig_break_impulse);
    }

    #[test]
    fn test_break_impulse_by_kind() {
        let t = Tuning::classic();
        assert_eq!(t.break_impulse(BodyKind::Pig), Some(3.0));
        assert_eq!(t.break_impulse(BodyKind::Wood), Some(15.0));
        assert_eq!(t.break_impulse(BodyKind::Ice), Some(15.0));
        assert_eq!(t.break_impulse(BodyKind::Ground), None);
        assert_eq!(t.break_impulse(BodyKind::Platform), None);
        assert_eq!(t.break_impulse(BodyKind::Bird), None);
    }
}
