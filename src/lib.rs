//! Sling Siege - a slingshot physics-puzzle round controller
//!
//! Core modules:
//! - `sim`: round state machine, physics-event translation, particles
//! - `levels`: pure level catalog (body descriptors per level)
//! - `view`: drawable snapshots and outcome notifications for a renderer
//! - `tuning`: data-driven game balance
//!
//! Rendering, input devices and the window are external collaborators: the
//! library consumes "drag started/ended on body" calls and produces
//! [`view::FrameSnapshot`] values plus outcome events. The rigid-body world
//! is consumed through the [`sim::PhysicsBackend`] trait; a built-in
//! impulse-based implementation is provided so the crate runs headless.

pub mod levels;
pub mod sim;
pub mod tuning;
pub mod view;

pub use sim::{PhysicsBackend, RoundController, RoundOutcome};
pub use tuning::Tuning;
pub use view::{FrameSnapshot, OutcomeEvent};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the original runner)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Minimum pull distance before a release counts as a launch.
    /// Below this the sling spring simply snaps the bird back.
    pub const MIN_LAUNCH_PULL: f32 = 20.0;

    /// Delay between release and sling detachment, so the stored spring
    /// energy has a step to transfer into bird velocity first.
    pub const SLING_DETACH_DELAY: f32 = 0.02;

    /// Wait after launch before the first win/loss evaluation.
    pub const OUTCOME_SETTLE_DELAY: f32 = 3.5;

    /// Extra grace once the sling is gone and pigs remain, covering
    /// chain destruction from still-rolling debris.
    pub const CHAIN_SETTLE_DELAY: f32 = 1.5;

    /// Score awards
    pub const BLOCK_SCORE: u32 = 50;
    pub const PIG_SCORE: u32 = 500;

    /// Sling anchor placement relative to the viewport
    pub const ANCHOR_X_FRAC: f32 = 0.2;
    pub const ANCHOR_Y_OFFSET: f32 = 200.0;
}
