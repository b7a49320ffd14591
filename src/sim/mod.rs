//! Round simulation module
//!
//! All gameplay logic lives here, behind the narrow [`PhysicsBackend`]
//! seam: the controller owns round state and translates backend collision
//! impulses into game semantics. Nothing in this module renders or touches
//! a platform API.

pub mod particles;
pub mod physics;
pub mod round;
pub mod state;
pub mod trajectory;

pub use particles::{Particle, ParticleSystem};
pub use physics::{BodyState, Contact, ImpulseWorld, PhysicsBackend, SpringParams};
pub use round::RoundController;
pub use state::{BodyDef, BodyId, BodyKind, RoundOutcome, RoundState, Shape, SlingId};
pub use trajectory::preview;
