//! Round controller: the state machine between input, physics and UI
//!
//! Owns the per-round state (level, score, bird, sling, outcome), loads and
//! resets levels, turns raw collision impulses into damage/score/destruction
//! and decides win/loss with settle-time grace. All mutation happens on the
//! single tick callback; the deferred actions (sling detachment after
//! release, settle checks) are one-shot timers tagged with the round
//! generation so a reload invalidates anything still in flight.

use std::cmp::Ordering;

use glam::Vec2;

use super::particles::ParticleSystem;
use super::physics::{Contact, PhysicsBackend, SpringParams};
use super::state::{BodyDef, BodyId, BodyKind, RoundOutcome, RoundState, Shape};
use super::trajectory;
use crate::consts::*;
use crate::levels;
use crate::tuning::Tuning;
use crate::view::{burst_color, palette, BodyView, FrameSnapshot, OutcomeEvent, SlingView};

/// One-shot deferred actions, fired from the tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    /// Remove the sling shortly after release, once the spring has fed
    /// its stored energy into the bird's velocity
    DetachSling,
    /// First win/loss evaluation after launch
    SettleCheck,
    /// Second chance for chain destruction before declaring defeat
    ChainCheck,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    at: f64,
    generation: u64,
    action: DeferredAction,
}

/// Drives rounds of the slingshot game against any [`PhysicsBackend`].
pub struct RoundController<P: PhysicsBackend> {
    world: P,
    state: RoundState,
    tuning: Tuning,
    viewport: Vec2,
    clock: f64,
    pending: Vec<Deferred>,
    particles: ParticleSystem,
    events: Vec<OutcomeEvent>,
    contacts: Vec<Contact>,
}

impl<P: PhysicsBackend> RoundController<P> {
    /// Build a controller over `world`. No level is loaded yet; call
    /// [`RoundController::load_level`] to start play.
    pub fn new(world: P, viewport_width: f32, viewport_height: f32, tuning: Tuning) -> Self {
        let anchor = Vec2::new(
            viewport_width * ANCHOR_X_FRAC,
            viewport_height - ANCHOR_Y_OFFSET,
        );
        log::info!(
            "round controller up, viewport {viewport_width}x{viewport_height}, anchor {anchor}"
        );
        Self {
            world,
            state: RoundState::new(anchor),
            tuning,
            viewport: Vec2::new(viewport_width, viewport_height),
            clock: 0.0,
            pending: Vec::new(),
            particles: ParticleSystem::new(0x51196),
            events: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Load (or reload) a level: clear the world, reset the round, create
    /// ground, bird and sling, then the catalog's bodies.
    ///
    /// Panics on an out-of-range index; that is a programmer error, not a
    /// user-recoverable state.
    pub fn load_level(&mut self, index: usize) {
        assert!(
            index < levels::level_count(),
            "level index {index} out of range (have {})",
            levels::level_count()
        );
        self.world.clear();
        self.state.begin_level(index);
        self.particles.clear();

        self.world
            .add_body(levels::ground(self.viewport.x, self.viewport.y));

        let bird = self.world.add_body(
            BodyDef::new(
                BodyKind::Bird,
                Shape::circle(self.tuning.bird_radius),
                self.state.anchor,
            )
            .with_density(self.tuning.bird_density)
            .with_restitution(self.tuning.bird_restitution),
        );
        let sling = self.world.attach_sling(
            self.state.anchor,
            bird,
            SpringParams {
                stiffness: self.tuning.sling_stiffness,
                damping: self.tuning.sling_damping,
                rest_length: self.tuning.sling_rest_length,
            },
        );
        self.state.bird = Some(bird);
        self.state.sling = Some(sling);

        for def in levels::build(index, self.viewport.x, self.viewport.y) {
            self.world.add_body(def);
        }
        log::info!("level {index} loaded, score {}", self.state.score);
    }

    /// Reload the current level (keeps score unless it is level 0).
    pub fn retry(&mut self) {
        self.load_level(self.state.level);
    }

    /// Advance to the next level. Panics past the end of the catalog; the
    /// UI gates this on the `cleared_all` flag of the win event.
    pub fn next_level(&mut self) {
        self.load_level(self.state.level + 1);
    }

    /// Input hook: may this body be dragged? Only the live bird.
    pub fn on_drag_start(&self, body: BodyId) -> bool {
        self.state.bird == Some(body)
    }

    /// Input hook: a drag was released. Launches when the bird was let go;
    /// releasing anything else does not touch round state.
    pub fn on_drag_end(&mut self, body: BodyId) {
        if self.state.bird == Some(body) {
            self.launch();
        }
    }

    /// Fire the bird if it has been pulled far enough from the anchor.
    ///
    /// Detachment is deferred by a beat so the spring's stored energy
    /// transfers into bird velocity before the constraint goes away; a
    /// short pull is a silent no-op and the spring snaps the bird back.
    pub fn launch(&mut self) {
        if self.state.sling.is_none() {
            return; // already launched
        }
        let Some(bird) = self.state.bird else {
            return;
        };
        let Some(body) = self.world.body(bird) else {
            return;
        };
        let pull = body.pos.distance(self.state.anchor);
        if pull <= MIN_LAUNCH_PULL {
            log::debug!("launch refused, pull {pull:.1} px");
            return;
        }
        log::info!("bird released at {pull:.1} px pull");
        self.schedule(DeferredAction::DetachSling, SLING_DETACH_DELAY);
    }

    /// Advance the round by one fixed timestep.
    pub fn tick(&mut self, dt: f32) {
        self.clock += f64::from(dt);
        self.fire_due_actions();

        self.contacts.clear();
        self.world.step(dt, &mut self.contacts);
        let contacts = std::mem::take(&mut self.contacts);
        for contact in &contacts {
            self.process_impact(contact.a, contact.impulse);
            self.process_impact(contact.b, contact.impulse);
        }
        self.contacts = contacts;

        self.particles.advance();
    }

    /// Evaluate win/loss now.
    ///
    /// No pigs left wins outright. Pigs left with the sling gone means the
    /// shot is spent, but debris may still be rolling: defeat is only
    /// declared by a chain check a grace period later. Pigs left with the
    /// sling still armed is simply a round in progress.
    pub fn evaluate_outcome(&mut self) {
        if self.state.outcome != RoundOutcome::InProgress {
            return;
        }
        if self.pigs_remaining() == 0 {
            self.win();
        } else if self.state.sling.is_none() {
            self.schedule(DeferredAction::ChainCheck, CHAIN_SETTLE_DELAY);
        }
    }

    /// Drawable projection of the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        let bodies = self
            .world
            .bodies()
            .map(|b| BodyView {
                kind: b.kind,
                pos: b.pos,
                rotation: b.angle,
                extents: b.shape.extents(),
            })
            .collect();

        let bird_pos = self
            .state
            .bird
            .and_then(|id| self.world.body(id))
            .map(|b| b.pos);
        let armed = self.state.bird_on_sling();
        let sling = match (armed, bird_pos) {
            (true, Some(pouch)) => Some(SlingView {
                left_fork: self.state.anchor + Vec2::new(-15.0, -15.0),
                right_fork: self.state.anchor + Vec2::new(15.0, -25.0),
                pouch,
            }),
            _ => None,
        };
        let trajectory = match (armed, bird_pos) {
            (true, Some(pos)) => Some(trajectory::preview(pos, self.state.anchor).collect()),
            _ => None,
        };

        FrameSnapshot {
            bodies,
            particles: self.particles.particles().to_vec(),
            sling,
            trajectory,
        }
    }

    /// Take the outcome notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<OutcomeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.state.outcome
    }

    pub fn level(&self) -> usize {
        self.state.level
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// The backend, for the input layer (point queries, drag positions).
    pub fn world(&self) -> &P {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut P {
        &mut self.world
    }

    fn schedule(&mut self, action: DeferredAction, delay: f32) {
        self.pending.push(Deferred {
            at: self.clock + f64::from(delay),
            generation: self.state.generation,
            action,
        });
    }

    fn fire_due_actions(&mut self) {
        let now = self.clock;
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].at <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.at.partial_cmp(&b.at).unwrap_or(Ordering::Equal));
        for deferred in due {
            // A reload bumped the generation: the timer belongs to a round
            // that no longer exists.
            if deferred.generation != self.state.generation {
                log::debug!("dropping stale {:?}", deferred.action);
                continue;
            }
            self.fire(deferred.action);
        }
    }

    fn fire(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::DetachSling => {
                if let Some(sling) = self.state.sling.take() {
                    self.world.remove_sling(sling);
                    log::info!("sling detached, bird in free flight");
                    self.schedule(DeferredAction::SettleCheck, OUTCOME_SETTLE_DELAY);
                }
            }
            DeferredAction::SettleCheck => self.evaluate_outcome(),
            DeferredAction::ChainCheck => {
                if self.state.outcome != RoundOutcome::InProgress {
                    return;
                }
                if self.pigs_remaining() > 0 {
                    if self.state.conclude(RoundOutcome::Lost) {
                        log::info!("round lost with score {}", self.state.score);
                        self.events.push(OutcomeEvent::Lost {
                            score: self.state.score,
                        });
                    }
                } else {
                    self.win();
                }
            }
        }
    }

    fn win(&mut self) {
        if self.state.conclude(RoundOutcome::Won) {
            let cleared_all = self.state.level + 1 >= levels::level_count();
            log::info!(
                "round won with score {}{}",
                self.state.score,
                if cleared_all { ", all levels clear" } else { "" }
            );
            self.events.push(OutcomeEvent::Won {
                score: self.state.score,
                cleared_all,
            });
        }
    }

    /// Classify one side of a collision pair against its destruction
    /// threshold. Dead bodies are skipped so side effects fire once.
    fn process_impact(&mut self, id: BodyId, impulse: f32) {
        if self.state.is_dead(id) {
            return;
        }
        let Some(body) = self.world.body(id) else {
            return;
        };
        let kind = body.kind;
        let Some(threshold) = self.tuning.break_impulse(kind) else {
            return;
        };
        if impulse <= threshold {
            return;
        }
        match kind {
            BodyKind::Pig => self.destroy_pig(id),
            BodyKind::Wood | BodyKind::Ice => self.smash_block(id, kind),
            _ => unreachable!("no threshold for {kind:?}"),
        }
    }

    /// Pop a pig: particles, +500, removal, then a win check. Idempotent.
    fn destroy_pig(&mut self, id: BodyId) {
        if !self.state.mark_dead(id) {
            return;
        }
        if let Some(body) = self.world.body(id) {
            self.particles
                .spawn(body.pos, palette::PIG_BURST, self.tuning.pig_burst);
        }
        self.state.award(PIG_SCORE);
        self.world.remove_body(id);
        log::debug!("pig {id} popped, score {}", self.state.score);
        self.evaluate_outcome();
    }

    /// Shatter a wood/ice block: particles in the kind's color, +50,
    /// removal. Blocks never affect win/loss directly.
    fn smash_block(&mut self, id: BodyId, kind: BodyKind) {
        if !self.state.mark_dead(id) {
            return;
        }
        if let Some(body) = self.world.body(id) {
            self.particles
                .spawn(body.pos, burst_color(kind), self.tuning.block_burst);
        }
        self.state.award(BLOCK_SCORE);
        self.world.remove_body(id);
        log::debug!("{kind:?} block {id} smashed, score {}", self.state.score);
    }

    fn pigs_remaining(&self) -> usize {
        self.world
            .bodies()
            .filter(|b| b.kind == BodyKind::Pig && !self.state.is_dead(b.id))
            .count()
    }
}
