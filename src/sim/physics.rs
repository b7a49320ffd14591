//! Physics backend contract and the built-in impulse world
//!
//! The round controller never talks to a concrete engine; it drives the
//! narrow [`PhysicsBackend`] trait: create/remove bodies and the sling
//! spring, step the simulation, read back poses and per-pair normal
//! impulses, query bodies by point. [`ImpulseWorld`] is a deliberately
//! modest implementation (circles and axis-aligned boxes, semi-implicit
//! Euler, impulse resolution) so the crate runs headless; tests of the
//! controller inject a scripted fake instead.

use glam::Vec2;

use super::state::{BodyDef, BodyId, BodyKind, Shape, SlingId};

/// Downward gravity in pixels/s².
pub const GRAVITY: f32 = 980.0;

/// Sling spring parameters (mirrors the constraint the original used).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub rest_length: f32,
}

/// A collision reported by the backend for one step.
///
/// `impulse` is the normal impulse magnitude in per-step units
/// (mass × pixels/step), the scale the destruction thresholds use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
    pub impulse: f32,
}

/// Pose and identity of a live body, as observed through the contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub is_static: bool,
}

/// The narrow interface the round controller consumes.
///
/// Input-layer helpers (e.g. a mouse drag constraint) are owned by the
/// caller and never live behind this trait, so `clear` removes everything.
pub trait PhysicsBackend {
    fn add_body(&mut self, def: BodyDef) -> BodyId;
    fn remove_body(&mut self, id: BodyId);
    fn attach_sling(&mut self, anchor: Vec2, body: BodyId, params: SpringParams) -> SlingId;
    fn remove_sling(&mut self, id: SlingId);
    /// Remove all bodies and constraints (level reload).
    fn clear(&mut self);
    /// Advance the world by `dt`, appending this step's contacts.
    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>);
    fn body(&self, id: BodyId) -> Option<&BodyState>;
    fn bodies(&self) -> Box<dyn Iterator<Item = &BodyState> + '_>;
    /// Topmost (most recently added) body containing the point, if any.
    fn query_point(&self, point: Vec2) -> Option<BodyId>;
}

struct Body {
    state: BodyState,
    inv_mass: f32,
    restitution: f32,
    friction: f32,
}

impl Body {
    fn new(id: BodyId, def: BodyDef) -> Self {
        let area = match def.shape {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Rect { half_extents } => 4.0 * half_extents.x * half_extents.y,
        };
        let inv_mass = if def.is_static {
            0.0
        } else {
            1.0 / (def.density * area)
        };
        Self {
            state: BodyState {
                id,
                kind: def.kind,
                shape: def.shape,
                pos: def.pos,
                vel: Vec2::ZERO,
                angle: 0.0,
                is_static: def.is_static,
            },
            inv_mass,
            restitution: def.restitution,
            friction: def.friction,
        }
    }

    fn contains(&self, point: Vec2) -> bool {
        match self.state.shape {
            Shape::Circle { radius } => self.state.pos.distance_squared(point) <= radius * radius,
            Shape::Rect { half_extents } => {
                let d = (point - self.state.pos).abs();
                d.x <= half_extents.x && d.y <= half_extents.y
            }
        }
    }
}

struct Sling {
    id: SlingId,
    anchor: Vec2,
    body: BodyId,
    params: SpringParams,
}

/// Result of a narrow-phase test between two bodies.
struct Overlap {
    /// Normal pointing from body `a` toward body `b`
    normal: Vec2,
    penetration: f32,
}

/// Built-in rigid-body-lite world implementing [`PhysicsBackend`].
#[derive(Default)]
pub struct ImpulseWorld {
    bodies: Vec<Body>,
    slings: Vec<Sling>,
    next_body_id: BodyId,
    next_sling_id: SlingId,
}

impl ImpulseWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Teleport a body (drag simulation in the demo and tests).
    pub fn set_position(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.iter_mut().find(|b| b.state.id == id) {
            body.state.pos = pos;
            body.state.vel = Vec2::ZERO;
        }
    }

    /// Set a body's velocity directly (scripted shots in tests).
    pub fn set_velocity(&mut self, id: BodyId, vel: Vec2) {
        if let Some(body) = self.bodies.iter_mut().find(|b| b.state.id == id) {
            body.state.vel = vel;
        }
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.state.id == id)
    }

    fn apply_springs(&mut self, dt: f32) {
        for sling in &self.slings {
            let Some(idx) = self.index_of(sling.body) else {
                continue;
            };
            let body = &mut self.bodies[idx];
            if body.inv_mass == 0.0 {
                continue;
            }
            let delta = body.state.pos - sling.anchor;
            let len = delta.length();
            if len <= sling.params.rest_length || len <= f32::EPSILON {
                continue;
            }
            // Position-based spring in the style of the original constraint:
            // pull the endpoint back by stiffness * stretch each step and
            // fold the correction into velocity.
            let dir = delta / len;
            let correction = -dir * (len - sling.params.rest_length) * sling.params.stiffness;
            body.state.pos += correction;
            body.state.vel += correction / dt;
            body.state.vel *= 1.0 - sling.params.damping;
        }
    }

    fn overlap(a: &Body, b: &Body) -> Option<Overlap> {
        match (a.state.shape, b.state.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                let delta = b.state.pos - a.state.pos;
                let dist = delta.length();
                let pen = ra + rb - dist;
                if pen <= 0.0 {
                    return None;
                }
                let normal = if dist > f32::EPSILON {
                    delta / dist
                } else {
                    Vec2::Y
                };
                Some(Overlap {
                    normal,
                    penetration: pen,
                })
            }
            (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
                let delta = b.state.pos - a.state.pos;
                let ox = ha.x + hb.x - delta.x.abs();
                let oy = ha.y + hb.y - delta.y.abs();
                if ox <= 0.0 || oy <= 0.0 {
                    return None;
                }
                // Separate along the axis of least penetration
                if ox < oy {
                    Some(Overlap {
                        normal: Vec2::new(delta.x.signum(), 0.0),
                        penetration: ox,
                    })
                } else {
                    Some(Overlap {
                        normal: Vec2::new(0.0, delta.y.signum()),
                        penetration: oy,
                    })
                }
            }
            (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
                Self::circle_rect(a.state.pos, radius, b.state.pos, half_extents)
            }
            (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
                Self::circle_rect(b.state.pos, radius, a.state.pos, half_extents).map(|o| Overlap {
                    normal: -o.normal,
                    penetration: o.penetration,
                })
            }
        }
    }

    /// Overlap between a circle and a rect, normal pointing circle → rect.
    fn circle_rect(c: Vec2, radius: f32, r: Vec2, half: Vec2) -> Option<Overlap> {
        let delta = r - c;
        let closest = Vec2::new(
            delta.x.clamp(-half.x, half.x),
            delta.y.clamp(-half.y, half.y),
        );
        // Vector from the closest point on the rect (in rect-local frame)
        // back toward the circle center
        let to_center = delta - closest;
        let dist = to_center.length();
        if dist > f32::EPSILON {
            // Circle center outside the rect
            if dist >= radius {
                return None;
            }
            Some(Overlap {
                normal: to_center / dist,
                penetration: radius - dist,
            })
        } else {
            // Center inside the rect: push out along the shallowest face
            let face = half - delta.abs();
            if face.x < face.y {
                Some(Overlap {
                    normal: Vec2::new(delta.x.signum(), 0.0),
                    penetration: radius + face.x,
                })
            } else {
                Some(Overlap {
                    normal: Vec2::new(0.0, delta.y.signum()),
                    penetration: radius + face.y,
                })
            }
        }
    }

    fn resolve_pairs(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                if a.inv_mass == 0.0 && b.inv_mass == 0.0 {
                    continue;
                }
                let Some(overlap) = Self::overlap(a, b) else {
                    continue;
                };
                let inv_sum = a.inv_mass + b.inv_mass;
                let n = overlap.normal;
                let rel = b.state.vel - a.state.vel;
                let vn = rel.dot(n);
                let mut impulse_per_step = 0.0;
                if vn < 0.0 {
                    let e = a.restitution.min(b.restitution);
                    let jn = -(1.0 + e) * vn / inv_sum;
                    a.state.vel -= n * (jn * a.inv_mass);
                    b.state.vel += n * (jn * b.inv_mass);

                    // Coulomb friction along the tangent, clamped by jn
                    let tangent = Vec2::new(-n.y, n.x);
                    let vt = (b.state.vel - a.state.vel).dot(tangent);
                    let mu = a.friction.max(b.friction);
                    let jt = (-vt / inv_sum).clamp(-jn * mu, jn * mu);
                    a.state.vel -= tangent * (jt * a.inv_mass);
                    b.state.vel += tangent * (jt * b.inv_mass);

                    // Report in per-step units so the classic thresholds apply
                    impulse_per_step = jn * dt;
                }

                // Positional correction to keep stacks from sinking
                const CORRECTION: f32 = 0.8;
                const SLOP: f32 = 0.5;
                let depth = (overlap.penetration - SLOP).max(0.0);
                let shift = n * (depth * CORRECTION / inv_sum);
                a.state.pos -= shift * a.inv_mass;
                b.state.pos += shift * b.inv_mass;

                contacts.push(Contact {
                    a: a.state.id,
                    b: b.state.id,
                    impulse: impulse_per_step,
                });
            }
        }
    }
}

impl PhysicsBackend for ImpulseWorld {
    fn add_body(&mut self, def: BodyDef) -> BodyId {
        let id = self.next_body_id;
        self.next_body_id += 1;
        self.bodies.push(Body::new(id, def));
        id
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.retain(|b| b.state.id != id);
    }

    fn attach_sling(&mut self, anchor: Vec2, body: BodyId, params: SpringParams) -> SlingId {
        let id = self.next_sling_id;
        self.next_sling_id += 1;
        self.slings.push(Sling {
            id,
            anchor,
            body,
            params,
        });
        id
    }

    fn remove_sling(&mut self, id: SlingId) {
        self.slings.retain(|s| s.id != id);
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.slings.clear();
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        for body in &mut self.bodies {
            if body.inv_mass > 0.0 {
                body.state.vel.y += GRAVITY * dt;
            }
        }
        self.apply_springs(dt);
        for body in &mut self.bodies {
            if body.inv_mass > 0.0 {
                body.state.pos += body.state.vel * dt;
            }
        }
        self.resolve_pairs(dt, contacts);
    }

    fn body(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.iter().find(|b| b.state.id == id).map(|b| &b.state)
    }

    fn bodies(&self) -> Box<dyn Iterator<Item = &BodyState> + '_> {
        Box::new(self.bodies.iter().map(|b| &b.state))
    }

    fn query_point(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .rev()
            .find(|b| b.contains(point))
            .map(|b| b.state.id)
    }
}
