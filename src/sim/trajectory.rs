//! Aim-assist trajectory preview
//!
//! A simplified ballistic guess from the current pull, for drawing dotted
//! guide points while the bird is still on the sling. It is a heuristic
//! only and is never fed back into the physics backend.

use glam::Vec2;

/// Launch velocity per pixel of pull.
pub const LAUNCH_SCALE: f32 = 0.15;

/// Downward acceleration per preview step.
pub const PREVIEW_GRAVITY: f32 = 1.0;

/// Number of preview points produced.
pub const PREVIEW_POINTS: usize = 15;

/// Lazily yields the preview points for the current bird/anchor positions.
///
/// Initial velocity is proportional to the pull vector (anchor − bird);
/// each point advances by the running velocity, then gravity bends the
/// velocity down.
pub fn preview(bird: Vec2, anchor: Vec2) -> impl Iterator<Item = Vec2> {
    let v0 = (anchor - bird) * LAUNCH_SCALE;
    std::iter::successors(Some((bird + v0, v0)), |&(pos, vel)| {
        let vel = vel + Vec2::new(0.0, PREVIEW_GRAVITY);
        Some((pos + vel, vel))
    })
    .map(|(pos, _)| pos)
    .take(PREVIEW_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_finite() {
        let points: Vec<Vec2> = preview(Vec2::new(100.0, 400.0), Vec2::new(200.0, 380.0)).collect();
        assert_eq!(points.len(), PREVIEW_POINTS);
    }

    #[test]
    fn test_preview_arcs_away_from_pull() {
        // Bird pulled down-left of the anchor: points head up-right at
        // first, then gravity wins and they come back down.
        let bird = Vec2::new(100.0, 450.0);
        let anchor = Vec2::new(200.0, 400.0);
        let points: Vec<Vec2> = preview(bird, anchor).collect();
        assert!(points[0].x > bird.x);
        assert!(points[0].y < bird.y);
        assert!(points.last().unwrap().x > points[0].x);
        // Gravity adds 1 px/step to vy; by the last step the arc is falling
        assert!(points[PREVIEW_POINTS - 1].y > points[PREVIEW_POINTS - 2].y);
    }

    #[test]
    fn test_zero_pull_drops_straight_down() {
        let p = Vec2::new(150.0, 300.0);
        let points: Vec<Vec2> = preview(p, p).collect();
        for w in points.windows(2) {
            assert_eq!(w[0].x, w[1].x);
            assert!(w[1].y > w[0].y);
        }
    }
}
