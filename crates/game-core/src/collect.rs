//! Flight of a caught target from the hook to the keep position.

use common::Vec2;

/// Point on the quadratic Bézier `p0 -> p1 -> p2` at `t`.
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    a.lerp(b, t)
}

/// Pose of the target at one point of the motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame {
    pub position: Vec2,
    pub scale: f32,
    pub done: bool,
}

/// Deterministic, time-parameterised collect motion.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectMotion {
    start: Vec2,
    control: Vec2,
    end: Vec2,
    duration: f32,
    elapsed: f32,
}

impl CollectMotion {
    /// Arc from `start` to `end` peaking `arc_height` above `start`.
    ///
    /// `duration` must be positive; the rig config guarantees it.
    pub fn new(start: Vec2, end: Vec2, arc_height: f32, duration: f32) -> Self {
        Self {
            start,
            control: start + Vec2::new(0.0, arc_height),
            end,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, dt: f32) -> MotionFrame {
        self.elapsed += dt.max(0.0);
        self.frame()
    }

    pub fn frame(&self) -> MotionFrame {
        let t = self.progress();
        MotionFrame {
            position: quadratic_bezier(self.start, self.control, self.end, t),
            scale: 1.0 - t,
            done: t >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_endpoints() {
        let p0 = Vec2::new(0.0, -3.0);
        let p1 = Vec2::new(0.0, -1.0);
        let p2 = Vec2::new(-4.0, 2.0);
        assert_eq!(quadratic_bezier(p0, p1, p2, 0.0), p0);
        assert_eq!(quadratic_bezier(p0, p1, p2, 1.0), p2);
    }

    #[test]
    fn motion_shrinks_and_finishes() {
        let mut motion = CollectMotion::new(Vec2::new(0.0, -3.0), Vec2::new(-4.0, 2.0), 2.0, 0.8);
        let half = motion.advance(0.4);
        assert!(!half.done);
        assert!((half.scale - 0.5).abs() < 1e-5);
        assert!((half.position - Vec2::new(-1.0, -0.75)).length() < 1e-5);
        let end = motion.advance(0.4);
        assert!(end.done);
        assert_eq!(end.scale, 0.0);
        assert_eq!(end.position, Vec2::new(-4.0, 2.0));
    }

    #[test]
    fn frames_are_reproducible() {
        let make = || {
            let mut m = CollectMotion::new(Vec2::ZERO, Vec2::new(3.0, 1.0), 2.0, 1.0);
            (0..7).map(|_| m.advance(0.13)).collect::<Vec<_>>()
        };
        assert_eq!(make(), make());
    }
}
