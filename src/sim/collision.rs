//! Collision primitives shared by the engines
//!
//! - axis-aligned boxes with minimum-penetration resolution (bricks, obstacles)
//! - point-target hit testing for reticle/snip games

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis along which a collision should be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Hit a left/right face: reflect x velocity
    Horizontal,
    /// Hit a top/bottom face: reflect y velocity
    Vertical,
}

/// Result of a penetration test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub axis: Axis,
    /// Overlap depth along `axis`
    pub depth: f32,
    /// Sign to push the mover out along `axis` (-1 toward min side, +1 toward max side)
    pub push: f32,
}

/// Axis-aligned box, `x`/`y` at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of size `w`×`h` centered on (`cx`, `cy`)
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Square bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::centered(center.x, center.y, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap of the horizontal spans only
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.x < right && self.right() > left
    }

    /// Penetration of `mover` into `self`
    ///
    /// All four face overlaps are measured and the smallest one decides the
    /// axis, so a ball clipping a brick corner from the side bounces sideways
    /// instead of always flipping vertically.
    pub fn penetration(&self, mover: &Aabb) -> Option<Penetration> {
        if !self.overlaps(mover) {
            return None;
        }
        let from_left = mover.right() - self.x;
        let from_right = self.right() - mover.x;
        let from_top = mover.bottom() - self.y;
        let from_bottom = self.bottom() - mover.y;

        let candidates = [
            (from_left, Axis::Horizontal, -1.0),
            (from_right, Axis::Horizontal, 1.0),
            (from_top, Axis::Vertical, -1.0),
            (from_bottom, Axis::Vertical, 1.0),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(depth, axis, push)| Penetration { axis, depth, push })
    }
}

/// Resolve one point-target action
///
/// `candidates` yields `(index, center, hit_radius, priority)`. Among those whose
/// center lies within `hit_radius` of `aim`, the one with the highest priority
/// wins; ties go to the earlier index. Exactly zero or one target is returned.
pub fn pick_target<I>(aim: Vec2, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Vec2, f32, f32)>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, center, radius, priority) in candidates {
        if aim.distance(center) > radius {
            continue;
        }
        match best {
            Some((_, p)) if p >= priority => {}
            _ => best = Some((index, priority)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_penetration_picks_min_axis() {
        let brick = Aabb::new(100.0, 100.0, 52.0, 18.0);
        // Ball box pokes 2px into the left face, 8px into the top
        let ball = Aabb::new(90.0, 90.0, 12.0, 18.0);
        let pen = brick.penetration(&ball).unwrap();
        assert_eq!(pen.axis, Axis::Horizontal);
        assert_eq!(pen.push, -1.0);
        assert!((pen.depth - 2.0).abs() < 1e-5);

        // Ball box coming up through the bottom face
        let ball = Aabb::new(120.0, 114.0, 12.0, 12.0);
        let pen = brick.penetration(&ball).unwrap();
        assert_eq!(pen.axis, Axis::Vertical);
        assert_eq!(pen.push, 1.0);
    }

    #[test]
    fn test_pick_target_highest_priority_within_radius() {
        let aim = Vec2::new(100.0, 100.0);
        let picked = pick_target(
            aim,
            [
                (0, Vec2::new(105.0, 100.0), 20.0, 0.5),
                (1, Vec2::new(110.0, 100.0), 20.0, 0.9),
                (2, Vec2::new(300.0, 100.0), 20.0, 5.0),
            ],
        );
        assert_eq!(picked, Some(1));
        assert_eq!(pick_target(aim, [(0, Vec2::ZERO, 10.0, 1.0)]), None);
    }
}
