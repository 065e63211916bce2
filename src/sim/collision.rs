//! Circle-circle collision detection and positional correction
//!
//! Every entity has a circular hitbox. Overlaps are resolved by moving the
//! mover out along the line between centers; nothing carries momentum.

use glam::Vec2;

/// Anything with a circular hitbox
pub trait Body {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// A bare hitbox, used for a mover part-way through its update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Body for Circle {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the hitboxes overlap
    pub hit: bool,
    /// Distance between centers
    pub distance: f32,
    /// Sum of both radii
    pub radius_sum: f32,
    /// `a.center - b.center`
    pub delta: Vec2,
}

/// Check two hitboxes for overlap
///
/// Touching circles (`distance == radius_sum`) do not collide.
pub fn check_collision<A, B>(a: &A, b: &B) -> CollisionResult
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    let delta = a.center() - b.center();
    let distance = delta.y.hypot(delta.x);
    let radius_sum = a.radius() + b.radius();
    CollisionResult {
        hit: distance < radius_sum,
        distance,
        radius_sum,
        delta,
    }
}

/// Where a mover ends up after being pushed out of `other`
///
/// Lands one pixel beyond contact along the line from `other`'s center. A
/// mover sitting exactly on `other`'s center is pushed straight down.
pub fn push_out<B: Body + ?Sized>(mover: Circle, other: &B) -> Vec2 {
    let result = check_collision(&mover, other);
    if !result.hit {
        return mover.center;
    }
    let normal = if result.distance > 0.0 {
        result.delta / result.distance
    } else {
        Vec2::Y
    };
    other.center() + normal * (result.radius_sum + 1.0)
}

/// Resolve a mover against each blocker in turn
pub fn push_out_all<'a, I>(mut center: Vec2, radius: f32, blockers: I) -> Vec2
where
    I: IntoIterator<Item = &'a dyn Body>,
{
    for other in blockers {
        center = push_out(Circle::new(center, radius), other);
    }
    center
}
