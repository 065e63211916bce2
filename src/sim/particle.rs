//! Cosmetic particles emitted when a larva is rescued or eaten

use glam::Vec2;
use rand::Rng;

use crate::consts::{SPARK_MIN_RADIUS, SPARK_SHRINK};
use crate::renderer::{CircleStyle, DrawCommand, Surface};

/// Particle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Scatters in a slow spiral and shrinks away (larva eaten)
    Spark,
    /// Drifts upward with a sideways wobble until off screen (larva rescued)
    Firefly,
}

impl ParticleKind {
    /// CSS fill color
    pub fn color(&self) -> &'static str {
        match self {
            ParticleKind::Spark => "red",
            ParticleKind::Firefly => "yellow",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    /// Phase of the wobble (radians)
    pub angle: f32,
    /// Phase advance per frame
    pub angular_vel: f32,
    /// Per-axis speed (pixels per frame)
    pub vel: Vec2,
    pub radius: f32,
    pub marked_for_deletion: bool,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(kind: ParticleKind, pos: Vec2, rng: &mut R) -> Self {
        Self {
            kind,
            pos,
            angle: 0.0,
            angular_vel: rng.random::<f32>() * 0.1 + 0.01,
            vel: Vec2::new(
                rng.random::<f32>() * 6.0 - 3.0,
                rng.random::<f32>() * 2.0 + 0.5,
            ),
            radius: (rng.random::<f32>() * 10.0 + 5.0).floor(),
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        match self.kind {
            ParticleKind::Spark => {
                self.angle += self.angular_vel * 0.5;
                self.pos.x -= self.angle.cos() * self.vel.x;
                self.pos.y -= self.angle.sin() * self.vel.y;
                if self.radius > 0.1 {
                    self.radius -= SPARK_SHRINK;
                }
                if self.radius < SPARK_MIN_RADIUS {
                    self.marked_for_deletion = true;
                }
            }
            ParticleKind::Firefly => {
                self.angle += self.angular_vel;
                self.pos.x += self.angle.cos() * self.vel.x;
                self.pos.y -= self.vel.y;
                if self.pos.y < -self.radius {
                    self.marked_for_deletion = true;
                }
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.submit(DrawCommand::Circle {
            center: self.pos,
            radius: self.radius,
            style: CircleStyle::Solid(self.kind.color()),
        });
    }
}
