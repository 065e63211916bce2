//! The bull, steered by the pointer

use glam::Vec2;

use super::collision::{Body, push_out_all};
use super::entities::Obstacle;
use super::state::Arena;
use crate::consts::*;
use crate::renderer::{CircleStyle, DrawCommand, Rect, SpriteSheet, Surface};
use crate::{facing_row, seek_velocity};

/// The player avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Last velocity applied (pixels per frame)
    pub vel: Vec2,
    /// Pointer position it is chasing
    pub target: Vec2,
    /// Sprite-sheet row for the current heading
    pub facing: u32,
}

impl Player {
    /// Start in the middle of the arena
    pub fn new(arena: &Arena) -> Self {
        let center = Vec2::new(arena.width * 0.5, arena.height * 0.5);
        Self {
            pos: center,
            vel: Vec2::ZERO,
            target: center,
            facing: 0,
        }
    }

    /// Destination rectangle of the sprite; the bull stands above its hitbox
    pub fn sprite_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - PLAYER_SPRITE_SIZE * 0.5,
            self.pos.y - PLAYER_SPRITE_SIZE * 0.5 - PLAYER_SPRITE_LIFT,
            PLAYER_SPRITE_SIZE,
            PLAYER_SPRITE_SIZE,
        )
    }

    /// Chase `target`, stay inside the arena, then step out of obstacles
    pub fn update(&mut self, target: Vec2, arena: &Arena, obstacles: &[Obstacle]) {
        self.target = target;
        let delta = target - self.pos;
        self.facing = facing_row(delta.y.atan2(delta.x));
        self.vel = seek_velocity(delta, PLAYER_SPEED);
        self.pos += self.vel;

        self.pos.x = self.pos.x.clamp(PLAYER_RADIUS, arena.width - PLAYER_RADIUS);
        self.pos.y = self
            .pos
            .y
            .clamp(arena.top_margin + PLAYER_RADIUS, arena.height - PLAYER_RADIUS);

        self.pos = push_out_all(
            self.pos,
            PLAYER_RADIUS,
            obstacles.iter().map(|o| o as &dyn Body),
        );
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.submit(DrawCommand::Sprite {
            sheet: SpriteSheet::Bull,
            src: Rect::cell(0, self.facing, PLAYER_SPRITE_SIZE, PLAYER_SPRITE_SIZE),
            dst: self.sprite_rect(),
        });

        if debug {
            surface.submit(DrawCommand::Circle {
                center: self.pos,
                radius: PLAYER_RADIUS,
                style: CircleStyle::Hitbox,
            });
            surface.submit(DrawCommand::Line {
                from: self.pos,
                to: self.target,
            });
        }
    }
}

impl Body for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        PLAYER_RADIUS
    }
}
