//! Game state and core simulation types
//!
//! `GameState` owns every entity collection plus the timers and counters the
//! frame loop advances. Nothing here touches a platform API.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Egg, Enemy, Larva, Obstacle};
use super::particle::{Particle, ParticleKind};
use super::player::Player;
use crate::Settings;
use crate::consts::*;

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Safe zone below the top edge
    pub top_margin: f32,
}

impl From<&Settings> for Arena {
    fn from(settings: &Settings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            top_margin: settings.top_margin,
        }
    }
}

/// Lifecycle events an entity update reports back to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// An egg hatched; a larva appears here
    Hatched { at: Vec2 },
    /// A larva reached the safe zone
    Rescued { at: Vec2 },
    /// A larva was caught by a toad
    Eaten { at: Vec2 },
}

/// Handle to one live entity, valid until the next compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Player,
    Egg(usize),
    Obstacle(usize),
    Enemy(usize),
    Larva(usize),
    Particle(usize),
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub arena: Arena,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub eggs: Vec<Egg>,
    pub hatchlings: Vec<Larva>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,

    /// Larvae rescued
    pub score: u32,
    /// Larvae eaten
    pub lost_hatchlings: u32,
    /// Show hitboxes, timers and the loss counter
    pub debug: bool,

    /// Time since the last rendered frame (ms)
    pub frame_timer: f32,
    /// Time since the last egg spawn (ms)
    pub egg_timer: f32,
}

impl GameState {
    /// Create a world with only the player in it; call `init` to populate
    pub fn new(settings: Settings, seed: u64) -> Self {
        let arena = Arena::from(&settings);
        Self {
            player: Player::new(&arena),
            debug: settings.debug,
            settings,
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            obstacles: Vec::new(),
            eggs: Vec::new(),
            hatchlings: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lost_hatchlings: 0,
            frame_timer: 0.0,
            egg_timer: 0.0,
        }
    }

    /// Spawn the enemy pool and lay out the obstacles
    pub fn init(&mut self) {
        for _ in 0..self.settings.enemy_count {
            self.add_enemy();
        }
        let attempts = self.place_obstacles();
        log::info!(
            "Meadow ready: {}/{} obstacles in {} attempts, {} toads",
            self.obstacles.len(),
            self.settings.obstacle_count,
            attempts,
            self.enemies.len()
        );
    }

    /// Rejection-sample obstacles until the requested count or the attempt cap
    ///
    /// Returns the number of candidates tried.
    pub fn place_obstacles(&mut self) -> u32 {
        let mut attempts = 0;
        while self.obstacles.len() < self.settings.obstacle_count
            && attempts < OBSTACLE_MAX_ATTEMPTS
        {
            let candidate = Obstacle::random(&self.arena, &mut self.rng);
            let crowded = self.obstacles.iter().any(|o| o.crowds(&candidate));
            if !crowded && candidate.fits(&self.arena) {
                self.obstacles.push(candidate);
            }
            attempts += 1;
        }
        if self.obstacles.len() < self.settings.obstacle_count {
            log::warn!(
                "Placed only {} of {} obstacles",
                self.obstacles.len(),
                self.settings.obstacle_count
            );
        }
        attempts
    }

    pub fn add_egg(&mut self) {
        let egg = Egg::random(&self.arena, &mut self.rng);
        self.eggs.push(egg);
    }

    pub fn add_enemy(&mut self) {
        let enemy = Enemy::spawn(&self.arena, &mut self.rng);
        self.enemies.push(enemy);
    }

    /// Emit `count` particles of one kind at `at`
    pub fn emit_particles(&mut self, kind: ParticleKind, at: Vec2, count: usize) {
        for _ in 0..count {
            let particle = Particle::new(kind, at, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Apply the world-level consequences of an entity's update
    pub fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Hatched { at } => {
                let larva = Larva::hatch(at, &mut self.rng);
                self.hatchlings.push(larva);
            }
            GameEvent::Rescued { at } => {
                self.score += 1;
                self.emit_particles(ParticleKind::Firefly, at, FIREFLIES_PER_RESCUE);
                log::debug!("Hatchling rescued (score {})", self.score);
            }
            GameEvent::Eaten { at } => {
                self.lost_hatchlings += 1;
                self.emit_particles(ParticleKind::Spark, at, SPARKS_PER_LOSS);
                log::debug!("Hatchling eaten (lost {})", self.lost_hatchlings);
            }
        }
    }

    /// Drop every egg, larva and particle marked for deletion
    ///
    /// Obstacles are permanent and enemies are recycled, so neither is touched.
    pub fn remove_game_objects(&mut self) {
        self.eggs.retain(|e| !e.marked_for_deletion);
        self.hatchlings.retain(|l| !l.marked_for_deletion);
        self.particles.retain(|p| !p.marked_for_deletion);
    }

    /// Vertical position used as the depth key
    pub fn depth_of(&self, entity: EntityRef) -> f32 {
        match entity {
            EntityRef::Player => self.player.pos.y,
            EntityRef::Egg(i) => self.eggs[i].pos.y,
            EntityRef::Obstacle(i) => self.obstacles[i].pos.y,
            EntityRef::Enemy(i) => self.enemies[i].pos.y,
            EntityRef::Larva(i) => self.hatchlings[i].pos.y,
            EntityRef::Particle(i) => self.particles[i].pos.y,
        }
    }

    /// Every live entity, back to front (ascending vertical position)
    ///
    /// Entities at equal depth keep collection order: player, eggs,
    /// obstacles, enemies, larvae, particles.
    pub fn draw_order(&self) -> Vec<EntityRef> {
        let mut order = Vec::with_capacity(
            1 + self.eggs.len()
                + self.obstacles.len()
                + self.enemies.len()
                + self.hatchlings.len()
                + self.particles.len(),
        );
        order.push(EntityRef::Player);
        order.extend((0..self.eggs.len()).map(EntityRef::Egg));
        order.extend((0..self.obstacles.len()).map(EntityRef::Obstacle));
        order.extend((0..self.enemies.len()).map(EntityRef::Enemy));
        order.extend((0..self.hatchlings.len()).map(EntityRef::Larva));
        order.extend((0..self.particles.len()).map(EntityRef::Particle));

        order.sort_by(|a, b| self.depth_of(*a).total_cmp(&self.depth_of(*b)));
        order
    }
}
