//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Seeded RNG only
//! - Stable iteration order (collection order, then depth sort)
//! - Output only through the abstract `Surface`

pub mod collision;
pub mod entities;
pub mod particle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Body, Circle, CollisionResult, check_collision, push_out};
pub use entities::{Egg, Enemy, Larva, Obstacle};
pub use particle::{Particle, ParticleKind};
pub use player::Player;
pub use state::{Arena, EntityRef, GameEvent, GameState};
pub use tick::{Pointer, TickInput, tick};
