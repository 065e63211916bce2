//! Per-frame simulation tick
//!
//! The host calls `tick` once per display refresh with the elapsed time. A
//! frame is only drawn and simulated once enough time has built up to honor
//! the FPS cap; egg spawning runs on its own timer every call.

use glam::Vec2;

use super::collision::Body;
use super::entities::blockers;
use super::state::{EntityRef, GameState};
use crate::renderer::{DrawCommand, Surface, TextAlign};

/// Pointer (mouse) state as seen by the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
    pub pressed: bool,
}

impl Pointer {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            pressed: false,
        }
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pos = pos;
        self.pressed = true;
    }

    pub fn release(&mut self, pos: Vec2) {
        self.pos = pos;
        self.pressed = false;
    }

    /// Drag: the target only follows the pointer while a button is held
    pub fn move_to(&mut self, pos: Vec2) {
        if self.pressed {
            self.pos = pos;
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    pub pointer: Pointer,
    /// Flip debug overlays (one-shot; set after an odd number of presses)
    pub toggle_debug: bool,
}

impl TickInput {
    /// Pointer resting at the middle of the playfield
    pub fn centered(state: &GameState) -> Self {
        Self {
            pointer: Pointer::new(Vec2::new(state.arena.width * 0.5, state.arena.height * 0.5)),
            toggle_debug: false,
        }
    }
}

/// Advance the world by `dt` milliseconds
///
/// Returns `true` if a frame was drawn to `surface`.
pub fn tick(state: &mut GameState, input: &TickInput, surface: &mut dyn Surface, dt: f32) -> bool {
    if input.toggle_debug {
        state.debug = !state.debug;
        log::info!("Debug mode: {}", state.debug);
    }

    state.frame_timer += dt;
    let rendered = state.frame_timer > state.settings.frame_interval_ms();
    if rendered {
        let elapsed = state.frame_timer;
        surface.submit(DrawCommand::Clear {
            width: state.arena.width,
            height: state.arena.height,
        });
        run_frame(state, input.pointer.pos, surface, elapsed);
        draw_hud(state, surface);
        state.frame_timer = 0.0;
    }

    if state.egg_timer > state.settings.egg_interval_ms
        && state.eggs.len() < state.settings.max_eggs
    {
        state.add_egg();
        state.egg_timer = 0.0;
    } else {
        state.egg_timer += dt;
    }

    rendered
}

/// Draw then update every entity back to front, then compact
///
/// Entities created during the pass join the next frame.
fn run_frame(state: &mut GameState, target: Vec2, surface: &mut dyn Surface, elapsed: f32) {
    for entity in state.draw_order() {
        draw_entity(state, entity, surface);
        update_entity(state, entity, target, elapsed);
    }
    state.remove_game_objects();
}

fn draw_entity(state: &GameState, entity: EntityRef, surface: &mut dyn Surface) {
    let debug = state.debug;
    match entity {
        EntityRef::Player => state.player.draw(surface, debug),
        EntityRef::Egg(i) => state.eggs[i].draw(surface, debug),
        EntityRef::Obstacle(i) => state.obstacles[i].draw(surface, debug),
        EntityRef::Enemy(i) => state.enemies[i].draw(surface, debug),
        EntityRef::Larva(i) => state.hatchlings[i].draw(surface, debug),
        EntityRef::Particle(i) => state.particles[i].draw(surface),
    }
}

fn update_entity(state: &mut GameState, entity: EntityRef, target: Vec2, elapsed: f32) {
    let top_margin = state.arena.top_margin;
    let event = match entity {
        EntityRef::Player => {
            state.player.update(target, &state.arena, &state.obstacles);
            None
        }
        EntityRef::Egg(i) => {
            let egg = &mut state.eggs[i];
            if egg.marked_for_deletion {
                return;
            }
            let others = blockers(&state.player, &state.obstacles)
                .chain(state.enemies.iter().map(|e| e as &dyn Body));
            egg.update(elapsed, top_margin, others)
        }
        // Obstacles never move
        EntityRef::Obstacle(_) => None,
        EntityRef::Enemy(i) => {
            let others = blockers(&state.player, &state.obstacles);
            state.enemies[i].update(&state.arena, &mut state.rng, others);
            None
        }
        EntityRef::Larva(i) => {
            let larva = &mut state.hatchlings[i];
            if larva.marked_for_deletion {
                return;
            }
            let others = blockers(&state.player, &state.obstacles);
            larva.update(top_margin, others, &state.enemies)
        }
        EntityRef::Particle(i) => {
            let particle = &mut state.particles[i];
            if !particle.marked_for_deletion {
                particle.update();
            }
            None
        }
    };

    if let Some(event) = event {
        state.apply_event(event);
    }
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface) {
    surface.submit(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(25.0, 50.0),
        align: TextAlign::Left,
    });
    if state.debug {
        surface.submit(DrawCommand::Text {
            text: format!("Lost Hatchlings: {}", state.lost_hatchlings),
            pos: Vec2::new(25.0, 100.0),
            align: TextAlign::Left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::renderer::{DrawList, SpriteSheet};
    use crate::sim::collision::check_collision;
    use crate::sim::entities::{Egg, Enemy, Larva, Obstacle};
    use crate::sim::particle::ParticleKind;

    /// Comfortably above the 70 FPS frame interval
    const FRAME_MS: f32 = 20.0;

    fn state() -> GameState {
        GameState::new(Settings::default(), 4242)
    }

    #[test]
    fn test_pointer_drag_semantics() {
        let mut p = Pointer::new(Vec2::ZERO);
        p.move_to(Vec2::new(5.0, 5.0));
        assert_eq!(p.pos, Vec2::ZERO);
        p.press(Vec2::new(1.0, 1.0));
        p.move_to(Vec2::new(9.0, 9.0));
        assert_eq!(p.pos, Vec2::new(9.0, 9.0));
        p.release(Vec2::new(10.0, 10.0));
        assert!(!p.pressed);
        p.move_to(Vec2::new(50.0, 50.0));
        assert_eq!(p.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_frame_throttle() {
        let mut s = state();
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        // 10ms is below the 1000/70 ms interval
        assert!(!tick(&mut s, &input, &mut list, 10.0));
        assert!(list.is_empty());
        // Accumulated 20ms crosses it
        assert!(tick(&mut s, &input, &mut list, 10.0));
        assert_eq!(s.frame_timer, 0.0);
        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
        assert_eq!(list.texts().last(), Some("Score: 0"));
    }

    #[test]
    fn test_egg_cadence_and_capacity() {
        let mut s = state();
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        // Timer must strictly exceed the interval before an egg appears
        for _ in 0..51 {
            tick(&mut s, &input, &mut list, FRAME_MS);
        }
        assert!(s.eggs.is_empty());
        tick(&mut s, &input, &mut list, FRAME_MS);
        assert_eq!(s.eggs.len(), 1);
        assert_eq!(s.egg_timer, 0.0);

        // At capacity the timer keeps running but nothing spawns
        s.settings.max_eggs = 1;
        for _ in 0..200 {
            tick(&mut s, &input, &mut list, FRAME_MS);
        }
        assert_eq!(s.eggs.len(), 1);
        assert!(s.egg_timer > s.settings.egg_interval_ms);
    }

    #[test]
    fn test_egg_hatches_after_interval() {
        let mut s = state();
        s.settings.max_eggs = 0;
        let at = Vec2::new(200.0, 600.0);
        s.eggs.push(Egg::at(at));
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        // Hatch timer accumulates frame time; 10000ms takes 500 frames
        for _ in 0..500 {
            tick(&mut s, &input, &mut list, FRAME_MS);
        }
        assert_eq!(s.eggs.len(), 1);
        assert!(s.hatchlings.is_empty());

        tick(&mut s, &input, &mut list, FRAME_MS);
        tick(&mut s, &input, &mut list, FRAME_MS);
        assert!(s.eggs.is_empty());
        assert_eq!(s.hatchlings.len(), 1);
        assert_eq!(s.hatchlings[0].pos, at);
    }

    #[test]
    fn test_larva_rescue_scores_and_emits_fireflies() {
        let mut s = state();
        s.settings.max_eggs = 0;
        s.hatchlings
            .push(Larva::new(Vec2::new(100.0, TOP_MARGIN + 0.5), 1.0, 0));
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        assert!(tick(&mut s, &input, &mut list, FRAME_MS));
        assert_eq!(s.score, 1);
        assert!(s.hatchlings.is_empty());
        assert_eq!(s.particles.len(), FIREFLIES_PER_RESCUE);
        assert!(s.particles.iter().all(|p| p.kind == ParticleKind::Firefly));

        list.clear();
        tick(&mut s, &input, &mut list, FRAME_MS);
        assert_eq!(list.texts().last(), Some("Score: 1"));
    }

    #[test]
    fn test_larva_eaten_counts_loss_once() {
        let mut s = state();
        s.settings.max_eggs = 0;
        let at = Vec2::new(100.0, 500.0);
        s.hatchlings.push(Larva::new(at, 1.0, 0));
        s.enemies.push(Enemy::new(at + Vec2::new(10.0, -1.0), 0.0));
        s.enemies.push(Enemy::new(at + Vec2::new(-10.0, -1.0), 0.0));
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        tick(&mut s, &input, &mut list, FRAME_MS);
        assert_eq!(s.lost_hatchlings, 1);
        assert_eq!(s.score, 0);
        assert!(s.hatchlings.is_empty());
        assert_eq!(s.particles.len(), SPARKS_PER_LOSS);
        assert!(s.particles.iter().all(|p| p.kind == ParticleKind::Spark));
    }

    #[test]
    fn test_frame_visits_entities_back_to_front() {
        let mut s = state();
        s.settings.max_eggs = 0;
        s.player.pos = Vec2::new(640.0, 300.0);
        s.eggs.push(Egg::at(Vec2::new(100.0, 500.0)));
        s.obstacles
            .push(Obstacle::at(Vec2::new(1000.0, 100.0), 0, 0));
        let mut input = TickInput::centered(&s);
        input.pointer.pos = s.player.pos;
        let mut list = DrawList::new();

        tick(&mut s, &input, &mut list, FRAME_MS);
        let sheets: Vec<_> = list.sprites().map(|(sheet, _, _)| sheet).collect();
        assert_eq!(
            sheets,
            vec![SpriteSheet::Obstacles, SpriteSheet::Bull, SpriteSheet::Egg]
        );
    }

    #[test]
    fn test_egg_shoved_by_toad() {
        let mut s = state();
        s.settings.max_eggs = 0;
        s.eggs.push(Egg::at(Vec2::new(200.0, 600.0)));
        s.enemies.push(Enemy::new(Vec2::new(230.0, 600.0), 0.0));
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();

        assert!(tick(&mut s, &input, &mut list, FRAME_MS));
        assert_eq!(s.eggs[0].pos, Vec2::new(159.0, 600.0));
        assert!(!check_collision(&s.eggs[0], &s.enemies[0]).hit);
    }

    #[test]
    fn test_enemy_pool_is_stable() {
        let mut s = state();
        s.init();
        let input = TickInput::centered(&s);
        let mut list = DrawList::new();
        for _ in 0..2000 {
            list.clear();
            tick(&mut s, &input, &mut list, FRAME_MS);
        }
        assert_eq!(s.enemies.len(), 3);
        for enemy in &s.enemies {
            assert!(enemy.sprite_rect().right() >= 0.0);
        }
    }

    #[test]
    fn test_debug_toggle_shows_overlays() {
        let mut s = state();
        let mut input = TickInput::centered(&s);
        input.toggle_debug = true;
        let mut list = DrawList::new();

        tick(&mut s, &input, &mut list, FRAME_MS);
        assert!(s.debug);
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Lost Hatchlings: 0"));
        assert!(
            list.commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );

        input.toggle_debug = true;
        list.clear();
        tick(&mut s, &input, &mut list, FRAME_MS);
        assert!(!s.debug);
        assert!(!list.texts().any(|t| t.starts_with("Lost")));
    }

    #[test]
    fn test_player_chases_pointer_across_frames() {
        let mut s = state();
        let mut input = TickInput::centered(&s);
        input.pointer.press(Vec2::new(1000.0, 360.0));
        let mut list = DrawList::new();
        let start = s.player.pos;
        for _ in 0..10 {
            tick(&mut s, &input, &mut list, FRAME_MS);
        }
        assert!((s.player.pos.x - (start.x + 10.0 * PLAYER_SPEED)).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = state();
        let mut b = state();
        a.init();
        b.init();
        let mut input = TickInput::centered(&a);
        input.pointer.press(Vec2::new(200.0, 600.0));
        let mut list = DrawList::new();
        for _ in 0..600 {
            tick(&mut a, &input, &mut list, FRAME_MS);
            tick(&mut b, &input, &mut list, FRAME_MS);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lost_hatchlings, b.lost_hatchlings);
        assert_eq!(a.eggs.len(), b.eggs.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
