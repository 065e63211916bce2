//! Meadow inhabitants: obstacles, eggs, larvae and toads
//!
//! Each type owns its own movement and hitbox response. Side effects on the
//! world (new larvae, score, particles) are reported back as `GameEvent`s.

use glam::Vec2;
use rand::Rng;

use super::collision::{Body, check_collision, push_out_all};
use super::player::Player;
use super::state::{Arena, GameEvent};
use crate::consts::*;
use crate::renderer::{CircleStyle, DrawCommand, Rect, SpriteSheet, Surface, TextAlign};

fn draw_hitbox(surface: &mut dyn Surface, center: Vec2, radius: f32) {
    surface.submit(DrawCommand::Circle {
        center,
        radius,
        style: CircleStyle::Hitbox,
    });
}

/// A static rock or mushroom
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Cell on the 4x3 obstacle sheet
    pub frame: (u32, u32),
}

impl Obstacle {
    pub fn at(pos: Vec2, col: u32, row: u32) -> Self {
        Self {
            pos,
            frame: (col, row),
        }
    }

    /// Random sheet cell anywhere on the surface (placement filters later)
    pub fn random<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Self {
        let col = rng.random_range(0..OBSTACLE_SHEET_COLUMNS);
        let row = rng.random_range(0..OBSTACLE_SHEET_ROWS);
        let pos = Vec2::new(
            rng.random::<f32>() * arena.width,
            rng.random::<f32>() * arena.height,
        );
        Self::at(pos, col, row)
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - OBSTACLE_SPRITE_SIZE * 0.5,
            self.pos.y - OBSTACLE_SPRITE_SIZE * 0.5 - OBSTACLE_SPRITE_LIFT,
            OBSTACLE_SPRITE_SIZE,
            OBSTACLE_SPRITE_SIZE,
        )
    }

    /// Sprite fully on screen and hitbox clear of the safe zone and bottom edge
    pub fn fits(&self, arena: &Arena) -> bool {
        let margin = OBSTACLE_RADIUS * 3.0;
        let sprite = self.sprite_rect();
        sprite.x > 0.0
            && sprite.x < arena.width - sprite.w
            && self.pos.y > arena.top_margin + margin
            && self.pos.y < arena.height - margin
    }

    /// Whether `other` sits within the spacing buffer of this obstacle
    pub fn crowds(&self, other: &Obstacle) -> bool {
        let result = check_collision(self, other);
        result.distance < result.radius_sum + OBSTACLE_BUFFER
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.submit(DrawCommand::Sprite {
            sheet: SpriteSheet::Obstacles,
            src: Rect::cell(
                self.frame.0,
                self.frame.1,
                OBSTACLE_SPRITE_SIZE,
                OBSTACLE_SPRITE_SIZE,
            ),
            dst: self.sprite_rect(),
        });
        if debug {
            draw_hitbox(surface, self.pos, OBSTACLE_RADIUS);
        }
    }
}

impl Body for Obstacle {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        OBSTACLE_RADIUS
    }
}

/// An egg waiting to hatch; gets shoved around by everything
#[derive(Debug, Clone)]
pub struct Egg {
    pub pos: Vec2,
    /// Time spent incubating (ms)
    pub hatch_timer: f32,
    pub marked_for_deletion: bool,
}

impl Egg {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            hatch_timer: 0.0,
            marked_for_deletion: false,
        }
    }

    /// Random spot in the lower play area
    pub fn random<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Self {
        let margin = EGG_RADIUS * 2.0;
        let x = rng.random::<f32>() * (arena.width - margin * 2.0);
        let y = arena.top_margin
            + rng.random::<f32>() * (arena.height - arena.top_margin - margin);
        Self::at(Vec2::new(x, y))
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - EGG_SPRITE_WIDTH * 0.5,
            self.pos.y - EGG_SPRITE_HEIGHT * 0.5 - EGG_SPRITE_LIFT,
            EGG_SPRITE_WIDTH,
            EGG_SPRITE_HEIGHT,
        )
    }

    /// Get pushed by `blockers`, then incubate or hatch
    ///
    /// Hatches once the timer passes the hatch interval or the egg has been
    /// shoved into the safe zone. Returns the hatch event, if any.
    pub fn update<'a, I>(&mut self, dt: f32, top_margin: f32, blockers: I) -> Option<GameEvent>
    where
        I: IntoIterator<Item = &'a dyn Body>,
    {
        self.pos = push_out_all(self.pos, EGG_RADIUS, blockers);

        if self.hatch_timer > EGG_HATCH_INTERVAL || self.pos.y < top_margin {
            self.marked_for_deletion = true;
            Some(GameEvent::Hatched { at: self.pos })
        } else {
            self.hatch_timer += dt;
            None
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.submit(DrawCommand::Sprite {
            sheet: SpriteSheet::Egg,
            src: Rect::new(0.0, 0.0, EGG_SPRITE_WIDTH, EGG_SPRITE_HEIGHT),
            dst: self.sprite_rect(),
        });
        if debug {
            draw_hitbox(surface, self.pos, EGG_RADIUS);
            surface.submit(DrawCommand::Text {
                text: format!("{:.0}", (self.hatch_timer / 1000.0).round()),
                pos: Vec2::new(self.pos.x, self.pos.y - EGG_RADIUS * 2.5),
                align: TextAlign::Center,
            });
        }
    }
}

impl Body for Egg {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        EGG_RADIUS
    }
}

/// A hatchling crawling up toward the safe zone
#[derive(Debug, Clone)]
pub struct Larva {
    pub pos: Vec2,
    /// Upward speed (pixels per frame)
    pub speed: f32,
    /// Row on the larva sheet
    pub frame_row: u32,
    pub marked_for_deletion: bool,
}

impl Larva {
    pub fn new(pos: Vec2, speed: f32, frame_row: u32) -> Self {
        Self {
            pos,
            speed,
            frame_row,
            marked_for_deletion: false,
        }
    }

    /// Hatch at `pos` with a random speed and look
    pub fn hatch<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self::new(pos, 1.0 + rng.random::<f32>(), rng.random_range(0..2))
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - LARVA_SPRITE_SIZE * 0.5,
            self.pos.y - LARVA_SPRITE_SIZE * 0.5 - LARVA_SPRITE_LIFT,
            LARVA_SPRITE_SIZE,
            LARVA_SPRITE_SIZE,
        )
    }

    /// Crawl upward, get pushed by `blockers`, and check whether a toad got it
    ///
    /// Reaching the safe zone is checked first and ends the update, so a
    /// larva is rescued or eaten at most once.
    pub fn update<'a, I>(
        &mut self,
        top_margin: f32,
        blockers: I,
        enemies: &[Enemy],
    ) -> Option<GameEvent>
    where
        I: IntoIterator<Item = &'a dyn Body>,
    {
        self.pos.y -= self.speed;

        if self.pos.y < top_margin {
            self.marked_for_deletion = true;
            return Some(GameEvent::Rescued { at: self.pos });
        }

        self.pos = push_out_all(self.pos, LARVA_RADIUS, blockers);

        if enemies.iter().any(|enemy| check_collision(&*self, enemy).hit) {
            self.marked_for_deletion = true;
            return Some(GameEvent::Eaten { at: self.pos });
        }

        None
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.submit(DrawCommand::Sprite {
            sheet: SpriteSheet::Larva,
            src: Rect::cell(0, self.frame_row, LARVA_SPRITE_SIZE, LARVA_SPRITE_SIZE),
            dst: self.sprite_rect(),
        });
        if debug {
            draw_hitbox(surface, self.pos, LARVA_RADIUS);
        }
    }
}

impl Body for Larva {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        LARVA_RADIUS
    }
}

/// A toad hopping right to left; recycled once it leaves the screen
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Leftward speed (pixels per frame)
    pub speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self { pos, speed }
    }

    /// Fresh toad waiting off the right edge
    pub fn spawn<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Self {
        let speed = rng.random::<f32>() * 3.0 + 0.5;
        Self::new(Self::entry_point(arena, rng), speed)
    }

    /// Random point past the right edge, inside the play band
    fn entry_point<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Vec2 {
        Vec2::new(
            arena.width + ENEMY_SPRITE_WIDTH + rng.random::<f32>() * arena.width * 0.5,
            arena.top_margin + rng.random::<f32>() * (arena.height - arena.top_margin),
        )
    }

    /// Sprite rectangle; the toad's feet sit just below its hitbox
    pub fn sprite_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - ENEMY_SPRITE_WIDTH * 0.5,
            self.pos.y - ENEMY_SPRITE_HEIGHT + ENEMY_SPRITE_DROP,
            ENEMY_SPRITE_WIDTH,
            ENEMY_SPRITE_HEIGHT,
        )
    }

    /// Advance left, re-enter from the right once gone, and step out of blockers
    pub fn update<'a, R, I>(&mut self, arena: &Arena, rng: &mut R, blockers: I)
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a dyn Body>,
    {
        self.pos.x -= self.speed;
        if self.sprite_rect().right() < 0.0 {
            self.pos = Self::entry_point(arena, rng);
        }

        self.pos = push_out_all(self.pos, ENEMY_RADIUS, blockers);
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.submit(DrawCommand::Sprite {
            sheet: SpriteSheet::Toad,
            src: Rect::new(0.0, 0.0, ENEMY_SPRITE_WIDTH, ENEMY_SPRITE_HEIGHT),
            dst: self.sprite_rect(),
        });
        if debug {
            draw_hitbox(surface, self.pos, ENEMY_RADIUS);
        }
    }
}

impl Body for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        ENEMY_RADIUS
    }
}

/// The player followed by every obstacle
pub(crate) fn blockers<'a>(
    player: &'a Player,
    obstacles: &'a [Obstacle],
) -> impl Iterator<Item = &'a dyn Body> {
    std::iter::once(player as &dyn Body).chain(obstacles.iter().map(|o| o as &dyn Body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::from(&Settings::default())
    }

    #[test]
    fn test_obstacle_fit_rules() {
        let arena = arena();
        assert!(Obstacle::at(Vec2::new(640.0, 500.0), 0, 0).fits(&arena));
        // Sprite hangs off the left edge
        assert!(!Obstacle::at(Vec2::new(100.0, 500.0), 0, 0).fits(&arena));
        // Too close to the safe zone
        assert!(!Obstacle::at(Vec2::new(640.0, 300.0), 0, 0).fits(&arena));
        // Too close to the bottom
        assert!(!Obstacle::at(Vec2::new(640.0, 650.0), 0, 0).fits(&arena));
    }

    #[test]
    fn test_obstacle_crowding_buffer() {
        let a = Obstacle::at(Vec2::new(400.0, 500.0), 0, 0);
        assert!(a.crowds(&Obstacle::at(Vec2::new(579.0, 500.0), 0, 0)));
        assert!(!a.crowds(&Obstacle::at(Vec2::new(580.0, 500.0), 0, 0)));
    }

    #[test]
    fn test_random_egg_in_lower_play_area() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let egg = Egg::random(&arena, &mut rng);
            assert!(egg.pos.x >= 0.0 && egg.pos.x < arena.width - 4.0 * EGG_RADIUS);
            assert!(egg.pos.y >= arena.top_margin);
            assert!(egg.pos.y < arena.height - 2.0 * EGG_RADIUS);
        }
    }

    #[test]
    fn test_egg_incubates_then_hatches() {
        let mut egg = Egg::at(Vec2::new(600.0, 500.0));
        let none: [&dyn Body; 0] = [];
        assert!(egg.update(6000.0, TOP_MARGIN, none).is_none());
        assert!(egg.update(5000.0, TOP_MARGIN, none).is_none());
        assert!(!egg.marked_for_deletion);
        assert_eq!(egg.hatch_timer, 11_000.0);
        match egg.update(16.0, TOP_MARGIN, none) {
            Some(GameEvent::Hatched { at }) => assert_eq!(at, Vec2::new(600.0, 500.0)),
            other => panic!("expected hatch, got {:?}", other),
        }
        assert!(egg.marked_for_deletion);
    }

    #[test]
    fn test_egg_hatches_when_shoved_into_safe_zone() {
        let mut egg = Egg::at(Vec2::new(600.0, 250.0));
        let none: [&dyn Body; 0] = [];
        assert!(matches!(
            egg.update(16.0, TOP_MARGIN, none),
            Some(GameEvent::Hatched { .. })
        ));
    }

    #[test]
    fn test_egg_pushed_by_blockers() {
        let mut egg = Egg::at(Vec2::new(600.0, 500.0));
        let rock = Obstacle::at(Vec2::new(650.0, 500.0), 0, 0);
        let blockers: [&dyn Body; 1] = [&rock];
        egg.update(16.0, TOP_MARGIN, blockers);
        assert!(!check_collision(&egg, &rock).hit);
        assert!(egg.pos.x < 600.0);
    }

    #[test]
    fn test_larva_rescued_at_top() {
        let mut larva = Larva::new(Vec2::new(500.0, TOP_MARGIN + 0.5), 1.0, 0);
        let none: [&dyn Body; 0] = [];
        let event = larva.update(TOP_MARGIN, none, &[]);
        assert!(matches!(event, Some(GameEvent::Rescued { .. })));
        assert!(larva.marked_for_deletion);
    }

    #[test]
    fn test_larva_rescue_takes_precedence_over_toad() {
        let pos = Vec2::new(500.0, TOP_MARGIN + 0.5);
        let mut larva = Larva::new(pos, 1.0, 0);
        let toad = Enemy::new(pos, 1.0);
        let none: [&dyn Body; 0] = [];
        let event = larva.update(TOP_MARGIN, none, std::slice::from_ref(&toad));
        assert!(matches!(event, Some(GameEvent::Rescued { .. })));
    }

    #[test]
    fn test_larva_eaten_once_by_overlapping_toads() {
        let pos = Vec2::new(500.0, 500.0);
        let mut larva = Larva::new(pos, 1.0, 1);
        let toads = [Enemy::new(pos, 1.0), Enemy::new(pos + Vec2::X, 1.0)];
        let none: [&dyn Body; 0] = [];
        let event = larva.update(TOP_MARGIN, none, &toads);
        assert!(matches!(event, Some(GameEvent::Eaten { .. })));
        assert!(larva.marked_for_deletion);
    }

    #[test]
    fn test_larva_pushed_off_the_bull() {
        let mut larva = Larva::new(Vec2::new(500.0, 500.0), 1.0, 0);
        let mut bull = Player::new(&arena());
        bull.pos = Vec2::new(540.0, 499.0);
        let rock = Obstacle::at(Vec2::new(200.0, 600.0), 0, 0);
        let event = larva.update(TOP_MARGIN, blockers(&bull, std::slice::from_ref(&rock)), &[]);
        assert!(event.is_none());
        assert_eq!(larva.pos, Vec2::new(479.0, 499.0));
        assert!(!check_collision(&larva, &bull).hit);
    }

    #[test]
    fn test_larva_crawls_straight_up() {
        let mut larva = Larva::new(Vec2::new(500.0, 500.0), 1.5, 0);
        let none: [&dyn Body; 0] = [];
        assert!(larva.update(TOP_MARGIN, none, &[]).is_none());
        assert_eq!(larva.pos, Vec2::new(500.0, 498.5));
    }

    #[test]
    fn test_enemy_recycled_not_removed() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut toad = Enemy::new(Vec2::new(-ENEMY_SPRITE_WIDTH * 0.5 + 1.0, 400.0), 2.0);
        let none: [&dyn Body; 0] = [];
        toad.update(&arena, &mut rng, none);
        assert!(toad.pos.x > arena.width);
        assert!(toad.pos.y >= arena.top_margin && toad.pos.y < arena.height);
    }

    #[test]
    fn test_enemy_keeps_walking_while_visible() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut toad = Enemy::new(Vec2::new(10.0, 400.0), 2.0);
        let none: [&dyn Body; 0] = [];
        toad.update(&arena, &mut rng, none);
        assert_eq!(toad.pos, Vec2::new(8.0, 400.0));
    }

    #[test]
    fn test_enemy_steps_around_obstacle() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut toad = Enemy::new(Vec2::new(600.0, 400.0), 2.0);
        let rock = Obstacle::at(Vec2::new(650.0, 400.0), 0, 0);
        let mut bull = Player::new(&arena);
        bull.pos = Vec2::new(200.0, 650.0);
        toad.update(&arena, &mut rng, blockers(&bull, std::slice::from_ref(&rock)));
        assert_eq!(toad.pos, Vec2::new(579.0, 400.0));
        assert!(!check_collision(&toad, &rock).hit);
    }

    #[test]
    fn test_spawned_enemy_waits_off_screen() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let toad = Enemy::spawn(&arena, &mut rng);
            assert!(toad.pos.x > arena.width);
            assert!(toad.speed >= 0.5 && toad.speed < 3.5);
        }
    }

    #[test]
    fn test_egg_debug_shows_timer_seconds() {
        let mut egg = Egg::at(Vec2::new(600.0, 500.0));
        egg.hatch_timer = 4_600.0;
        let mut list = crate::renderer::DrawList::new();
        egg.draw(&mut list, true);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["5"]);
    }

    #[test]
    fn test_egg_timer_readout_rounds_half_up() {
        let mut egg = Egg::at(Vec2::new(600.0, 500.0));
        egg.hatch_timer = 2_500.0;
        let mut list = crate::renderer::DrawList::new();
        egg.draw(&mut list, true);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["3"]);
    }
}
