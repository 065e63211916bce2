//! Render/animate driver
//!
//! Owns the world and the pending input. The host forwards raw events here and
//! calls `frame` from its animation callback.

use glam::Vec2;

use crate::Settings;
use crate::renderer::Surface;
use crate::sim::{GameState, TickInput, tick};

use super::FrameClock;

/// Game instance holding all state
pub struct Driver {
    pub state: GameState,
    pub input: TickInput,
    clock: FrameClock,
}

impl Driver {
    /// Build and populate a world
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = GameState::new(settings, seed);
        state.init();
        let input = TickInput::centered(&state);
        Self {
            state,
            input,
            clock: FrameClock::new(),
        }
    }

    /// Run the simulation for one animation callback
    ///
    /// Returns `true` if a frame was drawn.
    pub fn frame(&mut self, timestamp: f64, surface: &mut dyn Surface) -> bool {
        let dt = self.clock.delta(timestamp);
        let rendered = tick(&mut self.state, &self.input, surface, dt);

        // Clear one-shot inputs after processing
        self.input.toggle_debug = false;

        rendered
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.pointer.press(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.input.pointer.release(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer.move_to(Vec2::new(x, y));
    }

    /// Each `d` press flips debug mode; presses between frames pair off
    pub fn key_down(&mut self, key: &str) {
        if key.eq_ignore_ascii_case("d") {
            self.input.toggle_debug ^= true;
        }
    }
}
