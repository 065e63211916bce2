//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Frame timestamps to elapsed time
//! - Input events to `TickInput`
//! - One simulated frame per animation callback

pub mod clock;
pub mod driver;

pub use clock::FrameClock;
pub use driver::Driver;
