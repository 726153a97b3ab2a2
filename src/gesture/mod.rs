pub mod distance;
mod recognizer;
pub mod zones;

pub use recognizer::{GestureConfig, PressToSwipeController};

use std::time::Instant;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer event from the host input boundary.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    pub at: Instant,
}

/// Whether the recognizer consumed an event or the host should dispatch it
/// normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    PassThrough,
}

/// A gesture recognizer driven from the input thread. Every method is a
/// synchronous, bounded computation; long-press arming without pointer
/// movement is driven by `on_tick`.
pub trait GestureController {
    fn feed(&mut self, event: PointerEvent) -> EventDisposition;
    fn on_tick(&mut self, now: Instant);
}
