use std::io::{self, BufRead};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, unbounded};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::geometry::{Point, Rectangle};
use crate::gesture::{PointerAction, PointerEvent};

/// An event from the host boundary: raw pointer input, player layout
/// changes, or symbolic state transitions.
#[derive(Debug)]
pub enum InputEvent {
    Pointer(PointerEvent),
    PlayerLayout {
        container: Rectangle,
        surface: Rectangle,
    },
    State {
        cell: String,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputEventWire {
    Pointer {
        action: PointerActionWire,
        x: i32,
        y: i32,
    },
    Layout {
        container: Rectangle,
        surface: Rectangle,
    },
    State {
        cell: String,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PointerActionWire {
    Down,
    Move,
    Up,
    Cancel,
}

impl InputEventWire {
    fn into_event(self, at: Instant) -> InputEvent {
        match self {
            Self::Pointer { action, x, y } => InputEvent::Pointer(PointerEvent {
                action: match action {
                    PointerActionWire::Down => PointerAction::Down,
                    PointerActionWire::Move => PointerAction::Move,
                    PointerActionWire::Up => PointerAction::Up,
                    PointerActionWire::Cancel => PointerAction::Cancel,
                },
                position: Point::new(x, y),
                at,
            }),
            Self::Layout { container, surface } => InputEvent::PlayerLayout { container, surface },
            Self::State { cell, value } => InputEvent::State { cell, value },
        }
    }
}

/// Read newline-delimited JSON input events from stdin on a worker thread.
/// Events are stamped with their arrival time. Malformed lines are dropped
/// with a warning; the channel closes when stdin does.
pub fn start_stdin_source() -> Receiver<InputEvent> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(error = %err, "failed to read input line");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<InputEventWire>(&line) {
                Ok(wire) => {
                    if tx.send(wire.into_event(Instant::now())).is_err() {
                        break;
                    }
                }
                Err(err) => warn!(error = %err, "dropping malformed input line"),
            }
        }
        debug!("input source closed");
    });
    rx
}
