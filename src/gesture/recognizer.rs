use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::controls::VolumeAndBrightnessScroller;
use crate::geometry::{Point, Rectangle};
use crate::overlay::SwipeOverlay;
use crate::state::SharedState;

use super::zones::SwipeZonesController;
use super::{EventDisposition, GestureController, PointerAction, PointerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    /// Pointer down inside an eligible zone, long press not yet elapsed.
    Pressed,
    /// Long press elapsed; drag deltas adjust the selected axis.
    Armed,
    /// Gesture handed back to the host until the pointer goes up.
    Dismissed,
}

/// Dominant axis of the drag, classified once per gesture and held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwipeDirection {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Volume,
    Brightness,
}

#[derive(Debug, Clone)]
pub struct GestureConfig {
    pub enable_volume: bool,
    pub enable_brightness: bool,
    /// Allow swipes even while the screen is locked.
    pub swipe_lock_mode: bool,
    pub long_press: Duration,
    pub tap_slop: f64,
}

/// The press-to-swipe gesture experience: a long press inside a zone arms a
/// swipe session, after which vertical drag deltas are fed to the axis the
/// session started in. Everything else passes through to the host.
///
/// Not thread-safe; must only be driven from the input thread.
pub struct PressToSwipeController<S, O>
where
    S: VolumeAndBrightnessScroller,
    O: SwipeOverlay,
{
    config: GestureConfig,
    zones: SwipeZonesController,
    shared: Arc<SharedState>,
    scroller: S,
    overlay: O,
    state: SessionState,
    axis: Axis,
    direction: Option<SwipeDirection>,
    press_point: Point,
    press_at: Instant,
    last_point: Point,
}

impl<S, O> PressToSwipeController<S, O>
where
    S: VolumeAndBrightnessScroller,
    O: SwipeOverlay,
{
    pub fn new(
        config: GestureConfig,
        zones: SwipeZonesController,
        shared: Arc<SharedState>,
        scroller: S,
        overlay: O,
    ) -> Self {
        Self {
            config,
            zones,
            shared,
            scroller,
            overlay,
            state: SessionState::Idle,
            axis: Axis::Volume,
            direction: None,
            press_point: Point::new(0, 0),
            press_at: Instant::now(),
            last_point: Point::new(0, 0),
        }
    }

    /// Forward a layout-change notification to the zone calculator.
    pub fn on_player_layout(&mut self, container: Rectangle, surface: Rectangle) {
        self.zones.on_player_layout(container, surface);
    }

    /// Gates that reject the gesture outright, whatever the session state.
    /// Re-evaluated per scroll emission since the cells can change mid-gesture.
    fn gesture_allowed(&self) -> bool {
        if self.shared.screen_locked.get() && !self.config.swipe_lock_mode {
            return false;
        }
        if self.shared.engagement_overlay_visible.get() {
            return false;
        }
        if !self.shared.player_type.get().is_maximized_or_fullscreen() {
            return false;
        }
        if self.shared.bottom_sheet.get().is_open() {
            return false;
        }
        true
    }

    /// A disabled axis makes its zone empty for containment.
    fn zone_at(&self, point: Point) -> Option<Axis> {
        if self.config.enable_volume && self.zones.volume().contains(point) {
            return Some(Axis::Volume);
        }
        if self.config.enable_brightness && self.zones.brightness().contains(point) {
            return Some(Axis::Brightness);
        }
        None
    }

    fn arm(&mut self) {
        self.state = SessionState::Armed;
        self.overlay.on_enter_swipe_session();
        debug!(axis = ?self.axis, "swipe session armed");
    }

    /// Arming requires the pointer to still be inside the zone the press
    /// started in.
    fn may_arm(&self, point: Point) -> bool {
        self.zone_at(point) == Some(self.axis)
    }

    fn classify_direction(&mut self, point: Point) {
        if self.direction.is_some() {
            return;
        }
        let dx = f64::from(point.x - self.press_point.x).abs();
        let dy = f64::from(point.y - self.press_point.y).abs();
        if dx.max(dy) <= self.config.tap_slop {
            return;
        }
        let direction = if dy >= dx {
            SwipeDirection::Vertical
        } else {
            SwipeDirection::Horizontal
        };
        debug!(?direction, "drag direction classified");
        self.direction = Some(direction);
    }

    fn on_down(&mut self, event: PointerEvent) -> EventDisposition {
        self.state = SessionState::Idle;
        self.direction = None;

        if !self.gesture_allowed() {
            return EventDisposition::PassThrough;
        }
        let Some(axis) = self.zone_at(event.position) else {
            return EventDisposition::PassThrough;
        };

        self.state = SessionState::Pressed;
        self.axis = axis;
        self.press_point = event.position;
        self.press_at = event.at;
        self.last_point = event.position;
        EventDisposition::PassThrough
    }

    fn on_move(&mut self, event: PointerEvent) -> EventDisposition {
        let disposition = match self.state {
            SessionState::Idle | SessionState::Dismissed => EventDisposition::PassThrough,
            SessionState::Pressed => {
                let dx = f64::from(event.position.x - self.press_point.x).abs();
                let dy = f64::from(event.position.y - self.press_point.y).abs();
                if dx.max(dy) > self.config.tap_slop {
                    // moved before the long press elapsed: this is an
                    // ordinary scroll or fling, not ours
                    self.classify_direction(event.position);
                    self.state = SessionState::Dismissed;
                } else if event.at.duration_since(self.press_at) >= self.config.long_press
                    && self.may_arm(event.position)
                {
                    self.arm();
                }
                EventDisposition::PassThrough
            }
            SessionState::Armed => {
                self.classify_direction(event.position);
                if self.direction == Some(SwipeDirection::Vertical) {
                    if self.gesture_allowed() {
                        let distance = f64::from(self.last_point.y - event.position.y);
                        match self.axis {
                            Axis::Volume => self.scroller.scroll_volume(distance),
                            Axis::Brightness => self.scroller.scroll_brightness(distance),
                        }
                    }
                    EventDisposition::Consumed
                } else {
                    EventDisposition::PassThrough
                }
            }
        };
        self.last_point = event.position;
        disposition
    }

    fn on_up(&mut self) -> EventDisposition {
        let was_armed = self.state == SessionState::Armed;
        let was_vertical = self.direction == Some(SwipeDirection::Vertical);
        if was_armed {
            self.scroller.reset_scroller();
            debug!("swipe session ended");
        }
        self.state = SessionState::Idle;
        self.direction = None;
        if was_armed && was_vertical {
            EventDisposition::Consumed
        } else {
            EventDisposition::PassThrough
        }
    }
}

impl<S, O> GestureController for PressToSwipeController<S, O>
where
    S: VolumeAndBrightnessScroller,
    O: SwipeOverlay,
{
    fn feed(&mut self, event: PointerEvent) -> EventDisposition {
        match event.action {
            PointerAction::Down => self.on_down(event),
            PointerAction::Move => self.on_move(event),
            PointerAction::Up | PointerAction::Cancel => self.on_up(),
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if self.state == SessionState::Pressed
            && now.duration_since(self.press_at) >= self.config.long_press
            && self.may_arm(self.last_point)
        {
            self.arm();
        }
    }
}
