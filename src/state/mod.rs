mod player;

pub use player::{BottomSheetState, PlayerControlsVisibility, PlayerType, VideoState};

use std::fmt::Debug;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
#[error("unknown {cell} state name: {name}")]
pub struct UnknownStateName {
    pub cell: &'static str,
    pub name: String,
}

type Listener<T> = Box<dyn Fn(T) + Send + Sync>;

/// A process-wide observable state value.
///
/// Writable from any thread; readers always observe a fully-written value.
/// Listeners fire synchronously on the writer's thread, in subscription
/// order, exactly once per effective change (redundant writes are dropped).
/// Listener code must not block and must not re-enter `set` on the same cell.
pub struct StateCell<T> {
    name: &'static str,
    value: Mutex<T>,
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: Copy + PartialEq + Debug> StateCell<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            value: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        *self.value.lock().expect("state cell poisoned")
    }

    /// Change-detected write. Returns whether the value actually changed.
    pub fn set(&self, new: T) -> bool {
        {
            let mut value = self.value.lock().expect("state cell poisoned");
            if *value == new {
                return false;
            }
            *value = new;
        }
        debug!(cell = self.name, value = ?new, "state changed");
        let listeners = self.listeners.lock().expect("state cell poisoned");
        for listener in listeners.iter() {
            listener(new);
        }
        true
    }

    pub fn subscribe(&self, listener: impl Fn(T) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .expect("state cell poisoned")
            .push(Box::new(listener));
    }
}

impl<T: Debug> Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell")
            .field("name", &self.name)
            .field("value", &*self.value.lock().expect("state cell poisoned"))
            .finish()
    }
}

/// The shared state cells exposed to the host and consumed by the gesture
/// core. Producers (player and network callbacks) may write from any thread.
#[derive(Debug)]
pub struct SharedState {
    pub player_type: StateCell<PlayerType>,
    pub video_state: StateCell<Option<VideoState>>,
    pub player_controls: StateCell<Option<PlayerControlsVisibility>>,
    pub bottom_sheet: StateCell<BottomSheetState>,
    pub engagement_overlay_visible: StateCell<bool>,
    pub screen_locked: StateCell<bool>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            player_type: StateCell::new("player_type", PlayerType::None),
            video_state: StateCell::new("video_state", None),
            player_controls: StateCell::new("player_controls", None),
            bottom_sheet: StateCell::new("bottom_sheet", BottomSheetState::Closed),
            engagement_overlay_visible: StateCell::new("engagement_overlay_visible", false),
            screen_locked: StateCell::new("screen_locked", false),
        }
    }
}

impl SharedState {
    /// Apply a symbolic state transition from a producer that only has the
    /// cell and value as names. An unresolvable name leaves the cell
    /// unchanged; corrupt input is never allowed to propagate as a crash.
    pub fn apply_named(&self, cell: &str, value: &str) {
        let result = match cell {
            "player_type" => PlayerType::from_name(value).map(|v| {
                self.player_type.set(v);
            }),
            "video_state" => VideoState::from_name(value).map(|v| {
                self.video_state.set(Some(v));
            }),
            "player_controls" => PlayerControlsVisibility::from_name(value).map(|v| {
                self.player_controls.set(Some(v));
            }),
            "bottom_sheet" => BottomSheetState::from_name(value).map(|v| {
                self.bottom_sheet.set(v);
            }),
            "engagement_overlay_visible" => parse_bool(value).map(|v| {
                self.engagement_overlay_visible.set(v);
            }),
            "screen_locked" => parse_bool(value).map(|v| {
                self.screen_locked.set(v);
            }),
            other => Err(UnknownStateName {
                cell: "shared_state",
                name: other.to_string(),
            }),
        };
        if let Err(err) = result {
            error!(error = %err, "dropping unresolvable state transition");
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, UnknownStateName> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(UnknownStateName {
            cell: "bool",
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn redundant_writes_do_not_notify() {
        let cell = StateCell::new("test", BottomSheetState::Closed);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        cell.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!cell.set(BottomSheetState::Closed));
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        assert!(cell.set(BottomSheetState::Open));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(!cell.set(BottomSheetState::Open));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listeners_fire_in_subscription_order_with_new_value() {
        let cell = StateCell::new("test", PlayerType::None);
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let order = Arc::clone(&order);
            cell.subscribe(move |value: PlayerType| {
                order.lock().unwrap().push((id, value));
            });
        }

        cell.set(PlayerType::WatchWhileFullscreen);
        let seen = order.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (0, PlayerType::WatchWhileFullscreen),
                (1, PlayerType::WatchWhileFullscreen),
                (2, PlayerType::WatchWhileFullscreen),
            ]
        );
    }

    #[test]
    fn writes_are_visible_across_threads() {
        let state = Arc::new(SharedState::default());
        let writer = Arc::clone(&state);
        let handle = std::thread::spawn(move || {
            writer.apply_named("player_type", "WATCH_WHILE_MAXIMIZED");
            writer.apply_named("screen_locked", "true");
        });
        handle.join().unwrap();

        assert_eq!(state.player_type.get(), PlayerType::WatchWhileMaximized);
        assert!(state.screen_locked.get());
    }

    #[test]
    fn unresolvable_name_leaves_cell_unchanged() {
        let state = SharedState::default();
        state.apply_named("video_state", "PLAYING");
        state.apply_named("video_state", "MELTING");
        assert_eq!(state.video_state.get(), Some(VideoState::Playing));

        state.apply_named("no_such_cell", "whatever");
    }
}
