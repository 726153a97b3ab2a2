use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, never};
use tracing::{debug, info, warn};

use crate::config::SwipeSettings;
use crate::controls::{
    AudioVolumeController, ScreenBrightnessController, VolumeAndBrightnessScrollerImpl,
};
use crate::gesture::zones::SwipeZonesController;
use crate::gesture::{GestureConfig, GestureController, PressToSwipeController};
use crate::input::InputEvent;
use crate::overlay::{FeedbackOverlay, LogSink};
use crate::state::SharedState;
use crate::system::audio::PulseAudioBackend;
use crate::system::brightness::DdcutilBackend;

/// How often the recognizer is polled for long-press arming.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

type Recognizer = PressToSwipeController<
    VolumeAndBrightnessScrollerImpl<PulseAudioBackend, DdcutilBackend, FeedbackOverlay>,
    FeedbackOverlay,
>;

pub struct App {
    recognizer: Recognizer,
    shared: Arc<SharedState>,
    events: Receiver<InputEvent>,
    shutdown: Option<Receiver<()>>,
}

impl App {
    pub fn new(settings: SwipeSettings, events: Receiver<InputEvent>) -> Result<Self> {
        let shared = Arc::new(SharedState::default());

        let overlay = FeedbackOverlay::start(
            LogSink,
            Duration::from_millis(settings.overlay_timeout_ms),
            settings.haptic_feedback,
            settings.lowest_value_enables_auto_brightness,
        );

        let volume = if settings.enable_volume {
            let backend = settings
                .pulse_sink
                .as_ref()
                .map(|sink| PulseAudioBackend::new(sink.clone()))
                .unwrap_or_default();
            if backend.is_available() {
                Some(AudioVolumeController::new(backend)?)
            } else {
                warn!("PulseAudio CLI (`pactl`) not found; volume swipes disabled");
                None
            }
        } else {
            None
        };

        let brightness = if settings.enable_brightness {
            let backend = DdcutilBackend::new(
                settings.monitor_display.clone(),
                settings.monitor_bus,
                settings.brightness_default_level,
            );
            if backend.is_available() {
                Some(ScreenBrightnessController::new(backend)?)
            } else {
                warn!("ddcutil not found or failed; brightness swipes disabled");
                None
            }
        } else {
            None
        };

        let scroller = VolumeAndBrightnessScrollerImpl::new(
            volume,
            brightness,
            overlay.clone(),
            settings.volume_unit_distance,
            settings.brightness_unit_distance,
            settings.lowest_value_enables_auto_brightness,
        );

        let zones =
            SwipeZonesController::new(settings.fallback_screen, settings.zone_width_percent);
        let recognizer = PressToSwipeController::new(
            GestureConfig {
                enable_volume: settings.enable_volume,
                enable_brightness: settings.enable_brightness,
                swipe_lock_mode: settings.swipe_lock_mode,
                long_press: Duration::from_millis(settings.long_press_ms),
                tap_slop: settings.tap_slop,
            },
            zones,
            Arc::clone(&shared),
            scroller,
            overlay,
        );

        Ok(Self {
            recognizer,
            shared,
            events,
            shutdown: None,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        info!("swipe control surface running");
        let ticker = crossbeam_channel::tick(TICK_INTERVAL);
        let shutdown = self.shutdown.clone().unwrap_or_else(never);

        loop {
            crossbeam_channel::select! {
                recv(self.events) -> event => match event {
                    Ok(event) => self.handle_event(event),
                    Err(_) => {
                        info!("input channel closed");
                        break;
                    }
                },
                recv(ticker) -> _ => {
                    self.recognizer.on_tick(Instant::now());
                }
                recv(shutdown) -> _ => {
                    info!("shutdown requested");
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pointer(pointer) => {
                let disposition = self.recognizer.feed(pointer);
                debug!(action = ?pointer.action, ?disposition, "pointer event");
            }
            InputEvent::PlayerLayout { container, surface } => {
                self.recognizer.on_player_layout(container, surface);
            }
            InputEvent::State { cell, value } => {
                self.shared.apply_named(&cell, &value);
            }
        }
    }

    pub fn set_shutdown_channel(&mut self, shutdown: Receiver<()>) {
        self.shutdown = Some(shutdown);
    }

    /// The shared state cells, for host features that read or subscribe.
    pub fn shared_state(&self) -> Arc<SharedState> {
        Arc::clone(&self.shared)
    }
}
