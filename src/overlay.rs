use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, after, never, unbounded};
use tracing::{info, warn};

/// Display collaborator for transient swipe feedback.
///
/// Implementations must not block: these callbacks run on whichever thread
/// produced the control change.
pub trait SwipeOverlay {
    fn on_volume_changed(&self, volume: i32, max_volume: i32);
    fn on_brightness_changed(&self, brightness: f64);
    fn on_enter_swipe_session(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayIcon {
    VolumeNormal,
    VolumeMuted,
    BrightnessManual,
    BrightnessAuto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackFrame {
    pub text: String,
    pub icon: OverlayIcon,
}

/// Rendering boundary for the overlay. The core only emits display commands;
/// the host decides how to draw them.
pub trait DisplaySink: Send {
    fn show(&self, frame: &FeedbackFrame) -> Result<()>;
    fn hide(&self) -> Result<()>;
    fn haptic(&self) -> Result<()>;
}

/// Sink that renders feedback into the log stream.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl DisplaySink for LogSink {
    fn show(&self, frame: &FeedbackFrame) -> Result<()> {
        info!(icon = ?frame.icon, "overlay: {}", frame.text);
        Ok(())
    }

    fn hide(&self) -> Result<()> {
        info!("overlay: hidden");
        Ok(())
    }

    fn haptic(&self) -> Result<()> {
        info!("overlay: haptic pulse");
        Ok(())
    }
}

enum OverlayCommand {
    Show(FeedbackFrame),
    Haptic,
}

/// Handle to the overlay worker thread.
///
/// The worker owns the single delayed-hide timer: every feedback frame
/// cancels any pending hide and schedules a fresh one.
#[derive(Clone)]
pub struct FeedbackOverlay {
    tx: Sender<OverlayCommand>,
    haptic_enabled: bool,
    lowest_value_enables_auto_brightness: bool,
}

impl FeedbackOverlay {
    pub fn start(
        sink: impl DisplaySink + 'static,
        timeout: Duration,
        haptic_enabled: bool,
        lowest_value_enables_auto_brightness: bool,
    ) -> Self {
        let (tx, rx) = unbounded();
        thread::spawn(move || run_worker(sink, rx, timeout));
        Self {
            tx,
            haptic_enabled,
            lowest_value_enables_auto_brightness,
        }
    }

    fn send(&self, command: OverlayCommand) {
        // worker gone means we are shutting down; feedback is best-effort
        let _ = self.tx.send(command);
    }
}

impl SwipeOverlay for FeedbackOverlay {
    fn on_volume_changed(&self, volume: i32, _max_volume: i32) {
        let icon = if volume > 0 {
            OverlayIcon::VolumeNormal
        } else {
            OverlayIcon::VolumeMuted
        };
        self.send(OverlayCommand::Show(FeedbackFrame {
            text: volume.to_string(),
            icon,
        }));
    }

    fn on_brightness_changed(&self, brightness: f64) {
        if self.lowest_value_enables_auto_brightness && brightness <= 0.0 {
            self.send(OverlayCommand::Show(FeedbackFrame {
                text: "auto".into(),
                icon: OverlayIcon::BrightnessAuto,
            }));
        } else if brightness >= 0.0 {
            self.send(OverlayCommand::Show(FeedbackFrame {
                text: format!("{}%", brightness.round() as i32),
                icon: OverlayIcon::BrightnessManual,
            }));
        }
    }

    fn on_enter_swipe_session(&self) {
        if self.haptic_enabled {
            self.send(OverlayCommand::Haptic);
        }
    }
}

fn run_worker(sink: impl DisplaySink, rx: Receiver<OverlayCommand>, timeout: Duration) {
    let mut hide_at: Receiver<Instant> = never();
    let mut visible = false;

    loop {
        crossbeam_channel::select! {
            recv(rx) -> command => match command {
                Ok(OverlayCommand::Show(frame)) => {
                    if let Err(err) = sink.show(&frame) {
                        warn!(error = %err, "overlay sink rejected frame");
                    }
                    visible = true;
                    hide_at = after(timeout);
                }
                Ok(OverlayCommand::Haptic) => {
                    if let Err(err) = sink.haptic() {
                        warn!(error = %err, "overlay sink rejected haptic pulse");
                    }
                }
                Err(_) => break,
            },
            recv(hide_at) -> _ => {
                if let Err(err) = sink.hide() {
                    warn!(error = %err, "overlay sink failed to hide");
                }
                visible = false;
                hide_at = never();
            }
        }
    }

    if visible {
        let _ = sink.hide();
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub events: Arc<Mutex<Vec<String>>>,
    }

    impl DisplaySink for RecordingSink {
        fn show(&self, frame: &FeedbackFrame) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("show:{}", frame.text));
            Ok(())
        }

        fn hide(&self) -> Result<()> {
            self.events.lock().unwrap().push("hide".into());
            Ok(())
        }

        fn haptic(&self) -> Result<()> {
            self.events.lock().unwrap().push("haptic".into());
            Ok(())
        }
    }

    fn wait_for(sink: &RecordingSink, predicate: impl Fn(&[String]) -> bool) {
        for _ in 0..100 {
            if predicate(&sink.events.lock().unwrap()) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("overlay worker did not reach expected state: {:?}", sink.events.lock().unwrap());
    }

    #[test]
    fn feedback_auto_hides_after_timeout() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(30), true, true);

        overlay.on_volume_changed(7, 15);
        wait_for(&sink, |events| events.contains(&"hide".to_string()));

        let events = sink.events.lock().unwrap();
        assert_eq!(*events, vec!["show:7".to_string(), "hide".to_string()]);
    }

    #[test]
    fn new_feedback_replaces_pending_hide() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(50), true, true);

        overlay.on_volume_changed(5, 15);
        thread::sleep(Duration::from_millis(20));
        overlay.on_volume_changed(6, 15);
        thread::sleep(Duration::from_millis(20));
        // the first hide deadline has passed but was rescheduled
        assert!(!sink.events.lock().unwrap().contains(&"hide".to_string()));

        wait_for(&sink, |events| events.contains(&"hide".to_string()));
        let events = sink.events.lock().unwrap();
        assert_eq!(events.iter().filter(|event| *event == "hide").count(), 1);
    }

    #[test]
    fn session_entry_emits_haptic_when_enabled() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(30), true, true);
        overlay.on_enter_swipe_session();
        wait_for(&sink, |events| events.contains(&"haptic".to_string()));
    }

    #[test]
    fn session_entry_is_silent_when_haptic_disabled() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(30), false, true);
        overlay.on_enter_swipe_session();
        overlay.on_volume_changed(1, 15);
        wait_for(&sink, |events| !events.is_empty());
        assert!(!sink.events.lock().unwrap().contains(&"haptic".to_string()));
    }

    #[test]
    fn auto_brightness_floor_renders_auto_frame() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(30), true, true);
        overlay.on_brightness_changed(-1.0);
        wait_for(&sink, |events| !events.is_empty());
        assert_eq!(sink.events.lock().unwrap()[0], "show:auto");
    }

    #[test]
    fn negative_brightness_without_policy_is_not_rendered() {
        let sink = RecordingSink::default();
        let overlay = FeedbackOverlay::start(sink.clone(), Duration::from_millis(30), true, false);
        overlay.on_brightness_changed(-1.0);
        overlay.on_brightness_changed(42.0);
        wait_for(&sink, |events| !events.is_empty());
        assert_eq!(sink.events.lock().unwrap()[0], "show:42%");
    }
}
