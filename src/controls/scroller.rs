use tracing::warn;

use crate::gesture::distance::ScrollDistanceHelper;
use crate::overlay::SwipeOverlay;
use crate::system::audio::AudioBackend;
use crate::system::brightness::BrightnessBackend;

use super::{AudioVolumeController, ScreenBrightnessController, VolumeAndBrightnessScroller};

/// Binds one distance accumulator per axis to the volume and brightness
/// controllers and pushes every applied step to the overlay.
///
/// A `None` controller means that axis was disabled at bind time; its scroll
/// calls are silent no-ops.
pub struct VolumeAndBrightnessScrollerImpl<A, B, O>
where
    A: AudioBackend,
    B: BrightnessBackend,
    O: SwipeOverlay,
{
    volume: Option<AudioVolumeController<A>>,
    brightness: Option<ScreenBrightnessController<B>>,
    overlay: O,
    volume_scroller: ScrollDistanceHelper,
    brightness_scroller: ScrollDistanceHelper,
    lowest_value_enables_auto_brightness: bool,
}

impl<A, B, O> VolumeAndBrightnessScrollerImpl<A, B, O>
where
    A: AudioBackend,
    B: BrightnessBackend,
    O: SwipeOverlay,
{
    pub fn new(
        volume: Option<AudioVolumeController<A>>,
        brightness: Option<ScreenBrightnessController<B>>,
        overlay: O,
        volume_unit_distance: f64,
        brightness_unit_distance: f64,
        lowest_value_enables_auto_brightness: bool,
    ) -> Self {
        Self {
            volume,
            brightness,
            overlay,
            volume_scroller: ScrollDistanceHelper::new(volume_unit_distance),
            brightness_scroller: ScrollDistanceHelper::new(brightness_unit_distance),
            lowest_value_enables_auto_brightness,
        }
    }
}

impl<A, B, O> VolumeAndBrightnessScroller for VolumeAndBrightnessScrollerImpl<A, B, O>
where
    A: AudioBackend,
    B: BrightnessBackend,
    O: SwipeOverlay,
{
    fn scroll_volume(&mut self, distance: f64) {
        let Self {
            volume,
            overlay,
            volume_scroller,
            ..
        } = self;
        volume_scroller.add(distance, |direction| {
            let Some(controller) = volume.as_mut() else {
                return;
            };
            match controller.set_volume(controller.volume() + direction) {
                Ok(()) => overlay.on_volume_changed(controller.volume(), controller.max_volume()),
                Err(err) => warn!(error = %err, "volume step failed"),
            }
        });
    }

    fn scroll_brightness(&mut self, distance: f64) {
        let Self {
            brightness,
            overlay,
            brightness_scroller,
            lowest_value_enables_auto_brightness,
            ..
        } = self;
        let policy = *lowest_value_enables_auto_brightness;
        brightness_scroller.add(distance, |direction| {
            let Some(controller) = brightness.as_mut() else {
                return;
            };
            // With the auto-brightness policy the floor is exclusive: a
            // downward step at the floor drops to device-default mode.
            // Without it the floor is inclusive and the value just clamps.
            let should_adjust = if policy {
                controller.brightness() > 0.0 || direction > 0
            } else {
                controller.brightness() >= 0.0 || direction >= 0
            };
            let outcome = if should_adjust {
                controller.set_brightness(controller.brightness() + f64::from(direction))
            } else {
                controller.restore_default()
            };
            if let Err(err) = outcome {
                warn!(error = %err, "brightness step failed");
            }
            overlay.on_brightness_changed(controller.brightness());
        });
    }

    fn reset_scroller(&mut self) {
        self.volume_scroller.reset();
        self.brightness_scroller.reset();
    }
}
