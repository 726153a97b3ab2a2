mod brightness;
mod scroller;
mod volume;

pub use brightness::ScreenBrightnessController;
pub use scroller::VolumeAndBrightnessScrollerImpl;
pub use volume::AudioVolumeController;

/// Converts scroll distances into volume and brightness adjustments.
pub trait VolumeAndBrightnessScroller {
    /// Submit scrolled distance for volume adjustment.
    fn scroll_volume(&mut self, distance: f64);

    /// Submit scrolled distance for brightness adjustment.
    fn scroll_brightness(&mut self, distance: f64);

    /// Zero all accumulated scroll distance without side effects. Called
    /// whenever a swipe session ends.
    fn reset_scroller(&mut self);
}
