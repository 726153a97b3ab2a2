use anyhow::Result;

use crate::system::brightness::BrightnessBackend;

/// Raw brightness value meaning "device default / auto brightness".
pub const BRIGHTNESS_DEFAULT: f64 = -1.0;

/// Percent brightness control over a [`BrightnessBackend`], with a sentinel
/// state for the device-default/auto mode.
pub struct ScreenBrightnessController<B: BrightnessBackend> {
    backend: B,
    brightness: f64,
}

impl<B: BrightnessBackend> ScreenBrightnessController<B> {
    pub fn new(backend: B) -> Result<Self> {
        let brightness = backend.get_brightness()?.clamp(0.0, 100.0);
        Ok(Self {
            backend,
            brightness,
        })
    }

    /// Current raw brightness: `[0, 100]`, or [`BRIGHTNESS_DEFAULT`] while in
    /// device-default mode.
    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn set_brightness(&mut self, value: f64) -> Result<()> {
        self.brightness = self.backend.set_brightness(value.clamp(0.0, 100.0))?;
        Ok(())
    }

    /// Hand control back to the device's default brightness behavior.
    pub fn restore_default(&mut self) -> Result<()> {
        self.backend.restore_default()?;
        self.brightness = BRIGHTNESS_DEFAULT;
        Ok(())
    }
}
