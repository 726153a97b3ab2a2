use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::geometry::Rectangle;

/// User-facing settings for the swipe control surface. All values are
/// validated or clamped here; the core components assume in-range inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwipeSettings {
    pub enable_volume: bool,
    pub enable_brightness: bool,
    /// Width of each swipe zone as a percentage of the effective player
    /// width, clamped into `[0, 50]`.
    pub zone_width_percent: i32,
    /// Keep swipe controls usable while the screen is locked.
    pub swipe_lock_mode: bool,
    pub haptic_feedback: bool,
    /// Swiping below the lowest brightness hands control back to the
    /// device's auto-brightness mode.
    pub lowest_value_enables_auto_brightness: bool,
    pub long_press_ms: u64,
    pub tap_slop: f64,
    /// Scroll distance per volume step, in surface units.
    pub volume_unit_distance: f64,
    /// Scroll distance per brightness step, in surface units.
    pub brightness_unit_distance: f64,
    pub overlay_timeout_ms: u64,
    pub pulse_sink: Option<String>,
    pub monitor_display: Option<String>,
    pub monitor_bus: Option<u8>,
    /// Brightness level restored when entering device-default mode.
    pub brightness_default_level: u8,
    /// Screen rectangle used until the first player layout is observed.
    pub fallback_screen: Rectangle,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            enable_volume: true,
            enable_brightness: true,
            zone_width_percent: 30,
            swipe_lock_mode: false,
            haptic_feedback: true,
            lowest_value_enables_auto_brightness: true,
            long_press_ms: 500,
            tap_slop: 30.0,
            volume_unit_distance: 30.0,
            brightness_unit_distance: 3.0,
            overlay_timeout_ms: 500,
            pulse_sink: None,
            monitor_display: None,
            monitor_bus: None,
            brightness_default_level: 100,
            fallback_screen: Rectangle::new(0, 0, 1080, 1920),
        }
    }
}

impl SwipeSettings {
    fn validated(mut self) -> Self {
        if !(0..=50).contains(&self.zone_width_percent) {
            warn!(
                value = self.zone_width_percent,
                "zone_width_percent out of range, clamping into [0, 50]"
            );
            self.zone_width_percent = self.zone_width_percent.clamp(0, 50);
        }
        if self.volume_unit_distance <= 0.0 {
            warn!("volume_unit_distance must be positive, using default");
            self.volume_unit_distance = Self::default().volume_unit_distance;
        }
        if self.brightness_unit_distance <= 0.0 {
            warn!("brightness_unit_distance must be positive, using default");
            self.brightness_unit_distance = Self::default().brightness_unit_distance;
        }
        self
    }
}

/// Load settings from the first configuration file found, falling back to
/// defaults when none exists.
pub fn load_settings() -> Result<SwipeSettings> {
    for candidate in default_config_paths() {
        if !candidate.exists() {
            continue;
        }
        let contents = fs::read_to_string(&candidate).with_context(|| {
            format!("failed to read swipectl configuration at {}", candidate.display())
        })?;
        let settings = parse_settings(&contents).with_context(|| {
            format!("failed to parse swipectl configuration at {}", candidate.display())
        })?;
        return Ok(settings);
    }
    Ok(SwipeSettings::default())
}

fn parse_settings(contents: &str) -> Result<SwipeSettings> {
    let settings: SwipeSettings =
        serde_json::from_str(contents).context("configuration file is not valid JSON")?;
    Ok(settings.validated())
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(explicit) = env::var_os("SWIPECTL_CONFIG") {
        paths.push(PathBuf::from(explicit));
    }

    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("swipectl/swipectl.json"));
    }

    if let Some(home) = env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".config/swipectl/swipectl.json"));
    }

    paths.push(PathBuf::from("swipectl.json"));
    paths.push(PathBuf::from("config/swipectl.json"));

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let settings = parse_settings(r#"{"zone_width_percent": 40}"#).unwrap();
        assert_eq!(settings.zone_width_percent, 40);
        assert!(settings.enable_volume);
        assert_eq!(settings.long_press_ms, 500);
        assert_eq!(settings.fallback_screen, Rectangle::new(0, 0, 1080, 1920));
    }

    #[test]
    fn out_of_range_zone_width_is_clamped() {
        let settings = parse_settings(r#"{"zone_width_percent": 80}"#).unwrap();
        assert_eq!(settings.zone_width_percent, 50);

        let settings = parse_settings(r#"{"zone_width_percent": -5}"#).unwrap();
        assert_eq!(settings.zone_width_percent, 0);
    }

    #[test]
    fn non_positive_unit_distances_are_rejected() {
        let settings = parse_settings(r#"{"volume_unit_distance": 0.0}"#).unwrap();
        assert_eq!(settings.volume_unit_distance, 30.0);
    }

    #[test]
    fn reads_settings_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swipectl.json");
        fs::write(
            &path,
            r#"{
                "enable_brightness": false,
                "zone_width_percent": 25,
                "pulse_sink": "alsa_output.hdmi"
            }"#,
        )
        .unwrap();

        let settings =
            parse_settings(&fs::read_to_string(&path).expect("failed to read written config"))
                .unwrap();
        assert!(!settings.enable_brightness);
        assert_eq!(settings.zone_width_percent, 25);
        assert_eq!(settings.pulse_sink.as_deref(), Some("alsa_output.hdmi"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_settings("not json").is_err());
    }
}
