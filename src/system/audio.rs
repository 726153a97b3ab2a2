use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";
static PACTL_AVAILABLE: Lazy<bool> = Lazy::new(|| {
    Command::new("pactl")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
});
static WARNED_UNAVAILABLE: AtomicBool = AtomicBool::new(false);

/// Platform boundary for the audio volume output. Volume is an
/// integer-scaled value in `[0, max_volume]`.
pub trait AudioBackend: Send {
    fn get_volume(&self) -> Result<i32>;
    fn set_volume(&self, volume: i32) -> Result<i32>;
    fn max_volume(&self) -> i32;
    fn is_available(&self) -> bool {
        true
    }
}

/// Drives the system volume through the PulseAudio CLI. Volume scale is
/// percent, so `max_volume` is 100.
pub struct PulseAudioBackend {
    sink: String,
    available: Arc<AtomicBool>,
}

impl Clone for PulseAudioBackend {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            available: Arc::clone(&self.available),
        }
    }
}

impl Default for PulseAudioBackend {
    fn default() -> Self {
        Self {
            sink: DEFAULT_SINK.to_string(),
            available: Arc::new(AtomicBool::new(*PACTL_AVAILABLE)),
        }
    }
}

impl PulseAudioBackend {
    pub fn new(sink: impl Into<String>) -> Self {
        Self {
            sink: sink.into(),
            available: Arc::new(AtomicBool::new(*PACTL_AVAILABLE)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn run_pactl(&self, args: &[String]) -> Result<String> {
        if !self.is_available() {
            bail!("pactl not available");
        }

        let output = Command::new("pactl")
            .args(args)
            .output()
            .with_context(|| format!("failed to execute pactl with args {args:?}"))?;

        if !output.status.success() {
            let message = format!(
                "pactl exited with status {}",
                output.status.code().unwrap_or(-1)
            );
            self.mark_unavailable(message.clone());
            bail!(message);
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn mark_unavailable(&self, reason: impl Into<String>) {
        if self.available.swap(false, Ordering::Relaxed) {
            let reason = reason.into();
            warn_backend_disabled(&reason);
        }
    }
}

impl std::fmt::Debug for PulseAudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseAudioBackend")
            .field("sink", &self.sink)
            .field("available", &self.available.load(Ordering::Relaxed))
            .finish()
    }
}

impl AudioBackend for PulseAudioBackend {
    fn get_volume(&self) -> Result<i32> {
        if !self.is_available() {
            return Ok(0);
        }

        static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)%").unwrap());
        let output = match self.run_pactl(&[String::from("get-sink-volume"), self.sink.clone()]) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "pactl get-sink-volume failed; disabling PulseAudio backend");
                self.mark_unavailable(err.to_string());
                return Ok(0);
            }
        };
        let captures = match PERCENT_RE.captures_iter(&output).next() {
            Some(capture) => capture,
            None => {
                warn!("could not parse pactl volume output: {output}");
                self.mark_unavailable("unexpected pactl volume output");
                return Ok(0);
            }
        };
        let value = captures
            .get(1)
            .ok_or_else(|| anyhow!("missing capture group for volume"))?
            .as_str()
            .parse::<i32>()
            .context("failed to parse volume percentage")?;
        Ok(value.min(self.max_volume()))
    }

    fn set_volume(&self, volume: i32) -> Result<i32> {
        let target = volume.clamp(0, self.max_volume());
        if !self.is_available() {
            return Ok(target);
        }

        if let Err(err) = self.run_pactl(&[
            String::from("set-sink-volume"),
            self.sink.clone(),
            format!("{target}%"),
        ]) {
            warn!(error = %err, "pactl set-sink-volume failed; disabling PulseAudio backend");
            self.mark_unavailable(err.to_string());
            return Ok(target);
        }

        self.get_volume()
    }

    fn max_volume(&self) -> i32 {
        100
    }

    fn is_available(&self) -> bool {
        PulseAudioBackend::is_available(self)
    }
}

fn warn_backend_disabled(reason: &str) {
    if !WARNED_UNAVAILABLE.swap(true, Ordering::Relaxed) {
        warn!("PulseAudio backend disabled ({reason}); volume swipes are no-ops");
    }
}
