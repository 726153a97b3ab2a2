use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static DDCUTIL_AVAILABLE: Lazy<bool> = Lazy::new(|| {
    Command::new("ddcutil")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
});
static WARNED_UNAVAILABLE: AtomicBool = AtomicBool::new(false);

/// Platform boundary for the screen brightness output. Brightness is a
/// percentage in `[0, 100]`; `restore_default` hands control back to the
/// device's default/auto behavior.
pub trait BrightnessBackend: Send {
    fn get_brightness(&self) -> Result<f64>;
    fn set_brightness(&self, value: f64) -> Result<f64>;
    fn restore_default(&self) -> Result<()>;
    fn is_available(&self) -> bool {
        true
    }
}

/// Drives monitor brightness over DDC/CI via the ddcutil CLI.
pub struct DdcutilBackend {
    pub display: Option<String>,
    pub bus: Option<u8>,
    default_level: u8,
    available: Arc<AtomicBool>,
}

impl Clone for DdcutilBackend {
    fn clone(&self) -> Self {
        Self {
            display: self.display.clone(),
            bus: self.bus,
            default_level: self.default_level,
            available: Arc::clone(&self.available),
        }
    }
}

impl Default for DdcutilBackend {
    fn default() -> Self {
        Self::new(None, None, 100)
    }
}

impl std::fmt::Debug for DdcutilBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdcutilBackend")
            .field("display", &self.display)
            .field("bus", &self.bus)
            .field("default_level", &self.default_level)
            .field("available", &self.available.load(Ordering::Relaxed))
            .finish()
    }
}

impl DdcutilBackend {
    pub fn new(display: Option<String>, bus: Option<u8>, default_level: u8) -> Self {
        Self {
            display,
            bus,
            default_level: default_level.min(100),
            available: Arc::new(AtomicBool::new(*DDCUTIL_AVAILABLE)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn spawn_command(&self, command: &str, value: Option<String>) -> Result<String> {
        if !self.is_available() {
            bail!("ddcutil not available");
        }

        let mut cmd = Command::new("ddcutil");
        match command {
            "getvcp" => {
                cmd.arg("getvcp").arg("10");
            }
            "setvcp" => {
                cmd.arg("setvcp").arg("10");
                if let Some(value) = value {
                    cmd.arg(value);
                }
            }
            other => return Err(anyhow!("unsupported ddcutil command: {other}")),
        }

        if let Some(display) = &self.display {
            cmd.arg("--display").arg(display);
        }
        if let Some(bus) = self.bus {
            cmd.arg("--bus").arg(bus.to_string());
        }

        let output = cmd
            .output()
            .with_context(|| format!("failed to execute {cmd:?}"))?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            self.mark_unavailable(format!("ddcutil exited with {code}"));
            bail!("ddcutil exited with {code}");
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

impl BrightnessBackend for DdcutilBackend {
    fn get_brightness(&self) -> Result<f64> {
        if !self.is_available() {
            return Ok(100.0);
        }

        static BRIGHT_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"current value\s*=\s*(\d+)").unwrap());
        let output = match self.spawn_command("getvcp", None) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "ddcutil getvcp failed; disabling brightness backend");
                self.mark_unavailable(err.to_string());
                return Ok(100.0);
            }
        };
        let captures = match BRIGHT_RE.captures(&output).and_then(|cap| cap.get(1)) {
            Some(capture) => capture,
            None => {
                warn!("unable to parse brightness from {output}");
                self.mark_unavailable("unexpected ddcutil getvcp output");
                return Ok(100.0);
            }
        };
        let value = captures
            .as_str()
            .parse::<u16>()
            .context("failed to parse brightness value")?;
        Ok(f64::from(value.min(100)))
    }

    fn set_brightness(&self, value: f64) -> Result<f64> {
        let target = value.clamp(0.0, 100.0);
        if !self.is_available() {
            return Ok(target);
        }

        let level = target.round() as u8;
        if let Err(err) = self.spawn_command("setvcp", Some(level.to_string())) {
            warn!(error = %err, "ddcutil setvcp failed; disabling brightness backend");
            self.mark_unavailable(err.to_string());
            return Ok(target);
        }
        self.get_brightness()
    }

    fn restore_default(&self) -> Result<()> {
        if !self.is_available() {
            return Ok(());
        }

        if let Err(err) = self.spawn_command("setvcp", Some(self.default_level.to_string())) {
            warn!(error = %err, "ddcutil setvcp failed; disabling brightness backend");
            self.mark_unavailable(err.to_string());
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        DdcutilBackend::is_available(self)
    }
}

fn warn_backend_disabled(reason: &str) {
    if !WARNED_UNAVAILABLE.swap(true, Ordering::Relaxed) {
        warn!("ddcutil backend disabled ({reason}); brightness swipes are no-ops");
    }
}
