use anyhow::Result;

use crate::system::audio::AudioBackend;

/// Clamped integer volume control over an [`AudioBackend`].
pub struct AudioVolumeController<A: AudioBackend> {
    backend: A,
    volume: i32,
    max_volume: i32,
}

impl<A: AudioBackend> AudioVolumeController<A> {
    pub fn new(backend: A) -> Result<Self> {
        let max_volume = backend.max_volume().max(1);
        let volume = backend.get_volume()?.clamp(0, max_volume);
        Ok(Self {
            backend,
            volume,
            max_volume,
        })
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn max_volume(&self) -> i32 {
        self.max_volume
    }

    pub fn set_volume(&mut self, volume: i32) -> Result<()> {
        let target = volume.clamp(0, self.max_volume);
        self.volume = self.backend.set_volume(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::audio::tests::MockAudioBackend;

    #[test]
    fn volume_is_clamped_to_range() {
        let backend = MockAudioBackend::with_volume(14, 15);
        let mut controller = AudioVolumeController::new(backend.clone()).expect("init");

        controller.set_volume(99).expect("set");
        assert_eq!(controller.volume(), 15);

        controller.set_volume(-3).expect("set");
        assert_eq!(controller.volume(), 0);
        assert_eq!(backend.inner.lock().unwrap().history, vec![15, 0]);
    }

    #[test]
    fn initial_volume_read_from_backend() {
        let controller =
            AudioVolumeController::new(MockAudioBackend::with_volume(5, 15)).expect("init");
        assert_eq!(controller.volume(), 5);
        assert_eq!(controller.max_volume(), 15);
    }
}
