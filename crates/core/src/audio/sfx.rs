use std::path::Path;
use std::sync::Arc;

use crate::audio::AudioElement;
use crate::config::AudioDefaults;
use crate::engine::{SfxBackend, SoundHandle};
use crate::{ResourceError, ResourceKind, Result};

/// Owning wrapper around a one-shot native sound.
///
/// The handle is released exactly once, either through [`Self::dispose`] or
/// when the wrapper is dropped, whichever comes first. Control operations
/// after disposal fail with [`ResourceError::StreamNotValid`] instead of
/// touching a dead handle.
#[derive(Debug)]
pub struct SfxResource<E: SfxBackend> {
    engine: Arc<E>,
    handle: Option<SoundHandle>,
    path: String,
    defaults: AudioDefaults,
    pitch: f32,
    pan: f32,
    volume: f32,
}

impl<E: SfxBackend> SfxResource<E> {
    /// Loads a sound effect from a file path relative to the process working
    /// directory. Fails with [`ResourceError::AssetNotFound`] when the path
    /// does not resolve, without constructing a partial resource.
    pub fn from_file(engine: Arc<E>, path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(engine, path, AudioDefaults::default())
    }

    /// Same as [`Self::from_file`] with explicit default parameters.
    pub fn from_file_with(
        engine: Arc<E>,
        path: impl AsRef<Path>,
        defaults: AudioDefaults,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ResourceError::AssetNotFound {
                kind: ResourceKind::Sfx,
                path: path.to_path_buf(),
                context: "loading sound effect",
            });
        }
        let path = path.to_string_lossy().into_owned();
        let handle = engine.load_sound(&path)?;
        tracing::debug!(path, "sound effect loaded");
        Ok(Self::assemble(engine, handle, path, defaults))
    }

    /// Decodes an encoded buffer tagged with a container format (for example
    /// `"ogg"`) into a playable sound. The intermediate waveform the decode
    /// produces is released before this returns, whether or not the
    /// conversion to a playable handle succeeded. Failure surfaces as
    /// [`ResourceError::InvalidEncoding`]; no file-existence check applies.
    pub fn from_memory(engine: Arc<E>, format: &str, bytes: &[u8]) -> Result<Self> {
        Self::from_memory_with(engine, format, bytes, AudioDefaults::default())
    }

    /// Same as [`Self::from_memory`] with explicit default parameters.
    pub fn from_memory_with(
        engine: Arc<E>,
        format: &str,
        bytes: &[u8],
        defaults: AudioDefaults,
    ) -> Result<Self> {
        let wave = engine.load_wave_from_memory(format, bytes)?;
        let sound = engine.sound_from_wave(wave);
        engine.unload_wave(wave);
        let handle = sound?;
        let path = format!("memory:{format}");
        tracing::debug!(format, len = bytes.len(), "sound effect decoded from memory");
        Ok(Self::assemble(engine, handle, path, defaults))
    }

    fn assemble(engine: Arc<E>, handle: SoundHandle, path: String, defaults: AudioDefaults) -> Self {
        Self {
            engine,
            handle: Some(handle),
            path,
            defaults,
            pitch: defaults.pitch,
            pan: defaults.pan,
            volume: defaults.volume,
        }
    }

    fn ensure_valid(&self) -> Result<SoundHandle> {
        match self.handle {
            Some(handle) if self.engine.sound_is_valid(handle) => Ok(handle),
            _ => {
                tracing::warn!(path = %self.path, "sound handle is not valid, refusing operation");
                Err(ResourceError::StreamNotValid {
                    path: self.path.clone(),
                })
            }
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Releases the native handle. Safe to call more than once; only the
    /// first call reaches the engine.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.unload_sound(handle);
            tracing::debug!(path = %self.path, "sound effect released");
        }
    }
}

impl<E: SfxBackend> AudioElement for SfxResource<E> {
    /// Triggers playback from the start every time.
    fn play(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.play_sound(handle)
    }

    fn stop(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.stop_sound(handle)
    }

    fn pause(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.pause_sound(handle)
    }

    fn resume(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.resume_sound(handle)
    }

    /// One-shot sounds have no seek cursor.
    fn seek(&mut self, _seconds: f32) -> Result<()> {
        Err(ResourceError::UnsupportedOperation {
            operation: "seek",
            kind: ResourceKind::Sfx,
        })
    }

    fn control_pitch(&mut self, pitch: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_sound_pitch(handle, pitch)?;
        self.pitch = pitch;
        Ok(())
    }

    fn control_pan(&mut self, pan: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_sound_pan(handle, pan)?;
        self.pan = pan;
        Ok(())
    }

    fn control_volume(&mut self, volume: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_sound_volume(handle, volume)?;
        self.volume = volume;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        match self.handle {
            Some(handle) => self.engine.sound_is_playing(handle),
            None => false,
        }
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn defaults(&self) -> AudioDefaults {
        self.defaults
    }
}

impl<E: SfxBackend> Drop for SfxResource<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
