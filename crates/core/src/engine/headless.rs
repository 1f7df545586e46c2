use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::engine::{
    Color, FontBackend, FontHandle, MusicBackend, MusicHandle, SfxBackend, SoundHandle, Vec2,
    WaveHandle,
};
use crate::{ResourceError, Result};

/// Engine implementation with no native library behind it.
///
/// Loads always succeed, handles stay valid until unloaded, and control
/// calls are logged at `debug` level instead of touching real hardware.
/// The app shell uses it to run headless, and it doubles as a smoke-test
/// backend for downstream crates.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    next_id: AtomicU64,
    state: Mutex<EngineState>,
}

#[derive(Debug, Default)]
struct EngineState {
    fonts: HashSet<u64>,
    waves: HashSet<u64>,
    sounds: HashSet<u64>,
    music: HashSet<u64>,
    playing_sounds: HashSet<u64>,
    playing_music: HashSet<u64>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // Handle bookkeeping stays usable even after a panicked frame.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_music(&self, handle: MusicHandle) -> Result<()> {
        if self.lock().music.contains(&handle.raw()) {
            Ok(())
        } else {
            Err(ResourceError::StreamNotValid {
                path: format!("music handle {}", handle.raw()),
            })
        }
    }

    fn check_sound(&self, handle: SoundHandle) -> Result<()> {
        if self.lock().sounds.contains(&handle.raw()) {
            Ok(())
        } else {
            Err(ResourceError::StreamNotValid {
                path: format!("sound handle {}", handle.raw()),
            })
        }
    }
}

impl FontBackend for HeadlessEngine {
    fn load_font(&self, path: &str) -> Result<FontHandle> {
        let id = self.issue();
        self.lock().fonts.insert(id);
        tracing::debug!(path, id, "loaded font");
        Ok(FontHandle::from_raw(id))
    }

    fn font_is_valid(&self, handle: FontHandle) -> bool {
        self.lock().fonts.contains(&handle.raw())
    }

    fn unload_font(&self, handle: FontHandle) {
        self.lock().fonts.remove(&handle.raw());
        tracing::debug!(id = handle.raw(), "unloaded font");
    }

    fn draw_text(
        &self,
        handle: FontHandle,
        text: &str,
        position: Vec2,
        color: Color,
        size: f32,
        spacing: f32,
    ) -> Result<()> {
        if !self.font_is_valid(handle) {
            return Err(ResourceError::StreamNotValid {
                path: format!("font handle {}", handle.raw()),
            });
        }
        tracing::debug!(
            text,
            x = position.x,
            y = position.y,
            ?color,
            size,
            spacing,
            "draw text"
        );
        Ok(())
    }
}

impl SfxBackend for HeadlessEngine {
    fn load_sound(&self, path: &str) -> Result<SoundHandle> {
        let id = self.issue();
        self.lock().sounds.insert(id);
        tracing::debug!(path, id, "loaded sound");
        Ok(SoundHandle::from_raw(id))
    }

    fn load_wave_from_memory(&self, format: &str, bytes: &[u8]) -> Result<WaveHandle> {
        if bytes.is_empty() {
            return Err(ResourceError::InvalidEncoding {
                format: format.to_string(),
                reason: "empty buffer".to_string(),
            });
        }
        let id = self.issue();
        self.lock().waves.insert(id);
        tracing::debug!(format, len = bytes.len(), id, "decoded wave from memory");
        Ok(WaveHandle::from_raw(id))
    }

    fn sound_from_wave(&self, wave: WaveHandle) -> Result<SoundHandle> {
        if !self.lock().waves.contains(&wave.raw()) {
            return Err(ResourceError::StreamNotValid {
                path: format!("wave handle {}", wave.raw()),
            });
        }
        let id = self.issue();
        self.lock().sounds.insert(id);
        Ok(SoundHandle::from_raw(id))
    }

    fn unload_wave(&self, wave: WaveHandle) {
        self.lock().waves.remove(&wave.raw());
    }

    fn sound_is_valid(&self, handle: SoundHandle) -> bool {
        self.lock().sounds.contains(&handle.raw())
    }

    fn unload_sound(&self, handle: SoundHandle) {
        let mut state = self.lock();
        state.sounds.remove(&handle.raw());
        state.playing_sounds.remove(&handle.raw());
        tracing::debug!(id = handle.raw(), "unloaded sound");
    }

    fn play_sound(&self, handle: SoundHandle) -> Result<()> {
        self.check_sound(handle)?;
        self.lock().playing_sounds.insert(handle.raw());
        Ok(())
    }

    fn stop_sound(&self, handle: SoundHandle) -> Result<()> {
        self.check_sound(handle)?;
        self.lock().playing_sounds.remove(&handle.raw());
        Ok(())
    }

    fn pause_sound(&self, handle: SoundHandle) -> Result<()> {
        self.check_sound(handle)?;
        self.lock().playing_sounds.remove(&handle.raw());
        Ok(())
    }

    fn resume_sound(&self, handle: SoundHandle) -> Result<()> {
        self.check_sound(handle)?;
        self.lock().playing_sounds.insert(handle.raw());
        Ok(())
    }

    fn sound_is_playing(&self, handle: SoundHandle) -> bool {
        self.lock().playing_sounds.contains(&handle.raw())
    }

    fn set_sound_pitch(&self, handle: SoundHandle, pitch: f32) -> Result<()> {
        self.check_sound(handle)?;
        tracing::debug!(id = handle.raw(), pitch, "set sound pitch");
        Ok(())
    }

    fn set_sound_pan(&self, handle: SoundHandle, pan: f32) -> Result<()> {
        self.check_sound(handle)?;
        tracing::debug!(id = handle.raw(), pan, "set sound pan");
        Ok(())
    }

    fn set_sound_volume(&self, handle: SoundHandle, volume: f32) -> Result<()> {
        self.check_sound(handle)?;
        tracing::debug!(id = handle.raw(), volume, "set sound volume");
        Ok(())
    }
}

impl MusicBackend for HeadlessEngine {
    fn load_music(&self, path: &str) -> Result<MusicHandle> {
        let id = self.issue();
        self.lock().music.insert(id);
        tracing::debug!(path, id, "loaded music stream");
        Ok(MusicHandle::from_raw(id))
    }

    fn music_is_valid(&self, handle: MusicHandle) -> bool {
        self.lock().music.contains(&handle.raw())
    }

    fn unload_music(&self, handle: MusicHandle) {
        let mut state = self.lock();
        state.music.remove(&handle.raw());
        state.playing_music.remove(&handle.raw());
        tracing::debug!(id = handle.raw(), "unloaded music stream");
    }

    fn play_music(&self, handle: MusicHandle) -> Result<()> {
        self.check_music(handle)?;
        self.lock().playing_music.insert(handle.raw());
        Ok(())
    }

    fn stop_music(&self, handle: MusicHandle) -> Result<()> {
        self.check_music(handle)?;
        self.lock().playing_music.remove(&handle.raw());
        Ok(())
    }

    fn pause_music(&self, handle: MusicHandle) -> Result<()> {
        self.check_music(handle)?;
        self.lock().playing_music.remove(&handle.raw());
        Ok(())
    }

    fn resume_music(&self, handle: MusicHandle) -> Result<()> {
        self.check_music(handle)?;
        self.lock().playing_music.insert(handle.raw());
        Ok(())
    }

    fn music_is_playing(&self, handle: MusicHandle) -> bool {
        self.lock().playing_music.contains(&handle.raw())
    }

    fn seek_music(&self, handle: MusicHandle, seconds: f32) -> Result<()> {
        self.check_music(handle)?;
        tracing::debug!(id = handle.raw(), seconds, "seek music");
        Ok(())
    }

    fn set_music_pitch(&self, handle: MusicHandle, pitch: f32) -> Result<()> {
        self.check_music(handle)?;
        tracing::debug!(id = handle.raw(), pitch, "set music pitch");
        Ok(())
    }

    fn set_music_pan(&self, handle: MusicHandle, pan: f32) -> Result<()> {
        self.check_music(handle)?;
        tracing::debug!(id = handle.raw(), pan, "set music pan");
        Ok(())
    }

    fn set_music_volume(&self, handle: MusicHandle, volume: f32) -> Result<()> {
        self.check_music(handle)?;
        tracing::debug!(id = handle.raw(), volume, "set music volume");
        Ok(())
    }

    fn pump_music(&self, handle: MusicHandle) -> Result<bool> {
        self.check_music(handle)?;
        Ok(self.music_is_playing(handle))
    }
}
