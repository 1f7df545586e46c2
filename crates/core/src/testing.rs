//! Scriptable engine double shared by the unit tests.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::engine::{
    Color, FontBackend, FontHandle, MusicBackend, MusicHandle, SfxBackend, SoundHandle, Vec2,
    WaveHandle,
};
use crate::{ResourceError, Result};

/// Arguments of a recorded `draw_text` call.
#[derive(Debug, Clone)]
pub(crate) struct DrawCall {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
    pub size: f32,
    pub spacing: f32,
}

/// Engine double that records every call and can be scripted to fail
/// decodes or report every handle invalid.
#[derive(Debug, Default)]
pub(crate) struct ScriptedEngine {
    next_id: AtomicU64,
    valid: AtomicBool,
    decode_ok: AtomicBool,
    convert_ok: AtomicBool,
    params_ok: AtomicBool,
    pumps: AtomicU64,
    playing: Mutex<HashSet<u64>>,
    ops: Mutex<Vec<&'static str>>,
    unloads: Mutex<Vec<&'static str>>,
    draws: Mutex<Vec<DrawCall>>,
    files: Mutex<Vec<NamedTempFile>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let engine = Self::default();
        engine.valid.store(true, Ordering::Relaxed);
        engine.decode_ok.store(true, Ordering::Relaxed);
        engine.convert_ok.store(true, Ordering::Relaxed);
        engine.params_ok.store(true, Ordering::Relaxed);
        engine
    }

    /// Creates a real file whose lifetime is tied to the engine and returns
    /// its path, for constructors that probe the filesystem.
    pub fn keep_file(&self) -> PathBuf {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.path().to_path_buf();
        self.files.lock().unwrap().push(file);
        path
    }

    /// All subsequent validity queries report false.
    pub fn invalidate_handles(&self) {
        self.valid.store(false, Ordering::Relaxed);
    }

    /// All subsequent memory decodes fail.
    pub fn fail_decodes(&self) {
        self.decode_ok.store(false, Ordering::Relaxed);
    }

    /// All subsequent wave-to-sound conversions fail.
    pub fn fail_conversions(&self) {
        self.convert_ok.store(false, Ordering::Relaxed);
    }

    /// All subsequent pitch/pan/volume sets fail at the engine.
    pub fn fail_param_sets(&self) {
        self.params_ok.store(false, Ordering::Relaxed);
    }

    fn check_params(&self) -> Result<()> {
        if self.params_ok.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(ResourceError::StreamNotValid {
                path: "scripted parameter failure".to_string(),
            })
        }
    }

    /// Simulates the engine reaching end of playback on everything.
    pub fn finish_all_playback(&self) {
        self.playing.lock().unwrap().clear();
    }

    pub fn pump_count(&self) -> u64 {
        self.pumps.load(Ordering::Relaxed)
    }

    pub fn params_of(&self, op: &str) -> usize {
        self.ops.lock().unwrap().iter().filter(|o| **o == op).count()
    }

    pub fn unloads_of(&self, kind: &str) -> usize {
        self.unloads
            .lock()
            .unwrap()
            .iter()
            .filter(|k| **k == kind)
            .count()
    }

    pub fn last_draw(&self) -> Option<DrawCall> {
        self.draws.lock().unwrap().last().cloned()
    }

    fn issue(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    fn record(&self, op: &'static str) {
        self.ops.lock().unwrap().push(op);
    }

    fn playing(&self) -> MutexGuard<'_, HashSet<u64>> {
        self.playing.lock().unwrap()
    }
}

impl FontBackend for ScriptedEngine {
    fn load_font(&self, _path: &str) -> Result<FontHandle> {
        Ok(FontHandle::from_raw(self.issue()))
    }

    fn font_is_valid(&self, _handle: FontHandle) -> bool {
        self.is_valid()
    }

    fn unload_font(&self, _handle: FontHandle) {
        self.unloads.lock().unwrap().push("font");
    }

    fn draw_text(
        &self,
        _handle: FontHandle,
        text: &str,
        position: Vec2,
        color: Color,
        size: f32,
        spacing: f32,
    ) -> Result<()> {
        self.draws.lock().unwrap().push(DrawCall {
            text: text.to_string(),
            position,
            color,
            size,
            spacing,
        });
        Ok(())
    }
}

impl SfxBackend for ScriptedEngine {
    fn load_sound(&self, _path: &str) -> Result<SoundHandle> {
        Ok(SoundHandle::from_raw(self.issue()))
    }

    fn load_wave_from_memory(&self, format: &str, _bytes: &[u8]) -> Result<WaveHandle> {
        if !self.decode_ok.load(Ordering::Relaxed) {
            return Err(ResourceError::InvalidEncoding {
                format: format.to_string(),
                reason: "scripted decode failure".to_string(),
            });
        }
        Ok(WaveHandle::from_raw(self.issue()))
    }

    fn sound_from_wave(&self, _wave: WaveHandle) -> Result<SoundHandle> {
        if !self.convert_ok.load(Ordering::Relaxed) {
            return Err(ResourceError::StreamNotValid {
                path: "scripted conversion failure".to_string(),
            });
        }
        Ok(SoundHandle::from_raw(self.issue()))
    }

    fn unload_wave(&self, _wave: WaveHandle) {
        self.unloads.lock().unwrap().push("wave");
    }

    fn sound_is_valid(&self, _handle: SoundHandle) -> bool {
        self.is_valid()
    }

    fn unload_sound(&self, _handle: SoundHandle) {
        self.unloads.lock().unwrap().push("sound");
    }

    fn play_sound(&self, handle: SoundHandle) -> Result<()> {
        self.record("sound_play");
        self.playing().insert(handle.raw());
        Ok(())
    }

    fn stop_sound(&self, handle: SoundHandle) -> Result<()> {
        self.record("sound_stop");
        self.playing().remove(&handle.raw());
        Ok(())
    }

    fn pause_sound(&self, handle: SoundHandle) -> Result<()> {
        self.record("sound_pause");
        self.playing().remove(&handle.raw());
        Ok(())
    }

    fn resume_sound(&self, handle: SoundHandle) -> Result<()> {
        self.record("sound_resume");
        self.playing().insert(handle.raw());
        Ok(())
    }

    fn sound_is_playing(&self, handle: SoundHandle) -> bool {
        self.playing().contains(&handle.raw())
    }

    fn set_sound_pitch(&self, _handle: SoundHandle, _pitch: f32) -> Result<()> {
        self.check_params()?;
        self.record("sound_pitch");
        Ok(())
    }

    fn set_sound_pan(&self, _handle: SoundHandle, _pan: f32) -> Result<()> {
        self.check_params()?;
        self.record("sound_pan");
        Ok(())
    }

    fn set_sound_volume(&self, _handle: SoundHandle, _volume: f32) -> Result<()> {
        self.check_params()?;
        self.record("sound_volume");
        Ok(())
    }
}

impl MusicBackend for ScriptedEngine {
    fn load_music(&self, _path: &str) -> Result<MusicHandle> {
        Ok(MusicHandle::from_raw(self.issue()))
    }

    fn music_is_valid(&self, _handle: MusicHandle) -> bool {
        self.is_valid()
    }

    fn unload_music(&self, _handle: MusicHandle) {
        self.unloads.lock().unwrap().push("music");
    }

    fn play_music(&self, handle: MusicHandle) -> Result<()> {
        self.record("music_play");
        self.playing().insert(handle.raw());
        Ok(())
    }

    fn stop_music(&self, handle: MusicHandle) -> Result<()> {
        self.record("music_stop");
        self.playing().remove(&handle.raw());
        Ok(())
    }

    fn pause_music(&self, handle: MusicHandle) -> Result<()> {
        self.record("music_pause");
        self.playing().remove(&handle.raw());
        Ok(())
    }

    fn resume_music(&self, handle: MusicHandle) -> Result<()> {
        self.record("music_resume");
        self.playing().insert(handle.raw());
        Ok(())
    }

    fn music_is_playing(&self, handle: MusicHandle) -> bool {
        self.playing().contains(&handle.raw())
    }

    fn seek_music(&self, _handle: MusicHandle, _seconds: f32) -> Result<()> {
        self.record("music_seek");
        Ok(())
    }

    fn set_music_pitch(&self, _handle: MusicHandle, _pitch: f32) -> Result<()> {
        self.check_params()?;
        self.record("music_pitch");
        Ok(())
    }

    fn set_music_pan(&self, _handle: MusicHandle, _pan: f32) -> Result<()> {
        self.check_params()?;
        self.record("music_pan");
        Ok(())
    }

    fn set_music_volume(&self, _handle: MusicHandle, _volume: f32) -> Result<()> {
        self.check_params()?;
        self.record("music_volume");
        Ok(())
    }

    fn pump_music(&self, handle: MusicHandle) -> Result<bool> {
        self.pumps.fetch_add(1, Ordering::Relaxed);
        Ok(self.music_is_playing(handle))
    }
}
