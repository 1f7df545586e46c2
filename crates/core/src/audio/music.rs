use std::path::Path;
use std::sync::Arc;

use crate::audio::AudioElement;
use crate::config::AudioDefaults;
use crate::engine::{MusicBackend, MusicHandle};
use crate::{ResourceError, ResourceKind, Result};

/// Owning wrapper around a streaming music track.
///
/// Unlike a one-shot sound, a stream needs [`Self::pump`] once per frame
/// while playing, or the buffered samples starve. `play` and `resume` pump
/// once themselves so the first frame after a transition already has audio.
/// The handle is released exactly once, through [`Self::dispose`] or on
/// drop.
#[derive(Debug)]
pub struct MusicResource<E: MusicBackend> {
    engine: Arc<E>,
    handle: Option<MusicHandle>,
    path: String,
    defaults: AudioDefaults,
    already_started: bool,
    pitch: f32,
    pan: f32,
    volume: f32,
}

impl<E: MusicBackend> MusicResource<E> {
    /// Opens a music stream from a file path relative to the process working
    /// directory. Fails with [`ResourceError::AssetNotFound`] when the path
    /// does not resolve.
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
                kind: ResourceKind::Music,
                path: path.to_path_buf(),
                context: "opening music stream",
            });
        }
        let path = path.to_string_lossy().into_owned();
        let handle = engine.load_music(&path)?;
        tracing::debug!(path, "music stream opened");
        Ok(Self {
            engine,
            handle: Some(handle),
            path,
            defaults,
            already_started: false,
            pitch: defaults.pitch,
            pan: defaults.pan,
            volume: defaults.volume,
        })
    }

    fn ensure_valid(&self) -> Result<MusicHandle> {
        match self.handle {
            Some(handle) if self.engine.music_is_valid(handle) => Ok(handle),
            _ => {
                tracing::warn!(path = %self.path, "music handle is not valid, refusing operation");
                Err(ResourceError::StreamNotValid {
                    path: self.path.clone(),
                })
            }
        }
    }

    /// True once a `play` has succeeded and until the next `stop`.
    pub fn already_started(&self) -> bool {
        self.already_started
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

    /// Feeds the next slice of buffered samples to the playback pipeline.
    /// Call once per frame, before the draw step, for as long as playback
    /// should continue. Returns `false` when the stream has no buffered or
    /// pending samples left, so a driver can notice starvation or natural
    /// end of track instead of getting silence.
    pub fn pump(&mut self) -> Result<bool> {
        let handle = self.ensure_valid()?;
        let live = self.engine.pump_music(handle)?;
        if !live {
            tracing::trace!(path = %self.path, "music stream has no pending samples");
        }
        Ok(live)
    }

    /// Releases the native stream. Safe to call more than once; only the
    /// first call reaches the engine.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.unload_music(handle);
            tracing::debug!(path = %self.path, "music stream released");
        }
    }
}

impl<E: MusicBackend> AudioElement for MusicResource<E> {
    /// Starts the stream from the top and pumps once so the first frame has
    /// buffered audio.
    fn play(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.play_music(handle)?;
        self.already_started = true;
        self.engine.pump_music(handle)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.stop_music(handle)?;
        self.already_started = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.pause_music(handle)
    }

    /// A stream that was never started cannot be meaningfully resumed, so
    /// this delegates to [`Self::play`] until the first successful play.
    /// Otherwise it continues from the pause position without restarting.
    fn resume(&mut self) -> Result<()> {
        if !self.already_started {
            return self.play();
        }
        let handle = self.ensure_valid()?;
        self.engine.resume_music(handle)?;
        self.engine.pump_music(handle)?;
        Ok(())
    }

    /// Repositions the stream cursor. Positions beyond the track length are
    /// engine-defined; no bounds validation happens here.
    fn seek(&mut self, seconds: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.seek_music(handle, seconds)
    }

    fn control_pitch(&mut self, pitch: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_music_pitch(handle, pitch)?;
        self.pitch = pitch;
        Ok(())
    }

    fn control_pan(&mut self, pan: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_music_pan(handle, pan)?;
        self.pan = pan;
        Ok(())
    }

    fn control_volume(&mut self, volume: f32) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.set_music_volume(handle, volume)?;
        self.volume = volume;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        match self.handle {
            Some(handle) => self.engine.music_is_playing(handle),
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

impl<E: MusicBackend> Drop for MusicResource<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEngine;

    fn music(engine: &Arc<ScriptedEngine>) -> MusicResource<ScriptedEngine> {
        let file = engine.keep_file();
        MusicResource::from_file(engine.clone(), file).unwrap()
    }

    #[test]
    fn missing_path_fails_with_asset_not_found() {
        let engine = Arc::new(ScriptedEngine::new());
        let err = MusicResource::from_file(engine, "no/such/track.ogg").unwrap_err();
        assert!(matches!(
            err,
            ResourceError::AssetNotFound {
                kind: ResourceKind::Music,
                ..
            }
        ));
    }

    #[test]
    fn play_starts_marks_and_pumps() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.play().unwrap();
        assert!(music.is_playing());
        assert!(music.already_started());
        assert_eq!(engine.pump_count(), 1);
    }

    #[test]
    fn stop_clears_the_started_flag() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.play().unwrap();
        music.stop().unwrap();
        assert!(!music.is_playing());
        assert!(!music.already_started());
    }

    #[test]
    fn resume_before_any_play_behaves_like_play() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.resume().unwrap();
        assert!(music.is_playing());
        assert!(music.already_started());
        // Started through the play path, not a raw resume.
        assert_eq!(engine.params_of("music_resume"), 0);
    }

    #[test]
    fn resume_after_pause_does_not_restart() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.play().unwrap();
        music.pause().unwrap();
        assert!(!music.is_playing());

        music.resume().unwrap();
        assert!(music.is_playing());
        assert_eq!(engine.params_of("music_play"), 1);
        assert_eq!(engine.params_of("music_resume"), 1);
        // One pump from play, one from resume.
        assert_eq!(engine.pump_count(), 2);
    }

    #[test]
    fn pump_reports_liveness() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.play().unwrap();
        assert!(music.pump().unwrap());

        engine.finish_all_playback();
        assert!(!music.pump().unwrap());
    }

    #[test]
    fn seek_reaches_the_engine_unchecked() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.seek(12.5).unwrap();
        music.seek(-3.0).unwrap();
        assert_eq!(engine.params_of("music_seek"), 2);
    }

    #[test]
    fn controls_on_invalid_handle_leave_tracked_state_untouched() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);
        engine.invalidate_handles();

        let err = music.control_volume(0.2).unwrap_err();
        assert!(matches!(err, ResourceError::StreamNotValid { .. }));
        assert_eq!(music.volume(), AudioDefaults::default().volume);

        assert!(music.play().is_err());
        assert!(music.seek(1.0).is_err());
        assert!(music.pump().is_err());
    }

    #[test]
    fn failing_engine_set_leaves_tracked_volume_untouched() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);
        music.control_volume(0.8).unwrap();
        engine.fail_param_sets();

        let err = music.control_volume(0.2).unwrap_err();
        assert!(matches!(err, ResourceError::StreamNotValid { .. }));
        assert_eq!(music.volume(), 0.8);
    }

    #[test]
    fn dispose_releases_the_stream_once() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);

        music.dispose();
        music.dispose();
        drop(music);
        assert_eq!(engine.unloads_of("music"), 1);
    }

    #[test]
    fn operations_after_dispose_fail_loudly() {
        let engine = Arc::new(ScriptedEngine::new());
        let mut music = music(&engine);
        music.dispose();

        assert!(matches!(
            music.play().unwrap_err(),
            ResourceError::StreamNotValid { .. }
        ));
        assert!(matches!(
            music.pump().unwrap_err(),
            ResourceError::StreamNotValid { .. }
        ));
        assert!(!music.is_playing());
    }
}
