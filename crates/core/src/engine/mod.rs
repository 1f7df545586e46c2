//! Boundary to the native multimedia engine.
//!
//! The engine itself (window, mixer, rasterizer) lives outside this crate
//! and is consumed through the three backend traits below. Handles are
//! opaque ids issued by the backend on a successful load and must be
//! released exactly once through the matching `unload_*` call; the owning
//! wrapper types in [`crate::font`] and [`crate::audio`] take care of that.
//! Every fallible primitive returns `Result` — the core never assumes a
//! native call succeeded.

use serde::{Deserialize, Serialize};

use crate::Result;

pub mod headless;

pub use headless::HeadlessEngine;

macro_rules! opaque_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) u64);

        impl $name {
            /// Wraps a raw id issued by a backend.
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw backend id.
            pub fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

opaque_handle!(
    /// Handle to a loaded font.
    FontHandle
);
opaque_handle!(
    /// Handle to a decoded, not yet playable waveform. Only ever lives for
    /// the duration of an in-memory sound construction.
    WaveHandle
);
opaque_handle!(
    /// Handle to a playable one-shot sound.
    SoundHandle
);
opaque_handle!(
    /// Handle to a streaming music track.
    MusicHandle
);

/// Screen-space position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Font primitives the core requires from the native engine.
pub trait FontBackend {
    fn load_font(&self, path: &str) -> Result<FontHandle>;
    fn font_is_valid(&self, handle: FontHandle) -> bool;
    fn unload_font(&self, handle: FontHandle);
    fn draw_text(
        &self,
        handle: FontHandle,
        text: &str,
        position: Vec2,
        color: Color,
        size: f32,
        spacing: f32,
    ) -> Result<()>;
}

/// One-shot sound primitives the core requires from the native engine.
pub trait SfxBackend {
    fn load_sound(&self, path: &str) -> Result<SoundHandle>;
    /// Decodes an encoded buffer into a transient waveform. `format` is a
    /// short ASCII tag naming the container format, e.g. `"ogg"`.
    fn load_wave_from_memory(&self, format: &str, bytes: &[u8]) -> Result<WaveHandle>;
    fn sound_from_wave(&self, wave: WaveHandle) -> Result<SoundHandle>;
    fn unload_wave(&self, wave: WaveHandle);
    fn sound_is_valid(&self, handle: SoundHandle) -> bool;
    fn unload_sound(&self, handle: SoundHandle);
    fn play_sound(&self, handle: SoundHandle) -> Result<()>;
    fn stop_sound(&self, handle: SoundHandle) -> Result<()>;
    fn pause_sound(&self, handle: SoundHandle) -> Result<()>;
    fn resume_sound(&self, handle: SoundHandle) -> Result<()>;
    fn sound_is_playing(&self, handle: SoundHandle) -> bool;
    fn set_sound_pitch(&self, handle: SoundHandle, pitch: f32) -> Result<()>;
    fn set_sound_pan(&self, handle: SoundHandle, pan: f32) -> Result<()>;
    fn set_sound_volume(&self, handle: SoundHandle, volume: f32) -> Result<()>;
}

/// Streaming music primitives the core requires from the native engine.
pub trait MusicBackend {
    fn load_music(&self, path: &str) -> Result<MusicHandle>;
    fn music_is_valid(&self, handle: MusicHandle) -> bool;
    fn unload_music(&self, handle: MusicHandle);
    fn play_music(&self, handle: MusicHandle) -> Result<()>;
    fn stop_music(&self, handle: MusicHandle) -> Result<()>;
    fn pause_music(&self, handle: MusicHandle) -> Result<()>;
    fn resume_music(&self, handle: MusicHandle) -> Result<()>;
    fn music_is_playing(&self, handle: MusicHandle) -> bool;
    /// Repositions the stream cursor. Out-of-range positions are handled
    /// however the native engine handles them; no bounds check happens here.
    fn seek_music(&self, handle: MusicHandle, seconds: f32) -> Result<()>;
    fn set_music_pitch(&self, handle: MusicHandle, pitch: f32) -> Result<()>;
    fn set_music_pan(&self, handle: MusicHandle, pan: f32) -> Result<()>;
    fn set_music_volume(&self, handle: MusicHandle, volume: f32) -> Result<()>;
    /// Feeds the next slice of buffered samples into the playback pipeline.
    /// Must be called once per frame while the stream is playing. Returns
    /// `true` while the stream still has buffered or pending samples, so a
    /// driver can observe starvation instead of hearing silence.
    fn pump_music(&self, handle: MusicHandle) -> Result<bool>;
}
