use crate::config::{AudioDefaults, VOLUME_MAX, VOLUME_MIN};
use crate::Result;

pub mod music;
pub mod sfx;

pub use music::MusicResource;
pub use sfx::SfxResource;

/// Uniform playback-control contract across controllable audio resources.
///
/// Both implementors guard every control operation with a validity check
/// against the native handle and refuse to proceed (and to mutate any
/// tracked parameter) when the check fails. The two state machines differ
/// beyond that: a [`MusicResource`] needs a per-frame [`MusicResource::pump`]
/// and tracks whether it was ever started, a [`SfxResource`] does neither
/// and cannot seek.
pub trait AudioElement {
    /// Starts playback from the beginning of the clip or stream.
    fn play(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Continues a paused resource. A music stream that was never started
    /// is started instead; see the implementors for the exact rules.
    fn resume(&mut self) -> Result<()>;
    /// Repositions the playback cursor, where the resource kind has one.
    /// One-shot sounds fail with an unsupported-operation error.
    fn seek(&mut self, seconds: f32) -> Result<()>;

    /// Applies a pitch multiplier to the native handle and records it on the
    /// resource. Values are passed through unclamped.
    fn control_pitch(&mut self, pitch: f32) -> Result<()>;
    /// Applies a pan position (0.5 is center). Unclamped.
    fn control_pan(&mut self, pan: f32) -> Result<()>;
    /// Applies a volume level. Use [`Self::set_volume_max`] and
    /// [`Self::set_volume_min`] for the named bounds.
    fn control_volume(&mut self, volume: f32) -> Result<()>;

    /// Live query against the engine; reflects natural end-of-playback
    /// without an explicit completion callback. False once disposed.
    fn is_playing(&self) -> bool;
    /// The originating asset path, or a `memory:<format>` label for sounds
    /// decoded from an in-memory buffer.
    fn path(&self) -> &str;
    /// The default parameters captured when this resource was constructed.
    fn defaults(&self) -> AudioDefaults;

    fn set_volume_max(&mut self) -> Result<()> {
        self.control_volume(VOLUME_MAX)
    }

    fn set_volume_min(&mut self) -> Result<()> {
        self.control_volume(VOLUME_MIN)
    }

    fn set_default_pitch(&mut self) -> Result<()> {
        let pitch = self.defaults().pitch;
        self.control_pitch(pitch)
    }

    fn set_default_pan(&mut self) -> Result<()> {
        let pan = self.defaults().pan;
        self.control_pan(pan)
    }

    fn set_default_volume(&mut self) -> Result<()> {
        let volume = self.defaults().volume;
        self.control_volume(volume)
    }
}
