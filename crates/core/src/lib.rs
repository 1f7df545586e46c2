//! Resource lifecycle layer for the Stagehand application.
//!
//! The native multimedia engine hands out raw handles for fonts, one-shot
//! sounds, and streaming music, and expects each to be released exactly
//! once. This crate wraps those handles in owning resource types that
//! validate backing assets before load, expose a uniform playback contract
//! across the two audio kinds, and guarantee deterministic release however
//! the owner goes out of scope. The engine itself stays behind the traits
//! in [`engine`]; the four-stage scene protocol that acquires and releases
//! these resources lives in [`scene`].

pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod scene;

#[cfg(test)]
pub(crate) mod testing;

pub use audio::{AudioElement, MusicResource, SfxResource};
pub use config::{AppConfig, AudioDefaults, FontDefaults};
pub use engine::{
    Color, FontBackend, HeadlessEngine, MusicBackend, SfxBackend, Vec2,
};
pub use error::{ResourceError, ResourceKind, Result};
pub use font::FontResource;
pub use scene::{Scene, SceneDriver, SceneError, SceneStage};
