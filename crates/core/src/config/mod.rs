use serde::{Deserialize, Serialize};

use crate::engine::Color;

/// Pitch applied to freshly constructed audio resources.
pub const DEFAULT_PITCH: f32 = 1.0;
/// Pan applied to freshly constructed audio resources (0.5 is center).
pub const DEFAULT_PAN: f32 = 0.5;
/// Volume applied to freshly constructed audio resources.
pub const DEFAULT_VOLUME: f32 = 1.0;
/// Floor used by the volume-min preset. A small positive epsilon rather than
/// true silence so a track brought back up never has to restart the source.
pub const VOLUME_MIN: f32 = 0.001;
/// Ceiling used by the volume-max preset.
pub const VOLUME_MAX: f32 = 1.0;

/// Size used by font draws when no override or setter value exists.
pub const DEFAULT_FONT_SIZE: f32 = 18.0;
/// Glyph spacing used by font draws when no override or setter value exists.
pub const DEFAULT_FONT_SPACING: f32 = 1.0;

/// Default tone parameters captured by each audio resource at construction.
///
/// `set_default_*` operations reset against these captured values, so two
/// resources built from different defaults stay independent. This replaces
/// the process-wide mutable defaults of earlier designs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioDefaults {
    pub pitch: f32,
    pub pan: f32,
    pub volume: f32,
}

impl Default for AudioDefaults {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            pan: DEFAULT_PAN,
            volume: DEFAULT_VOLUME,
        }
    }
}

/// Default draw parameters captured by each font resource at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FontDefaults {
    pub size: f32,
    pub spacing: f32,
    pub color: Color,
}

impl Default for FontDefaults {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            spacing: DEFAULT_FONT_SPACING,
            color: Color::BLACK,
        }
    }
}

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audio: AudioDefaults,
    #[serde(default)]
    pub font: FontDefaults,
}
