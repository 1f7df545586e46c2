use std::path::Path;
use std::sync::Arc;

use crate::config::FontDefaults;
use crate::engine::{Color, FontBackend, FontHandle, Vec2};
use crate::{ResourceError, ResourceKind, Result};

/// Owning wrapper around a loaded native font.
///
/// Draw parameters resolve through a fallback chain: an explicit per-call
/// override wins, otherwise the value most recently assigned through a
/// setter applies, otherwise the static default captured at construction
/// (opaque black, size 18, spacing 1). The handle is released exactly once,
/// through [`Self::dispose`] or on drop, and draws after disposal fail
/// loudly instead of touching a dead handle.
#[derive(Debug)]
pub struct FontResource<E: FontBackend> {
    engine: Arc<E>,
    handle: Option<FontHandle>,
    path: String,
    defaults: FontDefaults,
    color: Color,
    size: f32,
    spacing: f32,
}

impl<E: FontBackend> FontResource<E> {
    /// Loads a font from a file path relative to the process working
    /// directory. Fails with [`ResourceError::AssetNotFound`] when the path
    /// does not resolve, without constructing a partial resource.
    pub fn from_file(engine: Arc<E>, path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(engine, path, FontDefaults::default())
    }

    /// Same as [`Self::from_file`] with explicit default draw parameters.
    pub fn from_file_with(
        engine: Arc<E>,
        path: impl AsRef<Path>,
        defaults: FontDefaults,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ResourceError::AssetNotFound {
                kind: ResourceKind::Font,
                path: path.to_path_buf(),
                context: "loading font",
            });
        }
        let path = path.to_string_lossy().into_owned();
        let handle = engine.load_font(&path)?;
        tracing::debug!(path, "font loaded");
        Ok(Self {
            engine,
            handle: Some(handle),
            path,
            defaults,
            color: defaults.color,
            size: defaults.size,
            spacing: defaults.spacing,
        })
    }

    fn ensure_valid(&self) -> Result<FontHandle> {
        match self.handle {
            Some(handle) if self.engine.font_is_valid(handle) => Ok(handle),
            _ => {
                tracing::warn!(path = %self.path, "font handle is not valid, refusing operation");
                Err(ResourceError::StreamNotValid {
                    path: self.path.clone(),
                })
            }
        }
    }

    /// Renders `text` at `position`. Each `None` falls back to the
    /// resource-level default currently in effect.
    pub fn draw(
        &self,
        text: &str,
        position: Vec2,
        color: Option<Color>,
        size: Option<f32>,
        spacing: Option<f32>,
    ) -> Result<()> {
        let handle = self.ensure_valid()?;
        self.engine.draw_text(
            handle,
            text,
            position,
            color.unwrap_or(self.color),
            size.unwrap_or(self.size),
            spacing.unwrap_or(self.spacing),
        )
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn defaults(&self) -> FontDefaults {
        self.defaults
    }

    /// Releases the native font. Safe to call more than once; only the
    /// first call reaches the engine.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.unload_font(handle);
            tracing::debug!(path = %self.path, "font released");
        }
    }
}

impl<E: FontBackend> Drop for FontResource<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
