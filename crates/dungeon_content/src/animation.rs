//! Sprite animations.
//!
//! `Animation` is owned by the rendering side and does not describe itself to
//! the DSL. Scripts create one through the `from_frames` adapter instead.

use dungeon_foundation::{Error, Result};
use dungeon_semantic::{AdapterProvider, Shape, TypeAdapter};

/// Texture shown when an animation has no frames of its own.
pub const MISSING_TEXTURE: &str = "animation/missingTexture.png";

/// Frame time used when a script does not give one, in milliseconds.
pub const DEFAULT_FRAME_TIME: i64 = 100;

/// A looping sequence of texture paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<String>,
    frame_time: i64,
}

impl Animation {
    /// Creates an animation.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or `frame_time` is not positive.
    pub fn new(frames: Vec<String>, frame_time: i64) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::type_mismatch("at least one frame", "empty list"));
        }
        if frame_time <= 0 {
            return Err(Error::type_mismatch(
                "positive frame time",
                frame_time.to_string(),
            ));
        }
        Ok(Self { frames, frame_time })
    }

    /// The single-frame placeholder animation.
    #[must_use]
    pub fn missing_texture() -> Self {
        Self {
            frames: vec![MISSING_TEXTURE.to_string()],
            frame_time: DEFAULT_FRAME_TIME,
        }
    }

    /// Texture paths in play order.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Milliseconds each frame stays on screen.
    #[must_use]
    pub fn frame_time(&self) -> i64 {
        self.frame_time
    }

    /// Returns the frame shown `elapsed_ms` milliseconds after the start.
    #[must_use]
    pub fn frame_at(&self, elapsed_ms: i64) -> &str {
        let len = i64::try_from(self.frames.len()).unwrap_or(i64::MAX);
        let index = (elapsed_ms.max(0) / self.frame_time) % len;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .map_or(MISSING_TEXTURE, String::as_str)
    }
}

/// Adapters for [`Animation`].
pub struct AnimationBuilder;

impl AdapterProvider for AnimationBuilder {
    fn adapters() -> Vec<TypeAdapter> {
        vec![
            TypeAdapter::new("from_frames", |args| {
                Animation::new(
                    args.strings("frames")?,
                    args.int_or("frame_time", DEFAULT_FRAME_TIME)?,
                )
            })
            .param("frames", Shape::list(Shape::String))
            .param("frameTime", Shape::Int),
        ]
    }
}
