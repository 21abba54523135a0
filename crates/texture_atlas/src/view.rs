//! Sub-texture views
//!
//! A [`SubTexture`] is a lightweight window into a shared backing texture.
//! Views never own GPU storage: the allocator does, and replaces it
//! wholesale on reset. A view created before a reset keeps a live (never
//! dangling) reference to the superseded texture, but its visual content
//! is undefined from that point on; [`SubTexture::is_stale`] detects this.

use std::sync::Arc;

use nalgebra::Vector2;

use crate::atlas::TextureAtlas;
use crate::backend::{BackingTexture, TextureBackend};
use crate::error::{AtlasError, AtlasResult};
use crate::rect::Rect;

/// Rectangular window into a backing texture
#[derive(Debug)]
pub struct SubTexture<T: BackingTexture> {
    bounds: Rect,
    texture: Arc<T>,
    generation: u64,
    white_pixel: bool,
}

impl<T: BackingTexture> SubTexture<T> {
    pub(crate) fn new(bounds: Rect, texture: Arc<T>, generation: u64) -> Self {
        Self {
            bounds,
            texture,
            generation,
            white_pixel: false,
        }
    }

    pub(crate) fn white(bounds: Rect, texture: Arc<T>, generation: u64) -> Self {
        Self {
            bounds,
            texture,
            generation,
            white_pixel: true,
        }
    }

    /// Region this view covers within its backing texture
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// View width in texels
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    /// View height in texels
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Atlas generation this view was allocated under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Backing texture this view windows into
    ///
    /// Shared with the allocator and every other view of the same
    /// generation; the allocator alone controls its replacement.
    pub fn backing(&self) -> &T {
        &self.texture
    }

    /// Whether the atlas has been reset since this view was created
    ///
    /// A stale view still binds and uploads without crashing, but its
    /// content belongs to a superseded surface.
    pub fn is_stale<B>(&self, atlas: &TextureAtlas<B>) -> bool
    where
        B: TextureBackend<Texture = T>,
    {
        self.generation != atlas.generation()
    }

    /// Bind the backing texture for drawing
    ///
    /// Returns whether a bind actually occurred. Views over the white
    /// corner skip the bind entirely while any atlas texture is bound:
    /// every atlas carries an identical white reservation, so the one
    /// already bound serves equally well.
    pub fn bind(&self) -> bool {
        if self.white_pixel && self.texture.atlas_bound() {
            return true;
        }

        self.texture.bind()
    }

    /// Upload RGBA8 pixel data covering exactly this view's rectangle
    ///
    /// `pixels` must hold `width * height * 4` bytes, row-major,
    /// top-to-bottom. Writes stay within the view's bounds.
    pub fn set_data(&self, pixels: &[u8]) -> AtlasResult<()> {
        if pixels.len() != self.bounds.byte_len() {
            return Err(AtlasError::UploadSizeMismatch {
                expected: self.bounds.byte_len(),
                actual: pixels.len(),
            });
        }

        self.texture.upload(self.bounds, pixels)
    }

    /// Normalized UV coordinates of this view within its backing texture
    ///
    /// Returns the top-left and bottom-right corners in `0.0..=1.0`.
    pub fn uv_bounds(&self) -> (Vector2<f32>, Vector2<f32>) {
        let w = self.texture.width() as f32;
        let h = self.texture.height() as f32;

        (
            Vector2::new(self.bounds.x as f32 / w, self.bounds.y as f32 / h),
            Vector2::new(
                self.bounds.right() as f32 / w,
                self.bounds.bottom() as f32 / h,
            ),
        )
    }
}

impl<T: BackingTexture> Clone for SubTexture<T> {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            texture: Arc::clone(&self.texture),
            generation: self.generation,
            white_pixel: self.white_pixel,
        }
    }
}
