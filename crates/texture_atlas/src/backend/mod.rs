//! Texture backend seam
//!
//! The allocator never talks to a graphics API directly. It creates and
//! writes backing textures through the [`TextureBackend`] and
//! [`BackingTexture`] traits, so the same packing logic runs against
//! Vulkan, GL, or the bundled software backend.

/// Software (CPU) texture backend
pub mod software;

use crate::error::AtlasResult;
use crate::rect::Rect;

/// A single RGBA8 texel
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    /// Fully opaque white
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    /// Bytes per texel
    pub const BYTES: usize = 4;
}

/// Factory for backing textures
///
/// Implemented by the rendering context that owns GPU storage. The
/// allocator calls `create_texture` on every reset, so creation must be
/// callable from whichever thread holds the atlas lock.
pub trait TextureBackend {
    /// Texture type manufactured by this backend
    type Texture: BackingTexture;

    /// Allocate pixel storage of the given size, initially undefined
    fn create_texture(&self, width: u32, height: u32) -> Self::Texture;
}

/// GPU-side pixel storage for one rectangular texture
///
/// Uploads take RGBA8 data, row-major, top-to-bottom, exactly
/// `region.width * region.height * 4` bytes.
pub trait BackingTexture {
    /// Storage width in texels
    fn width(&self) -> u32;

    /// Storage height in texels
    fn height(&self) -> u32;

    /// Write `pixels` into `region`, leaving the rest of the storage untouched
    fn upload(&self, region: Rect, pixels: &[u8]) -> AtlasResult<()>;

    /// Bind this texture for drawing; returns whether a bind actually occurred
    fn bind(&self) -> bool;

    /// Whether the owning context currently has *any* atlas texture bound
    ///
    /// Every atlas texture carries an identical white corner, so a
    /// white-pixel view can skip its own bind while this reports true.
    fn atlas_bound(&self) -> bool;
}
