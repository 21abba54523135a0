//! Software (CPU) texture backend
//!
//! Keeps pixel storage in main memory and models the context-wide
//! "atlas texture bound" flag with an atomic. Used by the test suite and
//! by headless callers that only need placement, not drawing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{BackingTexture, Rgba8, TextureBackend};
use crate::error::{AtlasError, AtlasResult};
use crate::rect::Rect;

/// Software rendering context
///
/// Cloning yields a handle to the same context: all textures created from
/// any clone share one atlas-binding flag.
#[derive(Debug, Clone, Default)]
pub struct SoftwareBackend {
    atlas_bound: Arc<AtomicBool>,
}

impl SoftwareBackend {
    /// Create a context with no texture bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the context-wide atlas binding
    ///
    /// A real renderer does the equivalent at the start of each frame.
    pub fn unbind_atlas(&self) {
        self.atlas_bound.store(false, Ordering::SeqCst);
    }
}

impl TextureBackend for SoftwareBackend {
    type Texture = SoftwareTexture;

    fn create_texture(&self, width: u32, height: u32) -> SoftwareTexture {
        log::info!("Creating {}x{} software texture", width, height);
        SoftwareTexture {
            width,
            height,
            pixels: Mutex::new(vec![0; width as usize * height as usize * Rgba8::BYTES]),
            atlas_bound: Arc::clone(&self.atlas_bound),
            binds: AtomicUsize::new(0),
        }
    }
}

/// CPU-resident RGBA8 texture, row-major, top-to-bottom
#[derive(Debug)]
pub struct SoftwareTexture {
    width: u32,
    height: u32,
    pixels: Mutex<Vec<u8>>,
    atlas_bound: Arc<AtomicBool>,
    binds: AtomicUsize,
}

impl SoftwareTexture {
    /// Number of times `bind` has been called on this texture
    pub fn bind_count(&self) -> usize {
        self.binds.load(Ordering::SeqCst)
    }

    /// Copy out the pixels of `region` for inspection
    pub fn read_region(&self, region: Rect) -> AtlasResult<Vec<u8>> {
        self.check_bounds(region)?;

        let pixels = self.lock_pixels();
        let mut out = Vec::with_capacity(region.byte_len());
        for row in 0..region.height {
            let start = self.byte_offset(region.x, region.y + row);
            out.extend_from_slice(&pixels[start..start + region.width as usize * Rgba8::BYTES]);
        }
        Ok(out)
    }

    fn check_bounds(&self, region: Rect) -> AtlasResult<()> {
        let surface = Rect::new(0, 0, self.width, self.height);
        if surface.contains(&region) {
            Ok(())
        } else {
            Err(AtlasError::UploadOutOfBounds {
                region,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn byte_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Rgba8::BYTES
    }

    fn lock_pixels(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.pixels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BackingTexture for SoftwareTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn upload(&self, region: Rect, pixels: &[u8]) -> AtlasResult<()> {
        if pixels.len() != region.byte_len() {
            return Err(AtlasError::UploadSizeMismatch {
                expected: region.byte_len(),
                actual: pixels.len(),
            });
        }
        self.check_bounds(region)?;

        log::debug!(
            "Uploading {} bytes to ({}, {}) {}x{}",
            pixels.len(),
            region.x,
            region.y,
            region.width,
            region.height
        );

        let row_bytes = region.width as usize * Rgba8::BYTES;
        let mut store = self.lock_pixels();
        for row in 0..region.height {
            let dst = self.byte_offset(region.x, region.y + row);
            let src = row as usize * row_bytes;
            store[dst..dst + row_bytes].copy_from_slice(&pixels[src..src + row_bytes]);
        }
        Ok(())
    }

    fn bind(&self) -> bool {
        self.binds.fetch_add(1, Ordering::SeqCst);
        self.atlas_bound.store(true, Ordering::SeqCst);
        true
    }

    fn atlas_bound(&self) -> bool {
        self.atlas_bound.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::cast_slice;

    #[test]
    fn test_upload_and_read_region() {
        let backend = SoftwareBackend::new();
        let texture = backend.create_texture(8, 8);

        let region = Rect::new(2, 3, 2, 2);
        let texels = [Rgba8([1, 2, 3, 4]); 4];
        texture.upload(region, cast_slice(&texels)).unwrap();

        assert_eq!(texture.read_region(region).unwrap(), cast_slice::<_, u8>(&texels));
        // neighboring texels stay untouched
        assert_eq!(texture.read_region(Rect::new(0, 0, 2, 2)).unwrap(), vec![0; 16]);
    }

    #[test]
    fn test_upload_size_mismatch() {
        let backend = SoftwareBackend::new();
        let texture = backend.create_texture(8, 8);

        let result = texture.upload(Rect::new(0, 0, 2, 2), &[255; 15]);

        assert!(matches!(
            result,
            Err(AtlasError::UploadSizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
        // storage left unmodified
        assert_eq!(texture.read_region(Rect::new(0, 0, 2, 2)).unwrap(), vec![0; 16]);
    }

    #[test]
    fn test_upload_out_of_bounds() {
        let backend = SoftwareBackend::new();
        let texture = backend.create_texture(8, 8);

        let region = Rect::new(7, 7, 2, 2);
        let result = texture.upload(region, &[255; 16]);

        assert!(matches!(result, Err(AtlasError::UploadOutOfBounds { .. })));
    }

    #[test]
    fn test_bind_sets_context_flag() {
        let backend = SoftwareBackend::new();
        let texture = backend.create_texture(4, 4);

        assert!(!texture.atlas_bound());
        assert!(texture.bind());
        assert!(texture.atlas_bound());
        assert_eq!(texture.bind_count(), 1);

        backend.unbind_atlas();
        assert!(!texture.atlas_bound());
    }
}
