//! Shelf-packing atlas allocator
//!
//! [`TextureAtlas`] packs many small sub-textures into one large backing
//! texture so draw calls against them can share a single texture binding.
//! Placement is a greedy left-to-right, top-to-bottom shelf packer: a row
//! fills until a request no longer fits, then the cursor drops below the
//! tallest rectangle of the row and the row starts over.
//!
//! When a request cannot fit below the cursor at all, the atlas rebuilds
//! itself: the backing texture is replaced wholesale and every previously
//! issued [`SubTexture`] keeps pointing at the superseded surface. That
//! invalidation is the documented overflow policy, not an error; the
//! generation counter makes it observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{BackingTexture, Rgba8, TextureBackend};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::rect::Rect;
use crate::view::SubTexture;

/// Spacing in texels between packed rectangles
///
/// Keeps bilinear filtering from bleeding neighboring sub-textures into
/// each other at shared edges.
pub const PADDING: u32 = 4;

/// Side length of the white region reserved at the top-left on every reset
pub const WHITE_REGION_SIZE: u32 = 2;

const WHITE_TEXELS: [Rgba8; (WHITE_REGION_SIZE * WHITE_REGION_SIZE) as usize] =
    [Rgba8::WHITE; (WHITE_REGION_SIZE * WHITE_REGION_SIZE) as usize];

/// Mutable allocator state, guarded by one mutex
struct AtlasState<T> {
    /// Top of the active packing row
    current_y: u32,
    /// Rectangles granted within the current row cycle
    occupied: Vec<Rect>,
    /// Current backing texture; `None` until the first reset
    texture: Option<Arc<T>>,
}

/// Outcome of a placement search below the current cursor
enum Placement {
    /// The request fits at this rectangle
    Fits(Rect),
    /// No room anywhere below the cursor; the atlas must rebuild
    Exhausted,
}

/// Shelf-packing texture atlas allocator
///
/// Owns one backing texture at a time and hands out [`SubTexture`] views
/// into it. All mutating operations synchronize on an internal mutex, so
/// a shared `TextureAtlas` can serve allocations from multiple
/// rendering-preparation threads.
pub struct TextureAtlas<B: TextureBackend> {
    backend: B,
    width: u32,
    height: u32,
    /// Bumped on every reset; 0 means no backing texture exists yet
    generation: AtomicU64,
    state: Mutex<AtlasState<B::Texture>>,
}

impl<B: TextureBackend> TextureAtlas<B> {
    /// Create an allocator over a `width` x `height` surface
    ///
    /// Dimensions are fixed for the allocator's lifetime. The backing
    /// texture itself is created lazily on the first allocation.
    pub fn new(backend: B, width: u32, height: u32) -> AtlasResult<Self> {
        if width < WHITE_REGION_SIZE || height < WHITE_REGION_SIZE {
            return Err(AtlasError::AtlasTooSmall { width, height });
        }

        Ok(Self {
            backend,
            width,
            height,
            generation: AtomicU64::new(0),
            state: Mutex::new(AtlasState {
                current_y: 0,
                occupied: Vec::new(),
                texture: None,
            }),
        })
    }

    /// Create an allocator from an [`AtlasConfig`]
    pub fn with_config(backend: B, config: &AtlasConfig) -> AtlasResult<Self> {
        Self::new(backend, config.width, config.height)
    }

    /// Fixed atlas width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Fixed atlas height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current generation; views from earlier generations are stale
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Mipmap level count for the atlas surface, `floor(log2(width))`
    ///
    /// Informational only; placement never consults it.
    pub fn mip_levels(&self) -> u32 {
        self.width.ilog2()
    }

    /// Number of rectangles granted in the current row cycle
    ///
    /// Includes the white reservation. Diagnostic aid; the count drops
    /// whenever the packer advances to a new row or resets.
    pub fn occupied_count(&self) -> usize {
        self.lock_state().occupied.len()
    }

    /// Discard all prior placements and rebuild the backing texture
    ///
    /// Clears the occupied set, rewinds the row cursor, creates a fresh
    /// backing texture, and re-reserves the white corner. Every
    /// previously issued view now references superseded storage: its
    /// reference stays valid, its content does not.
    pub fn reset(&self) -> AtlasResult<()> {
        let mut state = self.lock_state();
        self.reset_locked(&mut state).map(|_| ())
    }

    /// Allocate a `width` x `height` sub-region
    ///
    /// Zero-sized requests and requests exceeding the atlas in either
    /// dimension fail with [`AtlasError::InvalidRegionSize`] before any
    /// state changes. Space exhaustion is not an error: the atlas resets
    /// and the request lands at the origin of the fresh surface.
    pub fn add(&self, width: u32, height: u32) -> AtlasResult<SubTexture<B::Texture>> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return Err(AtlasError::InvalidRegionSize {
                width,
                height,
                atlas_width: self.width,
                atlas_height: self.height,
            });
        }

        let mut state = self.lock_state();
        let mut texture = self.current_texture(&mut state)?;

        let bounds = match self.find_position(&mut state, width, height)? {
            Placement::Fits(bounds) => bounds,
            Placement::Exhausted => {
                // Nothing below the cursor can hold this height; rebuild
                // and hand out the origin of the known-fresh surface.
                texture = self.reset_locked(&mut state)?;
                Rect::new(0, 0, width, height)
            }
        };
        state.occupied.push(bounds);

        log::debug!(
            "Placed {}x{} at ({}, {}), generation {}",
            width,
            height,
            bounds.x,
            bounds.y,
            self.generation()
        );

        Ok(SubTexture::new(bounds, texture, self.generation()))
    }

    /// View over the reserved white corner of the current backing texture
    ///
    /// Allocates no new space. The returned view's `bind` is a no-op
    /// while any atlas texture is already bound, since every atlas
    /// carries the same reservation at the same spot.
    pub fn white_pixel(&self) -> AtlasResult<SubTexture<B::Texture>> {
        let mut state = self.lock_state();
        let texture = self.current_texture(&mut state)?;

        Ok(SubTexture::white(
            Rect::new(0, 0, WHITE_REGION_SIZE, WHITE_REGION_SIZE),
            texture,
            self.generation(),
        ))
    }

    fn lock_state(&self) -> MutexGuard<'_, AtlasState<B::Texture>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current backing texture, resetting first if none exists yet
    fn current_texture(&self, state: &mut AtlasState<B::Texture>) -> AtlasResult<Arc<B::Texture>> {
        match &state.texture {
            Some(texture) => Ok(Arc::clone(texture)),
            None => self.reset_locked(state),
        }
    }

    /// Rebuild the surface; caller must hold the state lock
    fn reset_locked(&self, state: &mut AtlasState<B::Texture>) -> AtlasResult<Arc<B::Texture>> {
        state.occupied.clear();
        state.current_y = 0;

        let texture = Arc::new(self.backend.create_texture(self.width, self.height));
        state.texture = Some(Arc::clone(&texture));
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!(
            "Atlas reset: new {}x{} backing texture, generation {}",
            self.width,
            self.height,
            generation
        );

        // Reserve the white corner through the normal placement path so
        // solid-color draws can reuse the texture-bound code path.
        let bounds = match self.find_position(state, WHITE_REGION_SIZE, WHITE_REGION_SIZE)? {
            Placement::Fits(bounds) => bounds,
            // dead arm: the constructor guarantees room for the reservation
            Placement::Exhausted => {
                return Err(AtlasError::AtlasTooSmall {
                    width: self.width,
                    height: self.height,
                })
            }
        };
        state.occupied.push(bounds);
        texture.upload(bounds, bytemuck::cast_slice(&WHITE_TEXELS))?;

        Ok(texture)
    }

    /// Shelf search below the current cursor
    ///
    /// The horizontal cursor advances past every occupied rectangle, not
    /// just overlapping ones; row-boundary bookkeeping stays trivial in
    /// exchange for some wasted space. A full row advances the cursor
    /// below the row's tallest rectangle and clears the occupied set.
    fn find_position(
        &self,
        state: &mut AtlasState<B::Texture>,
        width: u32,
        height: u32,
    ) -> AtlasResult<Placement> {
        // Each pass either returns or advances current_y by at least
        // PADDING, so the cap can only trip on a logic error.
        let max_shelves = self.height / PADDING + 1;

        for _ in 0..=max_shelves {
            if state.current_y + height > self.height {
                return Ok(Placement::Exhausted);
            }

            let mut x = 0;
            let mut max_y = state.current_y;
            for rect in &state.occupied {
                x = x.max(rect.right() + PADDING);
                max_y = max_y.max(rect.bottom());
            }

            if x + width <= self.width {
                return Ok(Placement::Fits(Rect::new(x, state.current_y, width, height)));
            }

            // Row is full: open a new shelf below its tallest rectangle.
            // Prior rectangles no longer constrain horizontal placement.
            state.current_y = max_y + PADDING;
            state.occupied.clear();
        }

        Err(AtlasError::PlacementOverflow {
            iterations: max_shelves + 1,
        })
    }
}
