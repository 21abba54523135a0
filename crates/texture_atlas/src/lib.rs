//! # Texture Atlas
//!
//! A shelf-packing GPU texture atlas allocator with a pluggable texture
//! backend.
//!
//! ## Features
//!
//! - **Shelf packing**: greedy left-to-right, top-to-bottom placement
//!   with fixed padding against filtering bleed
//! - **Transparent overflow recovery**: capacity exhaustion rebuilds the
//!   backing texture instead of failing the caller
//! - **White-pixel reservation**: a solid-white corner on every surface
//!   lets flat fills share the textured draw path
//! - **Generation tracking**: views detect when a reset has superseded
//!   their backing storage
//! - **Backend agnostic**: bring your own GPU texture type, or use the
//!   bundled software backend for tests and headless runs
//!
//! ## Quick Start
//!
//! ```rust
//! use texture_atlas::{SoftwareBackend, TextureAtlas};
//!
//! # fn main() -> Result<(), texture_atlas::AtlasError> {
//! let atlas = TextureAtlas::new(SoftwareBackend::new(), 1024, 1024)?;
//!
//! let sprite = atlas.add(64, 64)?;
//! sprite.set_data(&vec![128; 64 * 64 * 4])?;
//! sprite.bind();
//!
//! let white = atlas.white_pixel()?;
//! assert_eq!(white.bounds().width, 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod atlas;
pub mod backend;
pub mod config;
pub mod error;
pub mod rect;
pub mod view;

// Re-export the core types
pub use atlas::{TextureAtlas, PADDING, WHITE_REGION_SIZE};
pub use backend::software::{SoftwareBackend, SoftwareTexture};
pub use backend::{BackingTexture, Rgba8, TextureBackend};
pub use config::{AtlasConfig, Config, ConfigError};
pub use error::{AtlasError, AtlasResult};
pub use rect::Rect;
pub use view::SubTexture;
