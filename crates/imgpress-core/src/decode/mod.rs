//! Image decoding for imgpress.
//!
//! This module provides functionality for:
//! - Sniffing and decoding JPEG, PNG and WebP bytes
//! - Applying EXIF orientation so natural dimensions match what a browser shows
//! - Rejecting oversized inputs from their header before a full decode
//!
//! # Architecture
//!
//! [`decode`] is the pipeline stage: it resolves a loaded resource through its
//! transient handle and rasterizes it. [`decode_bytes`] is the synchronous
//! core it wraps, usable on its own.
//!
//! # Examples
//!
//! ```ignore
//! use imgpress_core::decode::{decode_bytes, DecodeLimits};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let surface = decode_bytes(&bytes, &DecodeLimits::default()).unwrap();
//! println!("Decoded {}x{} image", surface.width, surface.height);
//! ```

mod decoder;
mod orientation;
mod types;

pub use decoder::{decode, decode_bytes, sniff};
pub use orientation::Orientation;
pub use types::{DecodeError, DecodeLimits, FilterType, RasterSurface};
