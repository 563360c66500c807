//! The resizer stage.
//!
//! Dimension policy:
//! - both requested sides zero: the source is returned as-is (moved, not copied)
//! - both positive: scaled to exactly that size, aspect ratio ignored
//! - one positive: the other side follows the source aspect ratio
//!
//! Resizing a valid surface cannot fail.

use crate::decode::{FilterType, RasterSurface};

/// Compute the output dimensions for a source of `source` size.
///
/// Derived sides are rounded and never smaller than 1.
pub fn resolve_dimensions(source: (u32, u32), requested: (u32, u32)) -> (u32, u32) {
    let (src_width, src_height) = source;
    match requested {
        (0, 0) => source,
        (width, 0) => (width, scale_side(src_height, width, src_width)),
        (0, height) => (scale_side(src_width, height, src_height), height),
        exact => exact,
    }
}

/// `side * numerator / denominator`, rounded, at least 1.
fn scale_side(side: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return side.max(1);
    }
    let scaled = (f64::from(side) * f64::from(numerator) / f64::from(denominator)).round();
    scaled.clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Resize `surface` to the dimensions resolved from `requested`.
pub fn resize(surface: RasterSurface, requested: (u32, u32), filter: FilterType) -> RasterSurface {
    let (width, height) = resolve_dimensions(surface.dimensions(), requested);

    // Fast path: nothing to scale
    if surface.dimensions() == (width, height) || surface.is_empty() {
        return surface;
    }

    let (src_width, src_height) = surface.dimensions();
    match surface.into_rgba_image() {
        Some(rgba) => {
            let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
            log::debug!("resized {src_width}x{src_height} -> {width}x{height} ({filter:?})");
            RasterSurface::from_rgba_image(resized)
        }
        None => {
            // Inconsistent buffers are rejected by the encoder.
            log::warn!("skipping resize of malformed {src_width}x{src_height} surface");
            RasterSurface {
                width: src_width,
                height: src_height,
                pixels: Vec::new(),
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_helpers::solid_surface;
    use proptest::prelude::*;

    proptest! {
        /// Property: (0, 0) always yields the natural dimensions.
        #[test]
        fn prop_pass_through(width in 1u32..=10_000, height in 1u32..=10_000) {
            prop_assert_eq!(resolve_dimensions((width, height), (0, 0)), (width, height));
        }

        /// Property: two positive sides are used verbatim, whatever the source ratio.
        #[test]
        fn prop_exact_target(
            source in (1u32..=10_000, 1u32..=10_000),
            target in (1u32..=10_000, 1u32..=10_000),
        ) {
            prop_assert_eq!(resolve_dimensions(source, target), target);
        }

        /// Property: a one-sided request keeps the requested side and a positive derived side.
        #[test]
        fn prop_one_sided_request(
            source in (1u32..=10_000, 1u32..=10_000),
            side in 1u32..=10_000,
        ) {
            let (w, h) = resolve_dimensions(source, (side, 0));
            prop_assert_eq!(w, side);
            prop_assert!(h >= 1);

            let (w, h) = resolve_dimensions(source, (0, side));
            prop_assert_eq!(h, side);
            prop_assert!(w >= 1);
        }

        /// Property: the resized surface always matches the resolved dimensions.
        #[test]
        fn prop_resize_matches_resolution(
            source in (1u32..=24, 1u32..=24),
            target in (0u32..=24, 0u32..=24),
        ) {
            let expected = resolve_dimensions(source, target);
            let out = resize(solid_surface(source.0, source.1, [1, 2, 3, 4]), target, FilterType::Nearest);
            prop_assert_eq!(out.dimensions(), expected);
            prop_assert_eq!(out.pixels.len(), expected.0 as usize * expected.1 as usize * 4);
        }
    }
}
