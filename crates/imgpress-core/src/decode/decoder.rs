//! Rasterization of a loaded resource into a [`RasterSurface`].
//!
//! Dimensions are read from the header first so oversized inputs are
//! rejected before the full decode allocates anything.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodeLimits, Orientation, RasterSurface};
use crate::error::PipelineError;
use crate::load::LoadedResource;
use crate::mime::MimeType;

/// Rasterize a loaded resource.
///
/// The resource is resolved through its transient handle; a handle revoked
/// before decoding is reported as a load failure.
pub async fn decode(
    resource: &LoadedResource,
    limits: &DecodeLimits,
) -> Result<RasterSurface, PipelineError> {
    let bytes = resource.handle().resolve().ok_or_else(|| {
        PipelineError::LoadFailure(format!(
            "resource {} was released before decoding",
            resource.handle().url()
        ))
    })?;

    let surface = decode_bytes(&bytes, limits)?;
    if let Some(sniffed) = sniff(&bytes) {
        if sniffed != resource.declared_mime() {
            log::debug!(
                "declared {} but content is {}; decoded by content",
                resource.declared_mime(),
                sniffed
            );
        }
    }
    Ok(surface)
}

/// Decode JPEG, PNG or WebP bytes into an RGBA surface, EXIF orientation applied.
///
/// # Errors
///
/// - `DecodeFailure` if the bytes are not a supported, well-formed image.
/// - `ResourceLimit` if the image exceeds `limits`.
pub fn decode_bytes(bytes: &[u8], limits: &DecodeLimits) -> Result<RasterSurface, PipelineError> {
    let format = sniff(bytes).ok_or(DecodeError::UnsupportedCodec)?;

    let (header_width, header_height) = reader(bytes, format)
        .into_dimensions()
        .map_err(|e| DecodeError::InvalidHeader(e.to_string()))?;
    limits.check(header_width, header_height)?;

    let orientation = Orientation::from_container(bytes);
    let natural = if orientation.swaps_dimensions() {
        (header_height, header_width)
    } else {
        (header_width, header_height)
    };

    let img = reader(bytes, format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let surface = RasterSurface::from_rgba_image(orientation.apply(img).into_rgba8());

    log::debug!(
        "decoded {} {}x{} ({:?}, natural {}x{})",
        format,
        header_width,
        header_height,
        orientation,
        natural.0,
        natural.1
    );
    Ok(surface)
}

/// Identify the codec from the leading bytes, limited to supported formats.
pub fn sniff(bytes: &[u8]) -> Option<MimeType> {
    image::guess_format(bytes)
        .ok()
        .and_then(MimeType::from_image_format)
}

fn reader(bytes: &[u8], format: MimeType) -> ImageReader<Cursor<&[u8]>> {
    ImageReader::with_format(Cursor::new(bytes), format.image_format())
}
