//! Edge signatures and identity fingerprints derived from tile pixels
//!
//! Two tiles may sit next to each other when the signature of the touching
//! side of one equals the signature of the opposite side of the other. A
//! signature hashes `checkpoints` colors sampled at even steps along the
//! edge, so tiles only need to agree at those sample points.

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::io::configuration::{EDGE_SIGNATURE_BYTES, IDENTITY_BYTES};
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::spatial::direction::Direction;

/// Color read for sample points that fall outside the image
const OUTSIDE_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Expands an 8-bit channel to the 16-bit range (`0xab` → `0xabab`)
const CHANNEL_EXPANSION: u32 = 0x101;

/// Largest 8-bit channel value
const CHANNEL_MAX: u32 = 0xff;

/// Compatibility key of one tile side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeSignature([u8; EDGE_SIGNATURE_BYTES]);

impl EdgeSignature {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; EDGE_SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    pub const fn as_bytes(&self) -> &[u8; EDGE_SIGNATURE_BYTES] {
        &self.0
    }
}

impl fmt::Display for EdgeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Fingerprint of a tile's full pixel content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIdentity([u8; IDENTITY_BYTES]);

impl TileIdentity {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; IDENTITY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    pub const fn as_bytes(&self) -> &[u8; IDENTITY_BYTES] {
        &self.0
    }
}

impl fmt::Display for TileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Coordinates sampled along one edge
///
/// With `step = size / checkpoints`, sample `i` (1-based) sits at
/// `i * step` along the edge. The last sample lands on `size` itself when
/// the size is a multiple of `checkpoints`; such points read as
/// transparent black.
pub fn sample_points(
    width: u32,
    height: u32,
    direction: Direction,
    checkpoints: u32,
) -> Vec<(u32, u32)> {
    let horizontal_step = width.checked_div(checkpoints).unwrap_or(0);
    let vertical_step = height.checked_div(checkpoints).unwrap_or(0);
    let last_column = width.saturating_sub(1);
    let last_row = height.saturating_sub(1);

    (1..=checkpoints)
        .map(|i| match direction {
            Direction::North => (horizontal_step * i, 0),
            Direction::South => (horizontal_step * i, last_row),
            Direction::West => (0, vertical_step * i),
            Direction::East => (last_column, vertical_step * i),
        })
        .collect()
}

/// Compute the adjacency signature of one tile side
///
/// The premultiplied RGBA bytes of all samples are concatenated, written
/// as lowercase hex text and hashed with SHA-256; the first bytes of the
/// digest form the signature.
///
/// # Errors
///
/// Returns an error if `checkpoints` is zero or the image has no pixels
pub fn edge_signature(
    image: &RgbaImage,
    direction: Direction,
    checkpoints: u32,
) -> Result<EdgeSignature> {
    validate(image, checkpoints)?;

    let colors: Vec<u8> = sample_points(image.width(), image.height(), direction, checkpoints)
        .into_iter()
        .flat_map(|(x, y)| {
            image
                .get_pixel_checked(x, y)
                .map_or(OUTSIDE_COLOR, |pixel| premultiplied(*pixel))
        })
        .collect();

    let digest = Sha256::digest(hex::encode(colors).as_bytes());
    Ok(EdgeSignature(truncate(&digest)))
}

/// Compute all four signatures in [`Direction::ALL`] order
///
/// # Errors
///
/// Returns an error if `checkpoints` is zero or the image has no pixels
pub fn edge_signatures(image: &RgbaImage, checkpoints: u32) -> Result<[EdgeSignature; 4]> {
    let [north, east, south, west] = Direction::ALL;
    Ok([
        edge_signature(image, north, checkpoints)?,
        edge_signature(image, east, checkpoints)?,
        edge_signature(image, south, checkpoints)?,
        edge_signature(image, west, checkpoints)?,
    ])
}

/// Fingerprint the full pixel content of a tile
///
/// Pixels are hashed row-major; each premultiplied channel contributes the
/// little-endian bytes of its 16-bit expansion as a `u32`.
pub fn tile_identity(image: &RgbaImage) -> TileIdentity {
    let mut hasher = Sha256::new();
    for pixel in image.pixels() {
        for channel in premultiplied(*pixel) {
            hasher.update((u32::from(channel) * CHANNEL_EXPANSION).to_le_bytes());
        }
    }
    TileIdentity(truncate(&hasher.finalize()))
}

/// Whether every pixel is fully transparent
pub fn is_transparent(image: &RgbaImage) -> bool {
    image.pixels().all(|pixel| {
        let [_, _, _, alpha] = pixel.0;
        alpha == 0
    })
}

/// Scale color channels by alpha, as stored in a premultiplied RGBA buffer
///
/// Each channel goes through the 16-bit range and is truncated back to
/// 8 bits, so fully transparent pixels always read as `[0, 0, 0, 0]` and
/// opaque pixels are unchanged.
pub fn premultiplied(pixel: Rgba<u8>) -> [u8; 4] {
    let [red, green, blue, alpha] = pixel.0;
    let scale = |channel: u8| {
        let wide = u32::from(channel) * CHANNEL_EXPANSION * u32::from(alpha) / CHANNEL_MAX;
        (wide >> 8) as u8
    };
    [scale(red), scale(green), scale(blue), alpha]
}

fn validate(image: &RgbaImage, checkpoints: u32) -> Result<()> {
    if checkpoints == 0 {
        return Err(invalid_parameter(
            "checkpoints",
            &checkpoints,
            &"at least one sample per edge is required",
        ));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(invalid_source(&format!(
            "tile image is {}x{} pixels",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

fn truncate<const N: usize>(digest: &[u8]) -> [u8; N] {
    let mut bytes = [0; N];
    for (byte, &source) in bytes.iter_mut().zip(digest) {
        *byte = source;
    }
    bytes
}
