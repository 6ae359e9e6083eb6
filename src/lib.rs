//! # blocklinear
//! blocklinear is a CPU implementation of the block linear surface layout
//! used by the Tegra X1's DMA copy engine.
//!
//! Block linear arranges the bytes of a surface into a grid of blocks where
//! blocks are stored linearly in row-major order. Groups of 512 bytes form
//! GOBs ("group of bytes") where each GOB is 64x8 bytes. The
//! [BlockHeight] and [BlockDepth] parameters determine how many GOBs stack
//! vertically and along the Z axis to form a block.
//!
//! # Getting Started
//! The following example deswizzles the mip chain of a BC7 compressed
//! surface stored in a single contiguous region.
//! BC7 has 4x4 pixel blocks that each take up 16 bytes.
//! For uncompressed formats like R8G8B8A8 the format block dimensions are
//! simply 1x1.
/*!
```rust no_run
use blocklinear::{copy_block_linear_to_pitch, BlockDepth, BlockHeight, Dimensions};
use blocklinear::surface::block_linear_mip_layout;

# fn main() -> Result<(), blocklinear::SwizzleError> {
# let block_linear = vec![0u8; 4];
let levels = block_linear_mip_layout(
    Dimensions::new_2d(320, 320),
    4,
    4,
    16,
    4,
    4,
    16,
    BlockHeight::Eight,
    BlockDepth::One,
    5,
);

let mut offset = 0;
for level in &levels {
    let mut pitch_data = vec![0u8; level.linear_size];
    copy_block_linear_to_pitch(
        level.dimensions,
        4,
        4,
        16,
        0,
        level.block_height,
        level.block_depth,
        &block_linear[offset..],
        &mut pitch_data,
    )?;
    offset += level.block_linear_size;
}
# Ok(())
# }
```
*/
//! # Copies
//! [copy_pitch_to_block_linear] and [copy_block_linear_to_pitch] transform
//! full surfaces. [copy_pitch_to_block_linear_subrect] and
//! [copy_block_linear_to_pitch_subrect] transform a sub-rectangle of a
//! larger block linear surface, which is how the DMA engine updates part of
//! a texture in place.
//!
//! All copies are pure functions over caller provided slices and never
//! allocate. The size calculators in [surface] give the exact number of
//! bytes each side of a copy requires.
mod linear;
mod subrect;
mod swizzle;

pub mod dma;
pub mod surface;

// Avoid making this module public to prevent people importing it accidentally.
mod ffi;

pub use linear::*;
pub use subrect::*;
pub use swizzle::*;

pub(crate) const SECTOR_WIDTH_IN_BYTES: usize = 16;
pub(crate) const GOB_WIDTH_IN_BYTES: usize = 64;
pub(crate) const GOB_HEIGHT_IN_LINES: usize = 8;
pub(crate) const GOB_SIZE_IN_BYTES: usize = GOB_WIDTH_IN_BYTES * GOB_HEIGHT_IN_LINES;

/// The dimensions of a surface in texels.
///
/// For block compressed formats the copy and size functions divide these by
/// the format block dimensions internally, so the width and height are
/// always specified in texels rather than format blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// A 2D surface with a depth of a single slice.
    pub const fn new_2d(width: usize, height: usize) -> Self {
        Self::new(width, height, 1)
    }
}

// Block height can only have certain values based on the Tegra TRM page 1189 table 79.

/// An enumeration of supported GOB counts for the height of a block.
///
/// Texture file formats differ in how they encode the block height parameter.
/// Some formats may encode block height using log2, so a block height of 8
/// would be encoded as 3.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BlockHeight {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

/// An enumeration of supported GOB counts for the depth of a block.
///
/// A GOB is always a single slice deep, so this is also the number of slices
/// tiled into one block along the Z axis.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BlockDepth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

impl BlockHeight {
    /// Attempts to construct a block height from `value`.
    /// Returns [None] if `value` is not a supported block height.
    /// # Examples
    /**
    ```rust
    use blocklinear::BlockHeight;

    assert_eq!(Some(BlockHeight::Eight), BlockHeight::new(8));
    assert_eq!(None, BlockHeight::new(5));
    ```
    */
    pub fn new(value: usize) -> Option<Self> {
        match value {
            1 => Some(BlockHeight::One),
            2 => Some(BlockHeight::Two),
            4 => Some(BlockHeight::Four),
            8 => Some(BlockHeight::Eight),
            16 => Some(BlockHeight::Sixteen),
            32 => Some(BlockHeight::ThirtyTwo),
            _ => None,
        }
    }
}

impl BlockDepth {
    /// Attempts to construct a block depth from `value`.
    /// Returns [None] if `value` is not a supported block depth.
    pub fn new(value: usize) -> Option<Self> {
        match value {
            1 => Some(BlockDepth::One),
            2 => Some(BlockDepth::Two),
            4 => Some(BlockDepth::Four),
            8 => Some(BlockDepth::Eight),
            16 => Some(BlockDepth::Sixteen),
            32 => Some(BlockDepth::ThirtyTwo),
            _ => None,
        }
    }
}

/// Errors that can occur while copying between pitch linear and block linear
/// memory.
#[derive(Debug)]
pub enum SwizzleError {
    /// The source or destination region does not contain enough bytes.
    /// The required sizes are the results of the calculators in
    /// [surface] for the block linear side and `pitch * lines * depth` for
    /// the pitch side.
    NotEnoughData {
        expected_size: usize,
        actual_size: usize,
    },
    /// The bytes per format block is not one of 1, 2, 4, 8, 12, or 16.
    UnsupportedBytesPerBlock { bytes_per_block: usize },
}

impl std::fmt::Display for SwizzleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwizzleError::NotEnoughData {
                expected_size,
                actual_size,
            } => write!(
                f,
                "Not enough data. Expected {} bytes but found {} bytes.",
                expected_size, actual_size
            ),
            SwizzleError::UnsupportedBytesPerBlock { bytes_per_block } => write!(
                f,
                "Unsupported bytes per block {}. Supported values are 1, 2, 4, 8, 12, and 16.",
                bytes_per_block
            ),
        }
    }
}

impl std::error::Error for SwizzleError {}

/// Calculates the division of `x` by `d` but rounds up rather than truncating.
///
/// # Examples
/// Use this function when calculating dimensions for block compressed formats like BC7.
/**
```rust
# use blocklinear::div_round_up;
assert_eq!(2, div_round_up(8, 4));
assert_eq!(3, div_round_up(10, 4));
```
 */
#[inline]
pub const fn div_round_up(x: usize, d: usize) -> usize {
    (x + d - 1) / d
}

#[inline]
pub(crate) const fn align_up(x: usize, n: usize) -> usize {
    ((x + n - 1) / n) * n
}

#[inline]
pub(crate) const fn align_down(x: usize, n: usize) -> usize {
    (x / n) * n
}

#[inline]
pub(crate) const fn is_aligned(x: usize, n: usize) -> bool {
    x % n == 0
}
