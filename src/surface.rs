//! Size calculators for block linear surfaces and their mip chains.
//!
//! Swizzled surfaces are padded to whole blocks, so a block linear layer is
//! usually larger than the same data in row-major order. The mip levels of a
//! surface are stored contiguously, and the block shape shrinks as the
//! levels become smaller than the original block.
use std::cmp::max;

use crate::{
    align_up, div_round_up, BlockDepth, BlockHeight, Dimensions, GOB_HEIGHT_IN_LINES,
    GOB_SIZE_IN_BYTES, GOB_WIDTH_IN_BYTES,
};

/// The layout of a single level in a block linear mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevelLayout {
    /// The dimensions of this level in texels.
    pub dimensions: Dimensions,
    /// The size of this level in bytes when tightly packed in the source format.
    pub linear_size: usize,
    /// The size of this level in bytes when tightly packed in the target
    /// format, or [linear_size](#structfield.linear_size) if no target format
    /// was given.
    pub target_linear_size: usize,
    /// The size of this level in bytes in the block linear layout.
    pub block_linear_size: usize,
    /// The block height used for this level.
    pub block_height: BlockHeight,
    /// The block depth used for this level.
    pub block_depth: BlockDepth,
}

// The hardware never tiles a block taller or deeper than the surface it
// covers. Once a mip level shrinks below the block, the block snaps down to
// the next power of two covering the surface.
pub(crate) fn calculate_block_gobs(block_gobs: usize, surface_gobs: usize) -> usize {
    if surface_gobs > block_gobs {
        block_gobs
    } else {
        surface_gobs.next_power_of_two()
    }
}

/// Calculates the size in bytes of a single block linear layer with the given
/// dimensions and block shape.
///
/// This is the stride between array layers of a surface without mipmaps and
/// the exact region accessed by [copy_pitch_to_block_linear](crate::copy_pitch_to_block_linear)
/// on the block linear side.
/// # Examples
/// Uncompressed formats like R8G8B8A8 use a 1x1 format block.
/**
```rust
use blocklinear::{BlockDepth, BlockHeight, Dimensions};
use blocklinear::surface::block_linear_layer_size;

assert_eq!(
    1048576,
    block_linear_layer_size(
        Dimensions::new_2d(512, 512),
        1,
        1,
        4,
        BlockHeight::Sixteen,
        BlockDepth::One
    )
);
```
 */
pub fn block_linear_layer_size(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
) -> usize {
    // The width of a ROB in format blocks and in bytes including padding GOBs.
    let rob_line_width = div_round_up(dimensions.width, format_block_width);
    let rob_line_bytes = align_up(rob_line_width * bytes_per_block, GOB_WIDTH_IN_BYTES);

    let rob_height_lines = GOB_HEIGHT_IN_LINES * block_height as usize;
    let surface_height_lines = div_round_up(dimensions.height, format_block_height);
    let surface_height_robs = div_round_up(surface_height_lines, rob_height_lines);

    let aligned_depth = align_up(dimensions.depth, block_depth as usize);

    rob_line_bytes * rob_height_lines * surface_height_robs * aligned_depth
}

/// Calculates the total size in bytes of `level_count` mip levels stored
/// contiguously in the block linear layout.
///
/// `block_height` and `block_depth` describe the first level. Both shrink
/// for later levels as the surface falls below the block.
/// With `is_multi_layer` the total is aligned up to a whole block of the
/// first level's shape, giving the stride between array layers.
#[allow(clippy::too_many_arguments)]
pub fn block_linear_surface_size(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    level_count: usize,
    is_multi_layer: bool,
) -> usize {
    // The size of the surface in GOBs on every axis.
    let mut gobs_width = div_round_up(
        div_round_up(dimensions.width, format_block_width) * bytes_per_block,
        GOB_WIDTH_IN_BYTES,
    );
    let mut gobs_height = div_round_up(
        div_round_up(dimensions.height, format_block_height),
        GOB_HEIGHT_IN_LINES,
    );
    let mut gobs_depth = dimensions.depth;

    let mut block_height = block_height as usize;
    let mut block_depth = block_depth as usize;
    let layer_alignment = GOB_SIZE_IN_BYTES * block_height * block_depth;

    let mut total_size = 0;
    for _ in 0..level_count {
        total_size += (GOB_WIDTH_IN_BYTES * gobs_width)
            * (GOB_HEIGHT_IN_LINES * align_up(gobs_height, block_height))
            * align_up(gobs_depth, block_depth);

        gobs_width = max(gobs_width / 2, 1);
        gobs_height = max(gobs_height / 2, 1);
        gobs_depth = max(gobs_depth / 2, 1);

        block_height = calculate_block_gobs(block_height, gobs_height);
        block_depth = calculate_block_gobs(block_depth, gobs_depth);
    }

    if is_multi_layer {
        align_up(total_size, layer_alignment)
    } else {
        total_size
    }
}

/// Calculates the layout of every level of a block linear mip chain.
///
/// The target format parameters give
/// [target_linear_size](MipLevelLayout::target_linear_size) for surfaces that
/// are decoded to a different format on the host. Pass a `target_bytes_per_block`
/// of 0 if no target format is needed.
///
/// The sum of the [block_linear_size](MipLevelLayout::block_linear_size)
/// fields equals [block_linear_surface_size] without multi layer alignment.
#[allow(clippy::too_many_arguments)]
pub fn block_linear_mip_layout(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    target_format_block_width: usize,
    target_format_block_height: usize,
    target_bytes_per_block: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    level_count: usize,
) -> Vec<MipLevelLayout> {
    let mut mip_levels = Vec::with_capacity(level_count);

    let mut dimensions = dimensions;
    let mut gobs_width = div_round_up(
        div_round_up(dimensions.width, format_block_width) * bytes_per_block,
        GOB_WIDTH_IN_BYTES,
    );
    let mut gobs_height = div_round_up(
        div_round_up(dimensions.height, format_block_height),
        GOB_HEIGHT_IN_LINES,
    );
    // A GOB is always a single slice deep, so the surface depth in GOBs is
    // just the depth dimension.

    let mut block_height = block_height as usize;
    let mut block_depth = block_depth as usize;

    for _ in 0..level_count {
        let linear_size = div_round_up(dimensions.width, format_block_width)
            * bytes_per_block
            * div_round_up(dimensions.height, format_block_height)
            * dimensions.depth;
        let target_linear_size = if target_bytes_per_block == 0 {
            linear_size
        } else {
            div_round_up(dimensions.width, target_format_block_width)
                * target_bytes_per_block
                * div_round_up(dimensions.height, target_format_block_height)
                * dimensions.depth
        };

        mip_levels.push(MipLevelLayout {
            dimensions,
            linear_size,
            target_linear_size,
            block_linear_size: (GOB_WIDTH_IN_BYTES * gobs_width)
                * (GOB_HEIGHT_IN_LINES * align_up(gobs_height, block_height))
                * align_up(dimensions.depth, block_depth),
            block_height: BlockHeight::new(block_height).unwrap(),
            block_depth: BlockDepth::new(block_depth).unwrap(),
        });

        gobs_width = max(gobs_width / 2, 1);
        gobs_height = max(gobs_height / 2, 1);

        dimensions.width = max(dimensions.width / 2, 1);
        dimensions.height = max(dimensions.height / 2, 1);
        dimensions.depth = max(dimensions.depth / 2, 1);

        block_height = calculate_block_gobs(block_height, gobs_height);
        block_depth = calculate_block_gobs(block_depth, dimensions.depth);
    }

    mip_levels
}
