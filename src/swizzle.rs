//! Copies between full pitch linear and block linear surfaces.
use crate::{
    align_down, align_up, div_round_up, is_aligned,
    surface::block_linear_layer_size,
    BlockDepth, BlockHeight, Dimensions, SwizzleError, GOB_HEIGHT_IN_LINES, GOB_SIZE_IN_BYTES,
    GOB_WIDTH_IN_BYTES,
};

// Intra GOB addressing from the Tegra TRM. A GOB interleaves 16x2 byte
// sectors, four across and eight down, with the two 256 byte halves of the
// GOB selected by bit 5 of the x coordinate.
#[inline]
pub(crate) fn gob_x_offset(x_bytes: usize) -> usize {
    (((x_bytes & 0x3F) >> 5) << 8) + (((x_bytes & 0x1F) >> 4) << 5) + (x_bytes & 0x0F)
}

#[inline]
pub(crate) fn gob_y_offset(line: usize) -> usize {
    (((line & 0x07) >> 1) << 6) + ((line & 0x01) << 4)
}

/// Deswizzles the full block linear surface in `block_linear` into the
/// pitch linear `pitch_data`.
///
/// `pitch` is the destination row stride in bytes, or 0 for tightly packed
/// rows. `bytes_per_block` must be 1, 2, 4, 8, 12, or 16.
///
/// # Examples
/// Uncompressed formats like R8G8B8A8 use a 1x1 format block.
/**
```rust
use blocklinear::{copy_block_linear_to_pitch, BlockDepth, BlockHeight, Dimensions};
use blocklinear::surface::block_linear_layer_size;

# fn main() -> Result<(), blocklinear::SwizzleError> {
let dimensions = Dimensions::new_2d(512, 512);
let block_linear = vec![
    0u8;
    block_linear_layer_size(dimensions, 1, 1, 4, BlockHeight::Sixteen, BlockDepth::One)
];
let mut pitch_data = vec![0u8; 512 * 512 * 4];
copy_block_linear_to_pitch(
    dimensions,
    1,
    1,
    4,
    0,
    BlockHeight::Sixteen,
    BlockDepth::One,
    &block_linear,
    &mut pitch_data,
)?;
# Ok(())
# }
```
 */
/// For compressed formats with multiple pixels in a block, pass the format
/// block dimensions and the size of one compressed block in bytes.
pub fn copy_block_linear_to_pitch(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    block_linear: &[u8],
    pitch_data: &mut [u8],
) -> Result<(), SwizzleError> {
    validate_regions(
        dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        block_linear.len(),
        pitch_data.len(),
    )?;

    copy_block_linear::<true>(
        dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height as usize,
        block_depth as usize,
        block_linear,
        pitch_data,
    );
    Ok(())
}

/// Swizzles the pitch linear `pitch_data` into the full block linear surface
/// in `block_linear`. The mirror of [copy_block_linear_to_pitch].
///
/// `pitch` is the source row stride in bytes, or 0 for tightly packed rows.
pub fn copy_pitch_to_block_linear(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    pitch_data: &[u8],
    block_linear: &mut [u8],
) -> Result<(), SwizzleError> {
    validate_regions(
        dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        block_linear.len(),
        pitch_data.len(),
    )?;

    copy_block_linear::<false>(
        dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height as usize,
        block_depth as usize,
        pitch_data,
        block_linear,
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn validate_regions(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    block_linear_len: usize,
    pitch_len: usize,
) -> Result<(), SwizzleError> {
    if !matches!(bytes_per_block, 1 | 2 | 4 | 8 | 12 | 16) {
        return Err(SwizzleError::UnsupportedBytesPerBlock { bytes_per_block });
    }

    let block_linear_size = block_linear_layer_size(
        dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        block_height,
        block_depth,
    );
    if block_linear_len < block_linear_size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: block_linear_size,
            actual_size: block_linear_len,
        });
    }

    let texture_width_bytes = div_round_up(dimensions.width, format_block_width) * bytes_per_block;
    let lines = div_round_up(dimensions.height, format_block_height) * dimensions.depth;
    let pitch_bytes = if pitch == 0 { texture_width_bytes } else { pitch };
    let pitch_size = match lines {
        0 => 0,
        _ => (lines - 1) * pitch_bytes + texture_width_bytes,
    };
    if pitch_len < pitch_size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: pitch_size,
            actual_size: pitch_len,
        });
    }

    Ok(())
}

// Width widening from the copy engine: as long as the row width in bytes
// stays divisible, adjacent format blocks are treated as a single wider
// element to reduce the per element swizzling overhead. The byte layout is
// unchanged. A 12 byte block is never widened.
pub(crate) fn widen_bytes_per_block(row_bytes: usize, mut bytes_per_block: usize) -> usize {
    if bytes_per_block != 12 {
        while bytes_per_block < 16 && is_aligned(row_bytes, bytes_per_block * 2) {
            bytes_per_block *= 2;
        }
    }
    bytes_per_block
}

#[allow(clippy::too_many_arguments)]
fn copy_block_linear<const DESWIZZLE: bool>(
    dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: usize,
    block_depth: usize,
    source: &[u8],
    destination: &mut [u8],
) {
    let texture_width_bytes = div_round_up(dimensions.width, format_block_width) * bytes_per_block;
    let aligned_row_stride = align_up(texture_width_bytes, GOB_WIDTH_IN_BYTES);

    let bytes_per_block = widen_bytes_per_block(texture_width_bytes, bytes_per_block);
    let texture_width = texture_width_bytes / bytes_per_block;

    let texture_height = div_round_up(dimensions.height, format_block_height);
    let rob_height_lines = block_height * GOB_HEIGHT_IN_LINES;
    let aligned_depth = align_up(dimensions.depth, block_depth);
    let pitch_bytes = if pitch == 0 { texture_width_bytes } else { pitch };
    let block_size = rob_height_lines * GOB_WIDTH_IN_BYTES * aligned_depth;

    macro_rules! copy {
        ($bpb:literal) => {
            copy_texture::<$bpb, DESWIZZLE>(
                dimensions.depth,
                texture_width,
                texture_height,
                aligned_row_stride,
                pitch_bytes,
                rob_height_lines,
                aligned_depth,
                block_size,
                block_height,
                source,
                destination,
            )
        };
    }

    match bytes_per_block {
        1 => copy!(1),
        2 => copy!(2),
        4 => copy!(4),
        8 => copy!(8),
        12 => copy!(12),
        16 => copy!(16),
        _ => unreachable!(),
    }
}

// The inner loops are monomorphized over the element size so every copy is a
// fixed size memcpy.
#[allow(clippy::too_many_arguments)]
fn copy_texture<const BPB: usize, const DESWIZZLE: bool>(
    depth: usize,
    texture_width: usize,
    texture_height: usize,
    aligned_row_stride: usize,
    pitch_bytes: usize,
    rob_height_lines: usize,
    aligned_depth: usize,
    block_size: usize,
    block_height: usize,
    source: &[u8],
    destination: &mut [u8],
) {
    let mut pitch_offset = 0;
    let mut slice_offset = 0;
    for _ in 0..depth {
        for line in 0..texture_height {
            let rob_offset = aligned_row_stride * align_down(line, rob_height_lines) * aligned_depth;
            let gob_row = (line % rob_height_lines) / GOB_HEIGHT_IN_LINES;
            let row_base = slice_offset + rob_offset + gob_row * GOB_SIZE_IN_BYTES + gob_y_offset(line);

            for pixel in 0..texture_width {
                let x_bytes = pixel * BPB;
                let swizzled = row_base
                    + (x_bytes / GOB_WIDTH_IN_BYTES) * block_size
                    + gob_x_offset(x_bytes);
                let linear = pitch_offset + x_bytes;

                if DESWIZZLE {
                    destination[linear..linear + BPB]
                        .copy_from_slice(&source[swizzled..swizzled + BPB]);
                } else {
                    destination[swizzled..swizzled + BPB]
                        .copy_from_slice(&source[linear..linear + BPB]);
                }
            }
            pitch_offset += pitch_bytes;
        }
        // The next slice starts one GOB further into each block.
        slice_offset += GOB_SIZE_IN_BYTES * block_height;
    }
}
