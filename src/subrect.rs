//! Copies between a pitch linear region and a sub-rectangle of a larger
//! block linear surface.
//!
//! The pitch region must fit entirely inside the block linear surface:
//! `origin + pitch_dimensions` may not exceed the block linear dimensions on
//! any axis, and the pitch depth may not exceed the block linear depth.
use std::cmp::min;

use crate::{
    align_down, align_up, div_round_up, is_aligned,
    surface::block_linear_layer_size,
    swizzle::{gob_x_offset, gob_y_offset},
    BlockDepth, BlockHeight, Dimensions, SwizzleError, GOB_HEIGHT_IN_LINES, GOB_SIZE_IN_BYTES,
    GOB_WIDTH_IN_BYTES, SECTOR_WIDTH_IN_BYTES,
};

/// Deswizzles the sub-rectangle of `block_linear` selected by `origin_x`,
/// `origin_y`, and `pitch_dimensions` into the pitch linear `pitch_data`.
///
/// `block_linear_dimensions` describes the full block linear surface and
/// determines the row and slice strides of the swizzled data. The origin is
/// given in texels and is rounded up to whole format blocks.
#[allow(clippy::too_many_arguments)]
pub fn copy_block_linear_to_pitch_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    block_linear: &[u8],
    pitch_data: &mut [u8],
    origin_x: usize,
    origin_y: usize,
) -> Result<(), SwizzleError> {
    validate_regions(
        pitch_dimensions,
        block_linear_dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        block_linear.len(),
        pitch_data.len(),
    )?;

    copy_block_linear_subrect::<true>(
        pitch_dimensions,
        block_linear_dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height as usize,
        block_depth as usize,
        block_linear,
        pitch_data,
        origin_x,
        origin_y,
    );
    Ok(())
}

/// Swizzles the pitch linear `pitch_data` into the sub-rectangle of
/// `block_linear` selected by `origin_x`, `origin_y`, and
/// `pitch_dimensions`. The mirror of [copy_block_linear_to_pitch_subrect].
///
/// Bytes of the block linear surface outside the sub-rectangle are left
/// untouched.
#[allow(clippy::too_many_arguments)]
pub fn copy_pitch_to_block_linear_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    pitch_data: &[u8],
    block_linear: &mut [u8],
    origin_x: usize,
    origin_y: usize,
) -> Result<(), SwizzleError> {
    validate_regions(
        pitch_dimensions,
        block_linear_dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        block_linear.len(),
        pitch_data.len(),
    )?;

    copy_block_linear_subrect::<false>(
        pitch_dimensions,
        block_linear_dimensions,
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        block_height as usize,
        block_depth as usize,
        pitch_data,
        block_linear,
        origin_x,
        origin_y,
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn validate_regions(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
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
        block_linear_dimensions,
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

    let pitch_width_bytes =
        div_round_up(pitch_dimensions.width, format_block_width) * bytes_per_block;
    let lines =
        div_round_up(pitch_dimensions.height, format_block_height) * pitch_dimensions.depth;
    let pitch_bytes = if pitch == 0 { pitch_width_bytes } else { pitch };
    let pitch_size = match lines {
        0 => 0,
        _ => (lines - 1) * pitch_bytes + pitch_width_bytes,
    };
    if pitch_len < pitch_size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: pitch_size,
            actual_size: pitch_len,
        });
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn copy_block_linear_subrect<const DESWIZZLE: bool>(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: usize,
    block_depth: usize,
    source: &[u8],
    destination: &mut [u8],
    origin_x: usize,
    origin_y: usize,
) {
    let pitch_width_bytes =
        div_round_up(pitch_dimensions.width, format_block_width) * bytes_per_block;
    let aligned_row_stride = align_up(
        div_round_up(block_linear_dimensions.width, format_block_width) * bytes_per_block,
        GOB_WIDTH_IN_BYTES,
    );

    let origin_x_bytes = div_round_up(origin_x, format_block_width) * bytes_per_block;
    let origin_y_lines = div_round_up(origin_y, format_block_height);

    // Widening must keep the widened elements on element boundaries relative
    // to the GOB grid, so both the slack before the first GOB boundary and
    // the remaining row length have to divide evenly. The wrapping
    // subtraction preserves the modulus test when the row ends before the
    // first boundary because the divisor is a power of two.
    let leading_slack = align_up(origin_x_bytes, GOB_WIDTH_IN_BYTES) - origin_x_bytes;
    let mut bytes_per_block = bytes_per_block;
    if bytes_per_block != 12 {
        while bytes_per_block < 16
            && is_aligned(leading_slack, bytes_per_block * 2)
            && is_aligned(
                pitch_width_bytes.wrapping_sub(leading_slack),
                bytes_per_block * 2,
            )
        {
            bytes_per_block *= 2;
        }
    }
    let pitch_texture_width = pitch_width_bytes / bytes_per_block;

    let pitch_texture_height = div_round_up(pitch_dimensions.height, format_block_height);
    let rob_height_lines = block_height * GOB_HEIGHT_IN_LINES;
    let aligned_depth = align_up(block_linear_dimensions.depth, block_depth);
    let pitch_bytes = if pitch == 0 { pitch_width_bytes } else { pitch };
    let block_size = rob_height_lines * GOB_WIDTH_IN_BYTES * aligned_depth;

    macro_rules! copy {
        ($bpb:literal) => {
            copy_subrect::<$bpb, DESWIZZLE>(
                pitch_dimensions.depth,
                pitch_texture_width,
                pitch_texture_height,
                origin_x_bytes,
                origin_y_lines,
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

#[allow(clippy::too_many_arguments)]
fn copy_subrect<const BPB: usize, const DESWIZZLE: bool>(
    depth: usize,
    texture_width: usize,
    texture_height: usize,
    origin_x_bytes: usize,
    origin_y_lines: usize,
    aligned_row_stride: usize,
    pitch_bytes: usize,
    rob_height_lines: usize,
    aligned_depth: usize,
    block_size: usize,
    block_height: usize,
    source: &[u8],
    destination: &mut [u8],
) {
    let row_end = origin_x_bytes + texture_width * BPB;

    // Split each row into a leading partial GOB, whole interior GOBs, and a
    // trailing partial GOB. A 12 byte element never divides a GOB evenly, so
    // it always takes the per element path.
    let (leading_elements, whole_gobs, trailing_elements) = if GOB_WIDTH_IN_BYTES % BPB == 0 {
        let leading_end = min(align_up(origin_x_bytes, GOB_WIDTH_IN_BYTES), row_end);
        (
            (leading_end - origin_x_bytes) / BPB,
            (row_end - leading_end) / GOB_WIDTH_IN_BYTES,
            ((row_end - leading_end) % GOB_WIDTH_IN_BYTES) / BPB,
        )
    } else {
        (texture_width, 0, 0)
    };
    let whole_gobs_start = align_up(origin_x_bytes, GOB_WIDTH_IN_BYTES);

    let mut pitch_offset = 0;
    let mut slice_offset = 0;
    for _ in 0..depth {
        for line in 0..texture_height {
            let surface_line = origin_y_lines + line;
            let rob_offset =
                aligned_row_stride * align_down(surface_line, rob_height_lines) * aligned_depth;
            let gob_row = (surface_line % rob_height_lines) / GOB_HEIGHT_IN_LINES;
            let row_base =
                slice_offset + rob_offset + gob_row * GOB_SIZE_IN_BYTES + gob_y_offset(surface_line);

            copy_elements::<BPB, DESWIZZLE>(
                0,
                leading_elements,
                origin_x_bytes,
                row_base,
                pitch_offset,
                block_size,
                source,
                destination,
            );

            // Whole GOBs copy as four 16 byte sectors per line.
            for gob in 0..whole_gobs {
                let gob_x_bytes = whole_gobs_start + gob * GOB_WIDTH_IN_BYTES;
                let swizzled = row_base + (gob_x_bytes / GOB_WIDTH_IN_BYTES) * block_size;
                let linear = pitch_offset + (gob_x_bytes - origin_x_bytes);

                for (linear_sector, swizzled_sector) in
                    [(0, 0x00), (16, 0x20), (32, 0x100), (48, 0x120)]
                {
                    let swizzled = swizzled + swizzled_sector;
                    let linear = linear + linear_sector;
                    if DESWIZZLE {
                        destination[linear..linear + SECTOR_WIDTH_IN_BYTES]
                            .copy_from_slice(&source[swizzled..swizzled + SECTOR_WIDTH_IN_BYTES]);
                    } else {
                        destination[swizzled..swizzled + SECTOR_WIDTH_IN_BYTES]
                            .copy_from_slice(&source[linear..linear + SECTOR_WIDTH_IN_BYTES]);
                    }
                }
            }

            copy_elements::<BPB, DESWIZZLE>(
                texture_width - trailing_elements,
                texture_width,
                origin_x_bytes,
                row_base,
                pitch_offset,
                block_size,
                source,
                destination,
            );

            pitch_offset += pitch_bytes;
        }
        slice_offset += GOB_SIZE_IN_BYTES * block_height;
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn copy_elements<const BPB: usize, const DESWIZZLE: bool>(
    from: usize,
    to: usize,
    origin_x_bytes: usize,
    row_base: usize,
    pitch_offset: usize,
    block_size: usize,
    source: &[u8],
    destination: &mut [u8],
) {
    for pixel in from..to {
        let x_bytes = origin_x_bytes + pixel * BPB;
        let swizzled =
            row_base + (x_bytes / GOB_WIDTH_IN_BYTES) * block_size + gob_x_offset(x_bytes);
        let linear = pitch_offset + pixel * BPB;

        if DESWIZZLE {
            destination[linear..linear + BPB].copy_from_slice(&source[swizzled..swizzled + BPB]);
        } else {
            destination[swizzled..swizzled + BPB].copy_from_slice(&source[linear..linear + BPB]);
        }
    }
}
