//! Documentation for the C API
use crate::{surface, BlockDepth, BlockHeight, Dimensions};

/// Deswizzles the full block linear surface in `block_linear` into `pitch_data`.
/// See the safe alternative [copy_block_linear_to_pitch](crate::copy_block_linear_to_pitch).
/// # Safety
/// `block_linear` and `block_linear_len` should refer to an array with at
/// least as many bytes as the result of [block_linear_layer_size].
/// Similarly, `pitch_data` and `pitch_data_len` should refer to an array with
/// at least `pitch * lines * depth` many bytes.
///
/// `block_height` and `block_depth` must be 1, 2, 4, 8, 16, or 32.
#[no_mangle]
pub unsafe extern "C" fn copy_block_linear_to_pitch(
    width: usize,
    height: usize,
    depth: usize,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: usize,
    block_depth: usize,
    block_linear: *const u8,
    block_linear_len: usize,
    pitch_data: *mut u8,
    pitch_data_len: usize,
) {
    let block_linear = std::slice::from_raw_parts(block_linear, block_linear_len);
    let pitch_data = std::slice::from_raw_parts_mut(pitch_data, pitch_data_len);

    let _ = crate::copy_block_linear_to_pitch(
        Dimensions::new(width, height, depth),
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        BlockHeight::new(block_height).unwrap(),
        BlockDepth::new(block_depth).unwrap(),
        block_linear,
        pitch_data,
    );
}

/// Swizzles the pitch linear `pitch_data` into `block_linear`.
/// See the safe alternative [copy_pitch_to_block_linear](crate::copy_pitch_to_block_linear).
/// # Safety
/// The same requirements as [copy_block_linear_to_pitch] with the roles of
/// the two regions swapped.
#[no_mangle]
pub unsafe extern "C" fn copy_pitch_to_block_linear(
    width: usize,
    height: usize,
    depth: usize,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    pitch: usize,
    block_height: usize,
    block_depth: usize,
    pitch_data: *const u8,
    pitch_data_len: usize,
    block_linear: *mut u8,
    block_linear_len: usize,
) {
    let pitch_data = std::slice::from_raw_parts(pitch_data, pitch_data_len);
    let block_linear = std::slice::from_raw_parts_mut(block_linear, block_linear_len);

    let _ = crate::copy_pitch_to_block_linear(
        Dimensions::new(width, height, depth),
        format_block_width,
        format_block_height,
        bytes_per_block,
        pitch,
        BlockHeight::new(block_height).unwrap(),
        BlockDepth::new(block_depth).unwrap(),
        pitch_data,
        block_linear,
    );
}

/// See [block_linear_layer_size](crate::surface::block_linear_layer_size).
#[no_mangle]
pub extern "C" fn block_linear_layer_size(
    width: usize,
    height: usize,
    depth: usize,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    block_height: usize,
    block_depth: usize,
) -> usize {
    surface::block_linear_layer_size(
        Dimensions::new(width, height, depth),
        format_block_width,
        format_block_height,
        bytes_per_block,
        BlockHeight::new(block_height).unwrap(),
        BlockDepth::new(block_depth).unwrap(),
    )
}

/// See [block_linear_surface_size](crate::surface::block_linear_surface_size).
#[no_mangle]
pub extern "C" fn block_linear_surface_size(
    width: usize,
    height: usize,
    depth: usize,
    format_block_width: usize,
    format_block_height: usize,
    bytes_per_block: usize,
    block_height: usize,
    block_depth: usize,
    level_count: usize,
    is_multi_layer: bool,
) -> usize {
    surface::block_linear_surface_size(
        Dimensions::new(width, height, depth),
        format_block_width,
        format_block_height,
        bytes_per_block,
        BlockHeight::new(block_height).unwrap(),
        BlockDepth::new(block_depth).unwrap(),
        level_count,
        is_multi_layer,
    )
}
