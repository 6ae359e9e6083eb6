//! Strided row copies between pitch linear and tightly packed linear data.
use crate::{Dimensions, SwizzleError};

/// Compacts the rows of the pitch linear `source` with a row stride of
/// `pitch` bytes into tightly packed rows of `line_bytes` in `destination`.
pub fn copy_pitch_linear_to_linear(
    dimensions: Dimensions,
    pitch: usize,
    line_bytes: usize,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    copy_rows(
        dimensions.height,
        pitch,
        line_bytes,
        line_bytes,
        source,
        destination,
    )
}

/// Expands the tightly packed rows of `line_bytes` in `source` into the
/// pitch linear `destination` with a row stride of `pitch` bytes. The mirror
/// of [copy_pitch_linear_to_linear].
pub fn copy_linear_to_pitch_linear(
    dimensions: Dimensions,
    pitch: usize,
    line_bytes: usize,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    copy_rows(
        dimensions.height,
        line_bytes,
        pitch,
        line_bytes,
        source,
        destination,
    )
}

fn copy_rows(
    lines: usize,
    source_stride: usize,
    destination_stride: usize,
    line_bytes: usize,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    if lines == 0 {
        return Ok(());
    }

    let source_size = (lines - 1) * source_stride + line_bytes;
    if source.len() < source_size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: source_size,
            actual_size: source.len(),
        });
    }
    let destination_size = (lines - 1) * destination_stride + line_bytes;
    if destination.len() < destination_size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: destination_size,
            actual_size: destination.len(),
        });
    }

    let mut src = 0;
    let mut dst = 0;
    for _ in 0..lines {
        destination[dst..dst + line_bytes].copy_from_slice(&source[src..src + line_bytes]);
        src += source_stride;
        dst += destination_stride;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_rows() {
        let source: Vec<u8> = (0..32u8).collect();
        let mut destination = vec![0u8; 12];
        copy_pitch_linear_to_linear(
            Dimensions::new_2d(4, 3),
            8,
            4,
            &source,
            &mut destination,
        )
        .unwrap();
        assert_eq!(
            vec![0, 1, 2, 3, 8, 9, 10, 11, 16, 17, 18, 19],
            destination
        );
    }

    #[test]
    fn expand_rows() {
        let source: Vec<u8> = (1..=12u8).collect();
        let mut destination = vec![0u8; 24];
        copy_linear_to_pitch_linear(
            Dimensions::new_2d(4, 3),
            8,
            4,
            &source,
            &mut destination,
        )
        .unwrap();
        assert_eq!(
            vec![1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0, 9, 10, 11, 12, 0, 0, 0, 0],
            destination
        );
    }

    #[test]
    fn compact_not_enough_data() {
        let result = copy_pitch_linear_to_linear(
            Dimensions::new_2d(4, 3),
            8,
            4,
            &[0u8; 8],
            &mut [0u8; 12],
        );
        assert!(matches!(
            result,
            Err(SwizzleError::NotEnoughData {
                expected_size: 20,
                actual_size: 8
            })
        ));
    }
}
