//! The copy front-end of the Maxwell DMA engine.
//!
//! A [CopyDescriptor] holds the decoded state of the engine's copy registers
//! for one launch. [CopyDescriptor::execute] dispatches to the matching copy
//! primitive over the caller provided source and destination regions.
//! Translating guest addresses to those regions, method decode, and
//! semaphore release belong to the surrounding emulator.
//!
//! Unsupported requests (remapped copies, block linear to block linear
//! copies, and surfaces with a block width other than one GOB) log a
//! diagnostic and complete without touching the destination.
use log::{debug, warn};

use crate::{
    align_down, copy_block_linear_to_pitch, copy_block_linear_to_pitch_subrect,
    copy_pitch_to_block_linear, copy_pitch_to_block_linear_subrect,
    surface::block_linear_layer_size,
    BlockDepth, BlockHeight, Dimensions, SwizzleError, GOB_WIDTH_IN_BYTES,
};

/// The memory layout of one operand of a DMA copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryLayout {
    BlockLinear,
    Pitch,
}

/// The block linear surface registers for one operand of a DMA copy.
///
/// The fields mirror the engine's surface register block. They are only
/// read when the operand's layout is [MemoryLayout::BlockLinear].
#[derive(Debug, Clone, Copy)]
pub struct CopySurface {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// The width of a block in GOBs. The Tegra X1 only supports one.
    pub block_width: usize,
    pub block_height: BlockHeight,
    pub block_depth: BlockDepth,
    /// The x origin of the copied rectangle in texels.
    pub origin_x: usize,
    /// The y origin of the copied rectangle in texels.
    pub origin_y: usize,
}

impl CopySurface {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }
}

/// The decoded state of the copy registers for one DMA launch.
#[derive(Debug, Clone, Copy)]
pub struct CopyDescriptor {
    /// Whether this is a multi line copy. A launch without this flag copies
    /// `line_length_in` raw bytes.
    pub multi_line: bool,
    /// Whether component remapping is enabled. Remapped copies are
    /// unimplemented and skipped.
    pub remap: bool,
    pub src_layout: MemoryLayout,
    pub dst_layout: MemoryLayout,
    /// The source row stride in bytes, or 0 for tightly packed rows.
    pub pitch_in: usize,
    /// The destination row stride in bytes, or 0 for tightly packed rows.
    pub pitch_out: usize,
    /// The length of one copied line in bytes.
    pub line_length_in: usize,
    /// The number of copied lines.
    pub line_count: usize,
    pub src_surface: CopySurface,
    pub dst_surface: CopySurface,
}

impl CopyDescriptor {
    /// The number of bytes this copy reads from the source region.
    ///
    /// The block linear side is bounded by the layer size of its surface,
    /// the pitch side by `pitch * line_count * depth`. Use this to size the
    /// source translation request.
    pub fn source_size(&self) -> usize {
        if !self.multi_line {
            return self.line_length_in;
        }
        match self.src_layout {
            MemoryLayout::BlockLinear => layer_size(&self.src_surface),
            MemoryLayout::Pitch => self.pitch_size(self.pitch_in),
        }
    }

    /// The number of bytes this copy writes to the destination region.
    /// The mirror of [source_size](CopyDescriptor::source_size).
    pub fn destination_size(&self) -> usize {
        if !self.multi_line {
            return self.line_length_in;
        }
        match self.dst_layout {
            MemoryLayout::BlockLinear => layer_size(&self.dst_surface),
            MemoryLayout::Pitch => self.pitch_size(self.pitch_out),
        }
    }

    fn pitch_size(&self, pitch: usize) -> usize {
        let pitch_bytes = if pitch == 0 { self.line_length_in } else { pitch };
        // The pitch operand of a swizzled copy covers every slice of the
        // block linear operand.
        let depth = match (self.src_layout, self.dst_layout) {
            (MemoryLayout::BlockLinear, MemoryLayout::Pitch) => self.src_surface.depth,
            (MemoryLayout::Pitch, MemoryLayout::BlockLinear) => self.dst_surface.depth,
            _ => 1,
        };
        pitch_bytes * self.line_count * depth
    }

    /// Performs the copy described by the registers.
    ///
    /// Unsupported requests complete with `Ok(())` after logging a warning
    /// and leave `destination` untouched.
    pub fn execute(&self, source: &[u8], destination: &mut [u8]) -> Result<(), SwizzleError> {
        if !self.multi_line {
            debug!("1D copy size: 0x{:X}", self.line_length_in);
            return copy_raw(self.line_length_in, source, destination);
        }

        if self.remap {
            warn!("Remapped DMA copies are unimplemented!");
            return Ok(());
        }

        match (self.src_layout, self.dst_layout) {
            (MemoryLayout::Pitch, MemoryLayout::Pitch) => self.copy_pitch_to_pitch(source, destination),
            (MemoryLayout::BlockLinear, MemoryLayout::BlockLinear) => {
                warn!("BlockLinear to BlockLinear DMA copies are unimplemented!");
                Ok(())
            }
            (MemoryLayout::BlockLinear, MemoryLayout::Pitch) => {
                self.copy_from_block_linear(source, destination)
            }
            (MemoryLayout::Pitch, MemoryLayout::BlockLinear) => {
                self.copy_to_block_linear(source, destination)
            }
        }
    }

    fn copy_pitch_to_pitch(&self, source: &[u8], destination: &mut [u8]) -> Result<(), SwizzleError> {
        let line = self.line_length_in;
        if self.pitch_in == line && self.pitch_out == line {
            // Both tightly packed, copy as is.
            return copy_raw(line * self.line_count, source, destination);
        }

        if self.line_count == 0 {
            return Ok(());
        }
        let source_size = (self.line_count - 1) * self.pitch_in + line;
        if source.len() < source_size {
            return Err(SwizzleError::NotEnoughData {
                expected_size: source_size,
                actual_size: source.len(),
            });
        }
        let destination_size = (self.line_count - 1) * self.pitch_out + line;
        if destination.len() < destination_size {
            return Err(SwizzleError::NotEnoughData {
                expected_size: destination_size,
                actual_size: destination.len(),
            });
        }

        let mut src = 0;
        let mut dst = 0;
        for _ in 0..self.line_count {
            destination[dst..dst + line].copy_from_slice(&source[src..src + line]);
            src += self.pitch_in;
            dst += self.pitch_out;
        }
        Ok(())
    }

    fn copy_from_block_linear(
        &self,
        source: &[u8],
        destination: &mut [u8],
    ) -> Result<(), SwizzleError> {
        let surface = &self.src_surface;
        if surface.block_width != 1 {
            warn!(
                "Blocklinear surfaces with a non-one block width are unsupported on the Tegra X1: {}",
                surface.block_width
            );
            return Ok(());
        }

        let pitch_dimensions =
            Dimensions::new(self.line_length_in, self.line_count, surface.depth);
        debug!(
            "{}x{} -> {}x{}",
            surface.width, surface.height, pitch_dimensions.width, pitch_dimensions.height
        );

        if needs_subrect(surface, pitch_dimensions) {
            copy_block_linear_to_pitch_subrect(
                pitch_dimensions,
                surface.dimensions(),
                1,
                1,
                1,
                self.pitch_out,
                surface.block_height,
                surface.block_depth,
                source,
                destination,
                surface.origin_x,
                surface.origin_y,
            )
        } else {
            copy_block_linear_to_pitch(
                pitch_dimensions,
                1,
                1,
                1,
                self.pitch_out,
                surface.block_height,
                surface.block_depth,
                source,
                destination,
            )
        }
    }

    fn copy_to_block_linear(
        &self,
        source: &[u8],
        destination: &mut [u8],
    ) -> Result<(), SwizzleError> {
        let surface = &self.dst_surface;
        if surface.block_width != 1 {
            warn!(
                "Blocklinear surfaces with a non-one block width are unsupported on the Tegra X1: {}",
                surface.block_width
            );
            return Ok(());
        }

        let pitch_dimensions =
            Dimensions::new(self.line_length_in, self.line_count, surface.depth);
        debug!(
            "{}x{} -> {}x{}",
            pitch_dimensions.width, pitch_dimensions.height, surface.width, surface.height
        );

        if needs_subrect(surface, pitch_dimensions) {
            copy_pitch_to_block_linear_subrect(
                pitch_dimensions,
                surface.dimensions(),
                1,
                1,
                1,
                self.pitch_in,
                surface.block_height,
                surface.block_depth,
                source,
                destination,
                surface.origin_x,
                surface.origin_y,
            )
        } else {
            copy_pitch_to_block_linear(
                pitch_dimensions,
                1,
                1,
                1,
                self.pitch_in,
                surface.block_height,
                surface.block_depth,
                source,
                destination,
            )
        }
    }
}

// A copy needs the subrect path when the pitch rectangle does not span the
// full width of the block linear surface in whole GOBs or starts away from
// the surface origin.
fn needs_subrect(surface: &CopySurface, pitch_dimensions: Dimensions) -> bool {
    align_down(surface.width, GOB_WIDTH_IN_BYTES)
        != align_down(pitch_dimensions.width, GOB_WIDTH_IN_BYTES)
        || surface.origin_x != 0
        || surface.origin_y != 0
}

fn layer_size(surface: &CopySurface) -> usize {
    // Swizzled DMA operands are single byte texels unless remapping is enabled.
    block_linear_layer_size(
        surface.dimensions(),
        1,
        1,
        1,
        surface.block_height,
        surface.block_depth,
    )
}

fn copy_raw(size: usize, source: &[u8], destination: &mut [u8]) -> Result<(), SwizzleError> {
    if source.len() < size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: size,
            actual_size: source.len(),
        });
    }
    if destination.len() < size {
        return Err(SwizzleError::NotEnoughData {
            expected_size: size,
            actual_size: destination.len(),
        });
    }
    destination[..size].copy_from_slice(&source[..size]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_linear_surface(width: usize, height: usize) -> CopySurface {
        CopySurface {
            width,
            height,
            depth: 1,
            block_width: 1,
            block_height: BlockHeight::Two,
            block_depth: BlockDepth::One,
            origin_x: 0,
            origin_y: 0,
        }
    }

    fn pitch_to_block_linear(surface: CopySurface, line_length: usize, lines: usize) -> CopyDescriptor {
        CopyDescriptor {
            multi_line: true,
            remap: false,
            src_layout: MemoryLayout::Pitch,
            dst_layout: MemoryLayout::BlockLinear,
            pitch_in: 0,
            pitch_out: 0,
            line_length_in: line_length,
            line_count: lines,
            src_surface: surface,
            dst_surface: surface,
        }
    }

    #[test]
    fn execute_1d_copy() {
        let descriptor = CopyDescriptor {
            multi_line: false,
            remap: false,
            src_layout: MemoryLayout::Pitch,
            dst_layout: MemoryLayout::Pitch,
            pitch_in: 0,
            pitch_out: 0,
            line_length_in: 4,
            line_count: 1,
            src_surface: block_linear_surface(0, 0),
            dst_surface: block_linear_surface(0, 0),
        };
        assert_eq!(4, descriptor.source_size());

        let source = [1, 2, 3, 4, 5];
        let mut destination = [0u8; 4];
        descriptor.execute(&source, &mut destination).unwrap();
        assert_eq!([1, 2, 3, 4], destination);
    }

    #[test]
    fn execute_pitch_to_pitch_strided() {
        let descriptor = CopyDescriptor {
            multi_line: true,
            remap: false,
            src_layout: MemoryLayout::Pitch,
            dst_layout: MemoryLayout::Pitch,
            pitch_in: 4,
            pitch_out: 8,
            line_length_in: 2,
            line_count: 2,
            src_surface: block_linear_surface(0, 0),
            dst_surface: block_linear_surface(0, 0),
        };

        let source = [1, 2, 0, 0, 3, 4, 0, 0];
        let mut destination = [0u8; 16];
        descriptor.execute(&source, &mut destination).unwrap();
        assert_eq!(
            [1, 2, 0, 0, 0, 0, 0, 0, 3, 4, 0, 0, 0, 0, 0, 0],
            destination
        );
    }

    #[test]
    fn execute_full_surface_swizzle() {
        let surface = block_linear_surface(64, 32);
        let descriptor = pitch_to_block_linear(surface, 64, 32);
        assert_eq!(64 * 32, descriptor.source_size());
        assert_eq!(2048, descriptor.destination_size());

        let source: Vec<u8> = (0..64 * 32u32).map(|i| i as u8).collect();
        let mut destination = vec![0u8; descriptor.destination_size()];
        descriptor.execute(&source, &mut destination).unwrap();

        let mut expected = vec![0u8; destination.len()];
        copy_pitch_to_block_linear(
            Dimensions::new_2d(64, 32),
            1,
            1,
            1,
            0,
            BlockHeight::Two,
            BlockDepth::One,
            &source,
            &mut expected,
        )
        .unwrap();
        assert_eq!(expected, destination);
    }

    #[test]
    fn execute_subrect_swizzle_for_nonzero_origin() {
        let mut surface = block_linear_surface(128, 64);
        surface.origin_x = 16;
        surface.origin_y = 8;
        let descriptor = pitch_to_block_linear(surface, 32, 16);

        let source: Vec<u8> = (0..32 * 16u32).map(|i| i as u8).collect();
        let mut destination = vec![0u8; descriptor.destination_size()];
        descriptor.execute(&source, &mut destination).unwrap();

        let mut expected = vec![0u8; destination.len()];
        copy_pitch_to_block_linear_subrect(
            Dimensions::new_2d(32, 16),
            Dimensions::new_2d(128, 64),
            1,
            1,
            1,
            0,
            BlockHeight::Two,
            BlockDepth::One,
            &source,
            &mut expected,
            16,
            8,
        )
        .unwrap();
        assert_eq!(expected, destination);
    }

    #[test]
    fn execute_subrect_swizzle_for_narrow_line() {
        // 100 and 128 differ after aligning down to whole GOBs.
        let surface = block_linear_surface(128, 64);
        let descriptor = pitch_to_block_linear(surface, 100, 64);

        let source = vec![0xABu8; 100 * 64];
        let mut destination = vec![0u8; descriptor.destination_size()];
        descriptor.execute(&source, &mut destination).unwrap();

        let written = destination.iter().filter(|b| **b == 0xAB).count();
        assert_eq!(100 * 64, written);
    }

    #[test]
    fn execute_block_linear_to_block_linear_skipped() {
        let surface = block_linear_surface(64, 32);
        let descriptor = CopyDescriptor {
            multi_line: true,
            remap: false,
            src_layout: MemoryLayout::BlockLinear,
            dst_layout: MemoryLayout::BlockLinear,
            pitch_in: 0,
            pitch_out: 0,
            line_length_in: 64,
            line_count: 32,
            src_surface: surface,
            dst_surface: surface,
        };

        let source = vec![0xFFu8; 2048];
        let mut destination = vec![0u8; 2048];
        descriptor.execute(&source, &mut destination).unwrap();
        assert!(destination.iter().all(|b| *b == 0));
    }

    #[test]
    fn execute_remap_skipped() {
        let surface = block_linear_surface(64, 32);
        let mut descriptor = pitch_to_block_linear(surface, 64, 32);
        descriptor.remap = true;

        let source = vec![0xFFu8; 2048];
        let mut destination = vec![0u8; 2048];
        descriptor.execute(&source, &mut destination).unwrap();
        assert!(destination.iter().all(|b| *b == 0));
    }

    #[test]
    fn execute_non_one_block_width_skipped() {
        let mut surface = block_linear_surface(64, 32);
        surface.block_width = 2;
        let descriptor = pitch_to_block_linear(surface, 64, 32);

        let source = vec![0xFFu8; 2048];
        let mut destination = vec![0u8; 2048];
        descriptor.execute(&source, &mut destination).unwrap();
        assert!(destination.iter().all(|b| *b == 0));
    }
}
