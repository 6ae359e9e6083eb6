#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

use blocklinear::{copy_block_linear_to_pitch, BlockDepth, BlockHeight, Dimensions};

#[derive(Debug)]
struct Input {
    width: usize,
    height: usize,
    depth: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    bytes_per_block: usize,
    pitch: usize,
    block_linear_size: usize,
    pitch_size: usize,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.int_in_range(0..=4096)?,
            height: u.int_in_range(0..=4096)?,
            depth: u.int_in_range(0..=16)?,
            block_height: u.arbitrary()?,
            block_depth: u.arbitrary()?,
            bytes_per_block: u.int_in_range(0..=32)?,
            pitch: u.int_in_range(0..=65536)?,
            block_linear_size: u.int_in_range(0..=16777216)?,
            pitch_size: u.int_in_range(0..=16777216)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let block_linear = vec![0u8; input.block_linear_size];
    let mut pitch_data = vec![0u8; input.pitch_size];

    // This should never panic even if the input sizes are incorrect.
    let _ = copy_block_linear_to_pitch(
        Dimensions::new(input.width, input.height, input.depth),
        1,
        1,
        input.bytes_per_block,
        input.pitch,
        input.block_height,
        input.block_depth,
        &block_linear,
        &mut pitch_data,
    );
});
