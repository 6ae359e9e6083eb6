#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

extern crate rand;
use rand::{rngs::StdRng, Rng, SeedableRng};

use blocklinear::surface::block_linear_layer_size;
use blocklinear::{
    copy_block_linear_to_pitch, copy_pitch_to_block_linear, BlockDepth, BlockHeight, Dimensions,
};

#[derive(Debug)]
struct Input {
    width: usize,
    height: usize,
    depth: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    bytes_per_block: usize,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.int_in_range(0..=256)?,
            height: u.int_in_range(0..=256)?,
            depth: u.int_in_range(1..=8)?,
            block_height: u.arbitrary()?,
            block_depth: u.arbitrary()?,
            bytes_per_block: [1, 2, 4, 8, 12, 16][u.int_in_range(0..=5usize)?],
        })
    }
}

fuzz_target!(|input: Input| {
    let dimensions = Dimensions::new(input.width, input.height, input.depth);

    let pitch_size = input.width * input.bytes_per_block * input.height * input.depth;
    let seed = [13u8; 32];
    let mut rng: StdRng = SeedableRng::from_seed(seed);
    let pitch_data: Vec<u8> = (0..pitch_size)
        .map(|_| rng.gen_range::<u8, _>(0..=255))
        .collect();

    let mut block_linear = vec![
        0u8;
        block_linear_layer_size(
            dimensions,
            1,
            1,
            input.bytes_per_block,
            input.block_height,
            input.block_depth
        )
    ];
    copy_pitch_to_block_linear(
        dimensions,
        1,
        1,
        input.bytes_per_block,
        0,
        input.block_height,
        input.block_depth,
        &pitch_data,
        &mut block_linear,
    )
    .unwrap();

    let mut output = vec![0u8; pitch_size];
    copy_block_linear_to_pitch(
        dimensions,
        1,
        1,
        input.bytes_per_block,
        0,
        input.block_height,
        input.block_depth,
        &block_linear,
        &mut output,
    )
    .unwrap();

    assert_eq!(pitch_data, output);
});
