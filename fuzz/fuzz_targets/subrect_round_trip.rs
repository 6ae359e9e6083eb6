#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

extern crate rand;
use rand::{rngs::StdRng, Rng, SeedableRng};

use blocklinear::surface::block_linear_layer_size;
use blocklinear::{
    copy_block_linear_to_pitch_subrect, copy_pitch_to_block_linear_subrect, BlockDepth,
    BlockHeight, Dimensions,
};

#[derive(Debug)]
struct Input {
    block_linear_width: usize,
    block_linear_height: usize,
    width: usize,
    height: usize,
    origin_x: usize,
    origin_y: usize,
    block_height: BlockHeight,
    bytes_per_block: usize,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        // The pitch rectangle has to fit inside the block linear surface.
        let block_linear_width = u.int_in_range(1..=512)?;
        let block_linear_height = u.int_in_range(1..=512)?;
        let width = u.int_in_range(1..=block_linear_width)?;
        let height = u.int_in_range(1..=block_linear_height)?;
        Ok(Input {
            block_linear_width,
            block_linear_height,
            width,
            height,
            origin_x: u.int_in_range(0..=block_linear_width - width)?,
            origin_y: u.int_in_range(0..=block_linear_height - height)?,
            block_height: u.arbitrary()?,
            bytes_per_block: [1, 2, 4, 8, 12, 16][u.int_in_range(0..=5usize)?],
        })
    }
}

fuzz_target!(|input: Input| {
    let block_linear_dimensions =
        Dimensions::new_2d(input.block_linear_width, input.block_linear_height);
    let pitch_dimensions = Dimensions::new_2d(input.width, input.height);

    let pitch_size = input.width * input.bytes_per_block * input.height;
    let seed = [13u8; 32];
    let mut rng: StdRng = SeedableRng::from_seed(seed);
    let pitch_data: Vec<u8> = (0..pitch_size)
        .map(|_| rng.gen_range::<u8, _>(0..=255))
        .collect();

    let mut block_linear = vec![
        0u8;
        block_linear_layer_size(
            block_linear_dimensions,
            1,
            1,
            input.bytes_per_block,
            input.block_height,
            BlockDepth::One
        )
    ];
    copy_pitch_to_block_linear_subrect(
        pitch_dimensions,
        block_linear_dimensions,
        1,
        1,
        input.bytes_per_block,
        0,
        input.block_height,
        BlockDepth::One,
        &pitch_data,
        &mut block_linear,
        input.origin_x,
        input.origin_y,
    )
    .unwrap();

    let mut output = vec![0u8; pitch_size];
    copy_block_linear_to_pitch_subrect(
        pitch_dimensions,
        block_linear_dimensions,
        1,
        1,
        input.bytes_per_block,
        0,
        input.block_height,
        BlockDepth::One,
        &block_linear,
        &mut output,
        input.origin_x,
        input.origin_y,
    )
    .unwrap();

    assert_eq!(pitch_data, output);
});
