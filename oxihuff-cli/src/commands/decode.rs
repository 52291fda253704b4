//! Decode command implementation.

use crate::utils::{open_input, open_output, source_name};
use log::info;
use oxihuff_vitter::{VitterConfig, VitterDecoder, decompress_stream};
use std::io::Write;
use std::path::Path;

pub fn cmd_decode(
    input: Option<&Path>,
    output: Option<&Path>,
    raw: bool,
    length: Option<u64>,
    config: VitterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = open_input(input)?;
    let mut writer = open_output(output)?;

    let stats = if raw {
        let length = length.ok_or("decoding a raw stream requires --length")?;
        VitterDecoder::new(config).decode_stream(reader, &mut writer, length)?
    } else {
        decompress_stream(reader, &mut writer, config)?
    };
    writer.flush()?;

    info!(
        "{}: decoded {} bytes ({:.3} bits per symbol)",
        source_name(input),
        stats.symbols,
        stats.bits_per_symbol()
    );
    Ok(())
}
