//! Encode command implementation.

use crate::utils::{open_input, open_output, read_input, savings_percent, source_name};
use log::info;
use oxihuff_vitter::{VitterConfig, VitterEncoder, compress_with};
use std::io::Write;
use std::path::Path;

pub fn cmd_encode(
    input: Option<&Path>,
    output: Option<&Path>,
    raw: bool,
    config: VitterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = open_output(output)?;

    let (original, encoded) = if raw {
        let reader = open_input(input)?;
        let stats = VitterEncoder::new(config).encode_stream(reader, &mut writer)?;
        (stats.symbols, stats.bytes())
    } else {
        let data = read_input(input)?;
        let framed = compress_with(&data, config)?;
        writer.write_all(&framed)?;
        (data.len() as u64, framed.len() as u64)
    };
    writer.flush()?;

    info!(
        "{}: {} -> {} bytes ({:.1}% saved)",
        source_name(input),
        original,
        encoded,
        savings_percent(original, encoded)
    );
    Ok(())
}
