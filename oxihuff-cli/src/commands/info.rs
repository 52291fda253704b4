//! Info command implementation.

use crate::utils::savings_percent;
use log::warn;
use oxihuff_core::Crc32;
use oxihuff_vitter::frame::{FrameHeader, HEADER_SIZE, VERSION};
use oxihuff_vitter::{VitterConfig, VitterDecoder};
use serde::Serialize;
use std::path::Path;

/// JSON output for a frame.
#[derive(Debug, Serialize)]
struct FrameInfoJson {
    file: String,
    version: u8,
    original_size: u64,
    encoded_size: u64,
    payload_size: u64,
    savings_percent: f64,
    crc32: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    distinct_symbols: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bits_per_symbol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let header = FrameHeader::parse(&data)?;
    let len = header.original_len_usize()?;

    let mut decoder = VitterDecoder::new(VitterConfig::DEFAULT);
    let check = decoder
        .decode(&data[HEADER_SIZE..], len)
        .map(|decoded| Crc32::compute(&decoded));
    let error = match &check {
        Ok(computed) if *computed == header.crc32 => None,
        Ok(computed) => Some(format!(
            "CRC mismatch: expected {:#010x}, computed {:#010x}",
            header.crc32, computed
        )),
        Err(e) => Some(e.to_string()),
    };
    if let Some(error) = &error {
        warn!("{}: {}", file.display(), error);
    }

    let decoded_ok = check.is_ok();
    let info = FrameInfoJson {
        file: file.display().to_string(),
        version: VERSION,
        original_size: header.original_len,
        encoded_size: data.len() as u64,
        payload_size: (data.len() - HEADER_SIZE) as u64,
        savings_percent: savings_percent(header.original_len, data.len() as u64),
        crc32: format!("{:08x}", header.crc32),
        valid: error.is_none(),
        distinct_symbols: decoded_ok.then(|| decoder.tree().symbol_count()),
        bits_per_symbol: decoded_ok.then(|| decoder.stats().bits_per_symbol()),
        error,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Frame Information");
    println!("=================");
    println!("File: {}", info.file);
    println!("Format: VHUF version {}", info.version);
    println!("Original size: {} bytes", info.original_size);
    println!("Encoded size: {} bytes", info.encoded_size);
    println!("Payload size: {} bytes", info.payload_size);
    println!("Space saved: {:.1}%", info.savings_percent);
    println!("CRC-32: {}", info.crc32);
    if let Some(distinct) = info.distinct_symbols {
        println!("Distinct symbols: {}", distinct);
    }
    if let Some(bits) = info.bits_per_symbol {
        println!("Bits per symbol: {:.3}", bits);
    }
    match &info.error {
        None => println!("Status: OK"),
        Some(error) => println!("Status: FAILED ({})", error),
    }

    Ok(())
}
