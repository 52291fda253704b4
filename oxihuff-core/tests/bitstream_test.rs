//! Bit-level I/O integration tests.

use oxihuff_core::{BitReader, BitSequence, BitWriter};
use proptest::prelude::*;

#[test]
fn test_mixed_bits_and_bytes() {
    let mut writer = BitWriter::new(Vec::new());
    writer.write_bits(&"0".parse().unwrap()).unwrap();
    writer.write_byte(0x42).unwrap();
    writer.write_bits(&"1".parse().unwrap()).unwrap();
    writer.write_bits(&"01".parse().unwrap()).unwrap();
    assert_eq!(writer.bits_written(), 12);

    let data = writer.into_inner().unwrap();
    assert_eq!(data, vec![0x21, 0x50]);

    let mut reader = BitReader::new(&data[..]);
    assert_eq!(reader.read_bit().unwrap(), Some(false));
    assert_eq!(reader.read_byte().unwrap(), Some(0x42));
    assert_eq!(reader.read_bit().unwrap(), Some(true));
    assert!(!reader.buffered_bits_are_zero());
}

#[test]
fn test_flush_without_pending_bits_writes_nothing() {
    let mut writer = BitWriter::new(Vec::new());
    writer.flush().unwrap();
    writer.write_byte(0xFF).unwrap();
    writer.flush().unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.into_inner().unwrap(), vec![0xFF]);
}

proptest! {
    #[test]
    fn prop_bits_survive_packing(bits in prop::collection::vec(any::<bool>(), 0..300)) {
        let sequence: BitSequence = bits.iter().copied().collect();

        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(&sequence).unwrap();
        let data = writer.into_inner().unwrap();
        prop_assert_eq!(data.len(), bits.len().div_ceil(8));

        let mut reader = BitReader::new(&data[..]);
        for &expected in &bits {
            prop_assert_eq!(reader.read_bit().unwrap(), Some(expected));
        }
        prop_assert!(reader.buffered_bits_are_zero());
        reader.align_to_byte();
        prop_assert!(reader.is_eof().unwrap());
    }

    #[test]
    fn prop_display_parses_back(bits in prop::collection::vec(any::<bool>(), 0..64)) {
        let sequence = BitSequence::from(bits);
        let parsed: BitSequence = sequence.to_string().parse().unwrap();
        prop_assert_eq!(parsed, sequence);
    }
}
