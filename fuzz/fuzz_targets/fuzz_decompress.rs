#![no_main]
use libfuzzer_sys::fuzz_target;
use lzs::{decompress, Alphabet};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Byte 0: alphabet, the rest: payload as little-endian code units
    let alphabet = Alphabet::ALL[data[0] as usize % Alphabet::ALL.len()];
    let payload: Vec<u16> = data[1..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let _ = decompress(&payload, alphabet);
});
