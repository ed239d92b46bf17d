#![no_main]
use libfuzzer_sys::fuzz_target;
use lzs::{compress, decompress, Alphabet};

fuzz_target!(|data: &[u8]| {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    for alphabet in Alphabet::ALL {
        let packed = compress(&units, alphabet);
        let unpacked = decompress(&packed, alphabet).expect("own output must decode");
        assert_eq!(unpacked, units, "round trip failed for {alphabet}");
    }
});
