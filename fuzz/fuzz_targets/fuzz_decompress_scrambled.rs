#![no_main]
use libfuzzer_sys::fuzz_target;
use lzs::decompress_scrambled;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Byte 0: key count (0-3), then 8 bytes per key, then the payload
    let key_count = (data[0] % 4) as usize;
    let key_bytes = 1 + key_count * 8;
    if data.len() < key_bytes {
        return;
    }
    let keys: Vec<i64> = data[1..key_bytes]
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            i64::from_le_bytes(bytes)
        })
        .collect();
    let payload: Vec<u16> = data[key_bytes..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let _ = decompress_scrambled(&payload, &keys);
});
