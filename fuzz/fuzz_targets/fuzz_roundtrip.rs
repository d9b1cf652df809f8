#![no_main]
use libfuzzer_sys::fuzz_target;
use netpbm_codec::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok((header, grid)) = DecodeRequest::new()
        .with_limits(&limits)
        .decode(data, enough::Unstoppable)
    else {
        return;
    };

    // Decoded grids already sit on the 8-bit scale, so re-encoding in the same
    // format and decoding again must reproduce them exactly.
    let target = Header::new(header.format, header.width, header.height);
    let reencoded = encode(&grid, &target, header.format.mode(), enough::Unstoppable)
        .expect("re-encode of a decoded grid failed");
    let Ok((header2, grid2)) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(header2, target);
    assert_eq!(grid, grid2, "roundtrip pixel mismatch");
});
