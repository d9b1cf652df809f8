#![no_main]
use libfuzzer_sys::fuzz_target;
use netpbm_codec::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic, and a one-byte buffered reader must agree with the slice path.
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let request = DecodeRequest::new().with_limits(&limits);
    let from_slice = request.decode(data, enough::Unstoppable);
    let from_stream = request.decode_reader(std::io::BufReader::with_capacity(1, data), enough::Unstoppable);
    match (from_slice, from_stream) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "slice and stream decode disagree"),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("slice/stream outcome mismatch: {:?} vs {:?}", a.is_ok(), b.is_ok()),
    }
});
